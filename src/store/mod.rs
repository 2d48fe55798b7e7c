//! Record storage.
//!
//! - [`KeyedStore`] generic string-keyed map with merge-on-write updates;
//! - [`HydrationRecord`] / [`RecordPatch`] the per-element record and its partial update.

mod keyed;
mod record;

pub use keyed::{KeyedStore, Merge};
pub use record::{HydrationRecord, RecordPatch};

/// Store specialised for hydration records.
pub type RecordStore = KeyedStore<HydrationRecord>;
