//! # Media-query evaluation.
//!
//! [`Viewport`] is the host's `matchMedia`. [`WidthViewport`] is a small
//! reference implementation that understands width queries only:
//!
//! ```text
//! query   := term ( "and" term )*
//! term    := "all" | "screen" | "(" feature ":" length ")"
//! feature := "min-width" | "max-width"
//! length  := <integer> "px"
//! ```
//!
//! Anything else never matches.
//!
//! ## Example
//! ```rust
//! use hydravisor::{Viewport, WidthViewport};
//!
//! let vp = WidthViewport::new(800);
//! assert!(vp.matches("screen and (min-width: 600px)"));
//! assert!(!vp.matches("(max-width: 600px)"));
//! ```

use std::sync::atomic::{AtomicU32, Ordering};

/// Evaluates media queries against the current viewport.
pub trait Viewport: Send + Sync + 'static {
    /// True if `query` currently matches.
    fn matches(&self, query: &str) -> bool;
}

/// Viewport with a settable width, evaluating `min-width`/`max-width` queries.
#[derive(Debug)]
pub struct WidthViewport {
    width: AtomicU32,
}

impl WidthViewport {
    /// Creates a viewport `width` CSS pixels wide.
    pub fn new(width: u32) -> Self {
        Self {
            width: AtomicU32::new(width),
        }
    }

    /// Current width.
    pub fn width(&self) -> u32 {
        self.width.load(Ordering::Relaxed)
    }

    /// Changes the width. Callers notify listeners separately.
    pub fn set_width(&self, width: u32) {
        self.width.store(width, Ordering::Relaxed);
    }

    fn term_matches(&self, term: &str) -> bool {
        match term {
            "all" | "screen" => return true,
            _ => {}
        }
        let Some(inner) = term.strip_prefix('(').and_then(|t| t.strip_suffix(')')) else {
            return false;
        };
        let Some((feature, value)) = inner.split_once(':') else {
            return false;
        };
        let Some(px) = parse_px(value.trim()) else {
            return false;
        };
        let width = self.width();
        match feature.trim() {
            "min-width" => width >= px,
            "max-width" => width <= px,
            _ => false,
        }
    }
}

impl Viewport for WidthViewport {
    fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return false;
        }
        query
            .split(" and ")
            .map(str::trim)
            .all(|term| self.term_matches(term))
    }
}

fn parse_px(value: &str) -> Option<u32> {
    value.strip_suffix("px")?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_bounds_are_inclusive() {
        let vp = WidthViewport::new(600);
        assert!(vp.matches("(max-width: 600px)"));
        assert!(vp.matches("(min-width: 600px)"));
        assert!(!vp.matches("(min-width: 601px)"));
    }

    #[test]
    fn conjunction_requires_every_term() {
        let vp = WidthViewport::new(700);
        assert!(vp.matches("(min-width: 600px) and (max-width: 800px)"));
        vp.set_width(900);
        assert!(!vp.matches("(min-width: 600px) and (max-width: 800px)"));
    }

    #[test]
    fn unknown_features_never_match() {
        let vp = WidthViewport::new(700);
        assert!(!vp.matches("(orientation: landscape)"));
        assert!(!vp.matches("(min-width: 10em)"));
        assert!(!vp.matches(""));
        assert!(!vp.matches("print"));
    }

    #[test]
    fn unmatchable_query() {
        let vp = WidthViewport::new(1920);
        assert!(!vp.matches("(min-width: 999999px)"));
    }
}
