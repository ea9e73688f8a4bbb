// stylegate-core/src/engine.rs
//! Defines the `StyleSanitizer` trait.
//!
//! HTML sanitizers call into this trait once per element carrying a `style`
//! attribute. Keeping the dependency on a trait lets a host swap policies (or
//! wrap them) without touching the element walker, and lets one built policy be
//! shared as `Arc<dyn StyleSanitizer>` between threads.
//!
//! License: MIT OR Apache-2.0

use crate::policy::Policy;

/// Filters inline styles for an element.
pub trait StyleSanitizer: Send + Sync {
    /// Returns only the allowed declarations of `style`, or an empty string.
    ///
    /// Must never fail: any error results in declarations being left out.
    fn sanitize_style(&self, element_name: &str, style: &str) -> String;

    /// Whether any rule could apply to `element_name`.
    ///
    /// Hosts use this to drop the `style` attribute without parsing it.
    fn has_policies(&self, element_name: &str) -> bool;
}

impl StyleSanitizer for Policy {
    fn sanitize_style(&self, element_name: &str, style: &str) -> String {
        self.sanitize(element_name, style)
    }

    fn has_policies(&self, element_name: &str) -> bool {
        Policy::has_policies(self, element_name)
    }
}
