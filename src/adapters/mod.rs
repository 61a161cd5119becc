//! Optional adapters for external math libraries.
//!
//! Enable feature flags (e.g. `glam`) to add `Point` impls for
//! external vector types and `Placement` impls for their transforms.

#[cfg(feature = "glam")]
pub mod glam;
