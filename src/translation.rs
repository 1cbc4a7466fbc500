//! Translation storage, key resolution and interpolation.

/// Placeholder substitution
pub mod interpolate;
/// Per-language translation table
pub mod table;

pub use interpolate::Args;
pub use table::{
    ResolvePolicy,
    TranslationTable,
};
