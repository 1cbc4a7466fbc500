//! Locale-aware collation.

/// Collation capability and the default Unicode collator
pub mod collator;
/// Equality, ordering and substring predicates
pub mod matcher;
/// Collator options
pub mod options;

pub use collator::{
    Collation,
    UnicodeCollator,
};
pub use matcher::CollationMatcher;
pub use options::{
    CollatorOptions,
    Sensitivity,
    Usage,
};
