//! Collator options.

use serde::{
    Deserialize,
    Serialize,
};

/// Whether the comparison is used for ordering or for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Usage {
    #[default]
    Sort,
    Search,
}

/// Which differences between strings are significant.
///
/// - `Base`: only base letters (`a ≠ b`, `a = á = A`)
/// - `Accent`: base letters and accents (`a ≠ á`, `a = A`)
/// - `Case`: base letters and case (`a ≠ A`, `a = á`)
/// - `Variant`: everything (`a ≠ á ≠ A`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Sensitivity {
    Base,
    Accent,
    Case,
    #[default]
    Variant,
}

impl Sensitivity {
    #[must_use]
    pub const fn accents(self) -> bool {
        matches!(self, Self::Accent | Self::Variant)
    }

    #[must_use]
    pub const fn case(self) -> bool {
        matches!(self, Self::Case | Self::Variant)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollatorOptions {
    pub usage: Usage,
    pub sensitivity: Sensitivity,
    /// Skip whitespace and punctuation.
    pub ignore_punctuation: bool,
    /// Compare digit runs by numeric value (`"2" < "10"`).
    pub numeric: bool,
}

impl CollatorOptions {
    /// Defaults for ordering: `{ usage: sort, sensitivity: variant }`.
    #[must_use]
    pub const fn sort() -> Self {
        Self {
            usage: Usage::Sort,
            sensitivity: Sensitivity::Variant,
            ignore_punctuation: false,
            numeric: false,
        }
    }

    /// Defaults for matching: `{ usage: search, sensitivity: base }`.
    #[must_use]
    pub const fn search() -> Self {
        Self {
            usage: Usage::Search,
            sensitivity: Sensitivity::Base,
            ignore_punctuation: false,
            numeric: false,
        }
    }

    #[must_use]
    pub const fn with_sensitivity(mut self, sensitivity: Sensitivity) -> Self {
        self.sensitivity = sensitivity;
        self
    }
}
