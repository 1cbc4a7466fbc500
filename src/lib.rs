//! l10n-service
//!
//! 言語切り替え、翻訳キーの解決、ロケールに応じた比較・ソート・検索を提供するローカライゼーションライブラリ

pub mod collation;
pub mod config;
pub mod input;
pub mod service;
#[cfg(test)]
mod test_utils;
pub mod translation;
pub mod types;

// 主要な型を再エクスポート
pub use service::{
    LocalizationService,
    ServiceState,
};
pub use types::{
    LanguageTag,
    Locale,
    SortOrder,
};
