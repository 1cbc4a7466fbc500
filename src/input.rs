//! Translation payloads and the providers they come from.

/// Provider records and payload locations
pub mod provider;
/// Payload parsing and the nested value model
pub mod translation;
