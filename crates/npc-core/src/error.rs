//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `NpcError` where a core
//! conversion can fail.

use thiserror::Error;

/// Errors raised by `npc-core` conversions.
#[derive(Debug, Error)]
pub enum NpcError {
    #[error("unknown action code byte {0}")]
    UnknownCode(u8),
}

/// Alias for `Result<T, NpcError>`.
pub type NpcResult<T> = Result<T, NpcError>;
