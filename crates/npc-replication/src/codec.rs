//! Binary codec for channel payloads.

use npc_core::ActionCode;
use thiserror::Error;

use crate::Message;

/// Errors that can occur during encoding/decoding.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("encode error: {0}")]
    Encode(#[source] bincode::Error),

    #[error("decode error: {0}")]
    Decode(#[source] bincode::Error),

    #[error("action code {0} has no byte form")]
    Code(ActionCode),
}

pub type CodecResult<T> = Result<T, CodecError>;

/// Encode a message to bytes.  Fails for an emote slot that would not
/// survive the single-byte code.
pub fn encode(message: &Message) -> CodecResult<Vec<u8>> {
    let code = message.snapshot().code;
    if !code.is_encodable() {
        return Err(CodecError::Code(code));
    }
    bincode::serialize(message).map_err(CodecError::Encode)
}

/// Decode a message from bytes.
pub fn decode(data: &[u8]) -> CodecResult<Message> {
    bincode::deserialize(data).map_err(CodecError::Decode)
}
