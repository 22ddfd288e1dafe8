use crate::store::StoreError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("parse error: {reason}")]
    Parse { reason: String },

    #[error("decode error: {reason}")]
    Decode { reason: String },

    #[error("protocol error: {reason}")]
    Protocol { reason: String },

    #[error("config error: {reason}")]
    Config { reason: String },

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
