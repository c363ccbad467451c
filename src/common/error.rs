use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid address: '{0}'")]
    InvalidAddress(String),
    #[error("Invalid block identifier: '{0}'")]
    InvalidBlock(String),
    #[error("RPC not reachable: {0}")]
    Unreachable(String),
    #[error("RPC error: '{0}'")]
    Rpc(String),
    #[error("HTTP status {0}")]
    Http(u16),
}
