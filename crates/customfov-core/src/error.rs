use thiserror::Error;

use crate::hook::HookTarget;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unsupported game version: {0}")]
    UnsupportedVersion(String),

    #[error("Function {target} at {address:#x} does not match expected bytes (expected {expected}, found {found})")]
    SignatureMismatch {
        target: HookTarget,
        address: u64,
        expected: String,
        found: String,
    },

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Failed to create hook for {target} at {address:#x}: {reason}")]
    HookInstall {
        target: HookTarget,
        address: u64,
        reason: String,
    },

    #[error("Refusing to access memory at a null address")]
    NullAddress,

    #[error("Failed to access {size} bytes of memory at address {address:#x}")]
    MemoryAccess { address: u64, size: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}
