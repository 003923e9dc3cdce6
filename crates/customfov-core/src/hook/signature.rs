use tracing::error;

use crate::error::{Error, Result};
use crate::hook::HookTarget;
use crate::memory::ReadMemory;

/// Expected leading bytes of a function to be hooked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionSignature {
    pub target: HookTarget,
    pub address: u64,
    /// Space-separated hex bytes, `??` matches any byte
    pub pattern: &'static str,
}

impl FunctionSignature {
    pub fn pattern_bytes(&self) -> Result<Vec<Option<u8>>> {
        parse_pattern(self.pattern)
    }

    /// Compare the bytes at `address` with the pattern
    pub fn verify<R: ReadMemory + ?Sized>(&self, memory: &R) -> Result<()> {
        let expected = self.pattern_bytes()?;
        let found = memory.read_bytes(self.address, expected.len())?;
        if matches_pattern(&found, &expected) {
            return Ok(());
        }

        let found: Vec<Option<u8>> = found.into_iter().map(Some).collect();
        let err = Error::SignatureMismatch {
            target: self.target,
            address: self.address,
            expected: format_pattern(&expected),
            found: format_pattern(&found),
        };
        error!("{}", err);
        Err(err)
    }
}

pub fn matches_pattern(bytes: &[u8], pattern: &[Option<u8>]) -> bool {
    bytes.len() == pattern.len()
        && bytes
            .iter()
            .zip(pattern)
            .all(|(byte, expected)| expected.is_none_or(|value| value == *byte))
}

pub fn parse_pattern(pattern: &str) -> Result<Vec<Option<u8>>> {
    let mut bytes = Vec::new();
    for token in pattern.split_whitespace() {
        if token == "??" || token == "?" {
            bytes.push(None);
            continue;
        }

        let value = u8::from_str_radix(token, 16).map_err(|e| {
            Error::InvalidSignature(format!("Invalid signature token '{}': {}", token, e))
        })?;
        bytes.push(Some(value));
    }

    if bytes.is_empty() {
        return Err(Error::InvalidSignature(
            "Signature pattern is empty".to_string(),
        ));
    }

    Ok(bytes)
}

pub fn format_pattern(bytes: &[Option<u8>]) -> String {
    bytes
        .iter()
        .map(|b| match b {
            Some(value) => format!("{:02X}", value),
            None => "??".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
