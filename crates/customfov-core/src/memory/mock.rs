//! In-memory stand-in for game memory used by tests

use crate::error::{Error, Result};
use crate::memory::{ReadMemory, WriteMemory};

#[derive(Debug, Clone)]
pub struct MockMemory {
    base: u64,
    data: Vec<u8>,
}

impl MockMemory {
    fn range(&self, address: u64, size: usize) -> Result<std::ops::Range<usize>> {
        let out_of_range = || Error::MemoryAccess { address, size };
        let start = address.checked_sub(self.base).ok_or_else(out_of_range)? as usize;
        let end = start.checked_add(size).ok_or_else(out_of_range)?;
        if end > self.data.len() {
            return Err(out_of_range());
        }
        Ok(start..end)
    }
}

impl ReadMemory for MockMemory {
    fn read_into(&self, address: u64, buf: &mut [u8]) -> Result<()> {
        let range = self.range(address, buf.len())?;
        buf.copy_from_slice(&self.data[range]);
        Ok(())
    }
}

impl WriteMemory for MockMemory {
    fn write_from(&mut self, address: u64, bytes: &[u8]) -> Result<()> {
        let range = self.range(address, bytes.len())?;
        self.data[range].copy_from_slice(bytes);
        Ok(())
    }
}

/// Builder for [`MockMemory`]; offsets are relative to the base address
#[derive(Debug, Default)]
pub struct MockMemoryBuilder {
    base: u64,
    data: Vec<u8>,
}

impl MockMemoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base(mut self, base: u64) -> Self {
        self.base = base;
        self
    }

    pub fn size(mut self, size: usize) -> Self {
        if self.data.len() < size {
            self.data.resize(size, 0);
        }
        self
    }

    pub fn with_bytes_at(mut self, offset: u64, bytes: &[u8]) -> Self {
        let start = offset as usize;
        self = self.size(start + bytes.len());
        self.data[start..start + bytes.len()].copy_from_slice(bytes);
        self
    }

    pub fn with_u32_at(self, offset: u64, value: u32) -> Self {
        self.with_bytes_at(offset, &value.to_le_bytes())
    }

    pub fn with_f32_at(self, offset: u64, value: f32) -> Self {
        self.with_bytes_at(offset, &value.to_le_bytes())
    }

    pub fn build(self) -> MockMemory {
        MockMemory {
            base: self.base,
            data: self.data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_memory_bounds() {
        let memory = MockMemoryBuilder::new()
            .base(0x1000)
            .with_u32_at(0, 7)
            .build();
        assert_eq!(memory.read_u32(0x1000).unwrap(), 7);
        assert!(memory.read_u32(0x0FFF).is_err());
        assert!(memory.read_u32(0x1001).is_err());
    }
}
