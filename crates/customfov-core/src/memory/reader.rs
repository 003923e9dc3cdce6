use crate::error::Result;

/// Read access to game memory.
///
/// All multi-byte values are little-endian.
pub trait ReadMemory {
    /// Fill `buf` with the bytes starting at `address`
    fn read_into(&self, address: u64, buf: &mut [u8]) -> Result<()>;

    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; size];
        self.read_into(address, &mut buf)?;
        Ok(buf)
    }

    fn read_u32(&self, address: u64) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.read_into(address, &mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    fn read_f32(&self, address: u64) -> Result<f32> {
        let mut buf = [0u8; 4];
        self.read_into(address, &mut buf)?;
        Ok(f32::from_le_bytes(buf))
    }
}

/// Write access to game memory
pub trait WriteMemory: ReadMemory {
    fn write_from(&mut self, address: u64, bytes: &[u8]) -> Result<()>;

    fn write_f32(&mut self, address: u64, value: f32) -> Result<()> {
        self.write_from(address, &value.to_le_bytes())
    }
}
