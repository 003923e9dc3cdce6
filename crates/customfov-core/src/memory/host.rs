use std::ptr;

use crate::error::{Error, Result};
use crate::memory::{ReadMemory, WriteMemory};

/// Direct access to the memory of the process this library is loaded into
#[derive(Debug)]
pub struct HostMemory {
    _private: (),
}

impl HostMemory {
    /// # Safety
    ///
    /// Every non-null address later passed to this accessor must point into
    /// mapped memory of the current process, valid for the requested length,
    /// and must not be concurrently written by another thread.
    pub unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl ReadMemory for HostMemory {
    fn read_into(&self, address: u64, buf: &mut [u8]) -> Result<()> {
        if address == 0 {
            return Err(Error::NullAddress);
        }
        // SAFETY: validity of `address..address + len` is the constructor's contract.
        unsafe {
            ptr::copy_nonoverlapping(address as usize as *const u8, buf.as_mut_ptr(), buf.len());
        }
        Ok(())
    }
}

impl WriteMemory for HostMemory {
    fn write_from(&mut self, address: u64, bytes: &[u8]) -> Result<()> {
        if address == 0 {
            return Err(Error::NullAddress);
        }
        // SAFETY: validity of `address..address + len` is the constructor's contract.
        unsafe {
            ptr::copy_nonoverlapping(bytes.as_ptr(), address as usize as *mut u8, bytes.len());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_memory_reads_and_writes_local_buffer() {
        let mut block = [0u8; 16];
        block[4..8].copy_from_slice(&42.5f32.to_le_bytes());
        let base = block.as_mut_ptr() as usize as u64;

        // SAFETY: every address used below lies inside `block`.
        let mut memory = unsafe { HostMemory::new() };
        assert_eq!(memory.read_f32(base + 4).unwrap(), 42.5);

        memory.write_f32(base + 8, -3.0).unwrap();
        assert_eq!(memory.read_f32(base + 8).unwrap(), -3.0);
    }

    #[test]
    fn test_host_memory_rejects_null() {
        let memory = unsafe { HostMemory::new() };
        assert!(matches!(memory.read_u32(0), Err(Error::NullAddress)));
    }
}
