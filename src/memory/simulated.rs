//! Sandboxed memory for host builds
//!
//! [`SimulatedMemory`] owns a fixed-size, zero-filled byte buffer. Logical
//! address 0 is the first byte of the buffer, so every peek and poke lands
//! inside the sandbox and never touches the monitor's own process memory.
//!
//! Multi-byte elements are stored little-endian, matching the Cortex-M7 the
//! monitor was written for. Unaligned accesses are allowed.

use super::{effective_address, Target, Width};
use crate::interpreter::constants::SIMULATED_MEMORY_SIZE;
use crate::interpreter::errors::MonitorError;

/// A byte buffer addressed from zero
#[derive(Debug, Clone)]
pub struct SimulatedMemory {
    data: Vec<u8>,
}

impl SimulatedMemory {
    /// Create a zero-filled region of `size` bytes
    pub fn new(size: usize) -> Self {
        SimulatedMemory {
            data: vec![0; size],
        }
    }

    /// Size of the region in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Raw view of the whole region
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Copy an image into the region starting at `address`
    pub fn load(&mut self, address: u32, image: &[u8]) -> Result<(), MonitorError> {
        let start = address as usize;
        let end = start
            .checked_add(image.len())
            .filter(|&end| end <= self.data.len())
            .ok_or(MonitorError::AddressOutOfRange {
                address,
                width: Width::Byte,
            })?;
        self.data[start..end].copy_from_slice(image);
        tracing::info!(address, len = image.len(), "loaded memory image");
        Ok(())
    }
}

impl Default for SimulatedMemory {
    fn default() -> Self {
        Self::new(SIMULATED_MEMORY_SIZE)
    }
}

impl Target for SimulatedMemory {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn translate(&self, address: u32, width: Width) -> Result<usize, MonitorError> {
        let start = address as usize;
        match start.checked_add(width.bytes() as usize) {
            Some(end) if end <= self.data.len() => Ok(start),
            _ => {
                tracing::debug!(address, %width, "simulated access out of range");
                Err(MonitorError::AddressOutOfRange { address, width })
            }
        }
    }

    fn read(&self, address: u32, offset: i32, width: Width) -> Result<u32, MonitorError> {
        let address = effective_address(address, offset, width);
        let index = self.translate(address, width)?;
        let bytes = &self.data[index..index + width.bytes() as usize];
        let value = match width {
            Width::Byte => bytes[0] as u32,
            Width::Half => u16::from_le_bytes([bytes[0], bytes[1]]) as u32,
            Width::Word => u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        };
        Ok(value)
    }

    fn write(&mut self, address: u32, value: u32, width: Width) -> Result<(), MonitorError> {
        let index = self.translate(address, width)?;
        let len = width.bytes() as usize;
        self.data[index..index + len].copy_from_slice(&value.to_le_bytes()[..len]);
        Ok(())
    }
}
