//! Memory model for the command line monitor
//!
//! This module provides the memory abstractions the commands run against:
//! - [`stack`]: The fixed-capacity integer data stack
//! - [`simulated`]: A sandboxed byte buffer standing in for device memory
//! - [`hardware`]: Direct volatile access to the device's address space
//!
//! # Address Translation
//!
//! Commands never dereference an address themselves. Every access goes
//! through a [`Target`], which maps the logical 32-bit address typed by the
//! user onto a real location:
//!
//! ```text
//! hardware:   effective = address
//! simulated:  effective = buffer_base + address
//! ```
//!
//! Element offsets are scaled by the access width before translation, so
//! `read(a, 3, Width::Half)` reads the halfword at `a + 6`.

pub mod hardware;
pub mod simulated;
pub mod stack;

use crate::interpreter::errors::MonitorError;
use std::fmt;

pub use hardware::HardwareTarget;
pub use simulated::SimulatedMemory;
pub use stack::DataStack;

/// Access granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Width {
    Byte,
    Half,
    Word,
}

impl Width {
    /// Size of one element in bytes
    pub fn bytes(self) -> u32 {
        match self {
            Width::Byte => 1,
            Width::Half => 2,
            Width::Word => 4,
        }
    }

    pub fn bits(self) -> u32 {
        self.bytes() * 8
    }

    /// Number of hex digits needed to print a full element
    pub fn hex_digits(self) -> usize {
        self.bytes() as usize * 2
    }

    /// Mask selecting the bits an element of this width can hold
    pub fn mask(self) -> u32 {
        match self {
            Width::Byte => 0xff,
            Width::Half => 0xffff,
            Width::Word => 0xffff_ffff,
        }
    }

    /// Format a value as zero-padded lowercase hex of this width
    pub fn format_hex(self, value: u32) -> String {
        format!("{:0width$x}", value & self.mask(), width = self.hex_digits())
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

/// Logical address of element `offset` from `address`, wrapping in 32-bit space
pub fn effective_address(address: u32, offset: i32, width: Width) -> u32 {
    address.wrapping_add((offset as u32).wrapping_mul(width.bytes()))
}

/// An address space the monitor commands can inspect and modify
///
/// Implementations are the only code aware of whether the monitor runs on
/// the device or on a development host.
pub trait Target {
    /// Short human-readable name, shown in the banner and the TUI
    fn name(&self) -> &'static str;

    /// Map a logical address onto a location for an access of `width`
    fn translate(&self, address: u32, width: Width) -> Result<usize, MonitorError>;

    /// Read element `offset` (scaled by `width`) relative to `address`
    ///
    /// The value is zero-extended; callers sign-extend when they need to.
    fn read(&self, address: u32, offset: i32, width: Width) -> Result<u32, MonitorError>;

    /// Store the low `width` bits of `value` at `address`
    fn write(&mut self, address: u32, value: u32, width: Width) -> Result<(), MonitorError>;

    /// Blink the board LED `count` times
    fn blink(&mut self, _count: i32) -> Result<(), MonitorError> {
        Err(MonitorError::Unsupported {
            message: "No blink in hosttest mode".to_string(),
        })
    }

    /// Whether the monitor may offer a way to exit
    fn allows_exit(&self) -> bool {
        true
    }
}
