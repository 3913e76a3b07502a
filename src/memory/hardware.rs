//! Direct access to the device address space
//!
//! On the device the logical address typed at the prompt *is* the physical
//! address, so [`HardwareTarget::translate`] is the identity. Nothing is
//! bounds-checked: a monitor is expected to touch arbitrary, occasionally
//! invalid, device addresses. This is the only module with raw pointer
//! arithmetic.

use super::{effective_address, Target, Width};
use crate::interpreter::errors::MonitorError;
use std::ptr;
use std::thread;
use std::time::Duration;

/// GPIO registers driving the board LED
///
/// The defaults describe pin 13 of a Teensy 4.0 (`GPIO_B0_03`, routed to the
/// fast `GPIO7` bank).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedPin {
    /// Pad mux register, written with `mux_mode` to select the GPIO function
    pub mux_register: u32,
    pub mux_mode: u32,
    /// General purpose register choosing the fast GPIO bank for the pin
    pub bank_select_register: u32,
    /// Direction register of the GPIO bank
    pub direction_register: u32,
    pub set_register: u32,
    pub clear_register: u32,
    pub mask: u32,
    pub half_period: Duration,
}

impl Default for LedPin {
    fn default() -> Self {
        LedPin {
            mux_register: 0x401f_8148,
            mux_mode: 5,
            bank_select_register: 0x400a_c06c,
            direction_register: 0x4200_4004,
            set_register: 0x4200_4084,
            clear_register: 0x4200_4088,
            mask: 1 << 3,
            half_period: Duration::from_millis(500),
        }
    }
}

/// The device's own address space
#[derive(Debug)]
pub struct HardwareTarget {
    led: Option<LedPin>,
}

impl HardwareTarget {
    /// Create a target that reads and writes physical addresses directly.
    ///
    /// # Safety
    ///
    /// Every address handed to [`Target::read`] and [`Target::write`] is
    /// dereferenced as-is. The caller must be running on the device, with a
    /// flat 32-bit address space, and accepts that invalid addresses fault.
    pub unsafe fn new(led: Option<LedPin>) -> Self {
        HardwareTarget { led }
    }

    fn load(address: usize, width: Width) -> u32 {
        // SAFETY: `HardwareTarget::new` makes the caller responsible for the address.
        unsafe {
            if address % width.bytes() as usize != 0 {
                let mut value = 0u32;
                for i in 0..width.bytes() as usize {
                    let byte = ptr::read_volatile((address + i) as *const u8);
                    value |= (byte as u32) << (8 * i);
                }
                return value;
            }
            match width {
                Width::Byte => ptr::read_volatile(address as *const u8) as u32,
                Width::Half => ptr::read_volatile(address as *const u16) as u32,
                Width::Word => ptr::read_volatile(address as *const u32),
            }
        }
    }

    fn store(address: usize, value: u32, width: Width) {
        // SAFETY: see `load`.
        unsafe {
            if address % width.bytes() as usize != 0 {
                for i in 0..width.bytes() as usize {
                    ptr::write_volatile((address + i) as *mut u8, (value >> (8 * i)) as u8);
                }
                return;
            }
            match width {
                Width::Byte => ptr::write_volatile(address as *mut u8, value as u8),
                Width::Half => ptr::write_volatile(address as *mut u16, value as u16),
                Width::Word => ptr::write_volatile(address as *mut u32, value),
            }
        }
    }

    fn modify(address: u32, f: impl FnOnce(u32) -> u32) {
        let value = Self::load(address as usize, Width::Word);
        Self::store(address as usize, f(value), Width::Word);
    }
}

impl Target for HardwareTarget {
    fn name(&self) -> &'static str {
        "hardware"
    }

    fn translate(&self, address: u32, _width: Width) -> Result<usize, MonitorError> {
        Ok(address as usize)
    }

    fn read(&self, address: u32, offset: i32, width: Width) -> Result<u32, MonitorError> {
        let address = self.translate(effective_address(address, offset, width), width)?;
        Ok(Self::load(address, width))
    }

    fn write(&mut self, address: u32, value: u32, width: Width) -> Result<(), MonitorError> {
        let address = self.translate(address, width)?;
        Self::store(address, value & width.mask(), width);
        Ok(())
    }

    fn blink(&mut self, count: i32) -> Result<(), MonitorError> {
        let Some(led) = self.led else {
            return Err(MonitorError::Unsupported {
                message: "No LED configured".to_string(),
            });
        };
        if count <= 0 {
            return Ok(());
        }

        Self::store(led.mux_register as usize, led.mux_mode, Width::Word);
        Self::modify(led.bank_select_register, |v| v | led.mask);
        Self::modify(led.direction_register, |v| v | led.mask);
        for _ in 0..count {
            Self::store(led.set_register as usize, led.mask, Width::Word);
            thread::sleep(led.half_period);
            Self::store(led.clear_register as usize, led.mask, Width::Word);
            thread::sleep(led.half_period);
        }
        Ok(())
    }

    fn allows_exit(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_is_identity() {
        // SAFETY: only `translate` is called, nothing is dereferenced.
        let target = unsafe { HardwareTarget::new(None) };
        assert_eq!(target.translate(0x4200_4000, Width::Word), Ok(0x4200_4000));
        assert_eq!(target.translate(0, Width::Byte), Ok(0));
        assert!(!target.allows_exit());
    }

    #[test]
    fn test_blink_without_led_is_unsupported() {
        // SAFETY: with no LED configured `blink` never touches memory.
        let mut target = unsafe { HardwareTarget::new(None) };
        assert!(matches!(
            target.blink(3),
            Err(MonitorError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_default_led_is_teensy_pin_13() {
        let led = LedPin::default();
        assert_eq!(led.mask, 0x8);
        assert_eq!(led.set_register - led.direction_register, 0x80);
    }
}
