//! Layouts and addresses of the SAMD21 registers this crate touches.
//!
//! Each register is a [bitfield_struct] over its natural width, and
//! knows its own address through [Register] (or [RegisterArray] for
//! the per-pin registers).

use crate::bus::Word;

pub mod gclk;
pub mod nvmctrl;
pub mod pm;
pub mod port;
pub mod sysctrl;
pub mod tc4;

/// Base address of the power manager.
pub const PM: u32 = 0x4000_0400;
/// Base address of the system controller.
pub const SYSCTRL: u32 = 0x4000_0800;
/// Base address of the generic clock controller.
pub const GCLK: u32 = 0x4000_0c00;
/// Base address of the non-volatile memory controller.
pub const NVMCTRL: u32 = 0x4100_4000;
/// Base address of PORT group 0 (the PAxx pins).
pub const PORT_GROUP0: u32 = 0x4100_4400;
/// Base address of timer/counter 4.
pub const TC4: u32 = 0x4200_3000;
/// Start of the NVM software calibration area.
pub const NVM_SW_CALIB: u32 = 0x0080_6020;

/// A trait describing a single register generically.
pub trait Register: Copy + From<Self::Raw> + Into<Self::Raw> {
    /// The access width of this register.
    type Raw: Word;
    /// The absolute address of this register.
    const ADDRESS: u32;
}

/// A register that repeats once per pin (or pin pair).
pub trait RegisterArray: Copy + From<Self::Raw> + Into<Self::Raw> {
    /// The access width of each entry.
    type Raw: Word;
    /// The address of entry 0.
    const BASE: u32;
    /// The number of entries.
    const LEN: u8;

    /// The address of entry `n`.
    #[inline(always)]
    fn address(n: u8) -> u32 {
        debug_assert!(n < Self::LEN);
        Self::BASE + n as u32 * <Self::Raw as Word>::BYTES
    }
}

macro_rules! impl_register {
    ($reg:ty, $raw:ty, $base:expr, $offset:expr) => {
        impl crate::registers::Register for $reg {
            type Raw = $raw;
            const ADDRESS: u32 = $base + $offset;
        }
    };
}

pub(crate) use impl_register;
