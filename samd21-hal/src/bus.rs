//! Access to memory-mapped registers.
//!
//! Everything in this crate talks to the hardware through a [Bus]. On
//! the chip itself that is [Mmio], which performs volatile reads and
//! writes at the physical addresses. Register layouts live in
//! [crate::registers] and carry their own addresses.

use core::cell::Cell;

use critical_section::Mutex;
use vcell::VolatileCell;

use crate::registers::{Register, RegisterArray};

// seal for the Word trait
trait Sealed {}

/// An integer width the bus can transfer: 8, 16 or 32 bits.
#[allow(private_bounds)]
pub trait Word: Sealed + Copy + Default + core::fmt::Debug + PartialEq {
    /// Width in bytes.
    const BYTES: u32;

    /// Truncate a 32-bit value to this width.
    fn from_u32(value: u32) -> Self;

    /// Zero-extend this value to 32 bits.
    fn into_u32(self) -> u32;
}

macro_rules! word_impl {
    ($($ty:ty),+) => {
        $(
            impl Sealed for $ty {}

            impl Word for $ty {
                const BYTES: u32 = core::mem::size_of::<$ty>() as u32;

                #[inline(always)]
                fn from_u32(value: u32) -> Self {
                    value as $ty
                }

                #[inline(always)]
                fn into_u32(self) -> u32 {
                    self as u32
                }
            }
        )+
    };
}

word_impl!(u8, u16, u32);

/// Something that can read and write device registers.
///
/// Handles are cheap to clone, and every clone refers to the same
/// underlying register space.
pub trait Bus: Clone {
    /// Read a raw value of width `W` at `address`.
    fn read_raw<W: Word>(&self, address: u32) -> W;

    /// Write a raw value of width `W` to `address`.
    fn write_raw<W: Word>(&self, address: u32, value: W);

    /// Make sure every write issued so far has reached the hardware.
    #[inline(always)]
    fn barrier(&self) {
        core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
    }

    /// Read a register.
    #[inline(always)]
    fn read<R>(&self) -> R
    where
        R: Register,
    {
        R::from(self.read_raw::<R::Raw>(R::ADDRESS))
    }

    /// Write a register.
    #[inline(always)]
    fn write<R>(&self, value: R)
    where
        R: Register,
    {
        self.write_raw::<R::Raw>(R::ADDRESS, value.into())
    }

    /// Modify a register.
    #[inline(always)]
    fn modify<R>(&self, f: impl FnOnce(R) -> R)
    where
        R: Register,
    {
        let value = self.read();
        self.write(f(value))
    }

    /// Read entry `n` of a register array.
    #[inline(always)]
    fn read_at<R>(&self, n: u8) -> R
    where
        R: RegisterArray,
    {
        R::from(self.read_raw::<R::Raw>(R::address(n)))
    }

    /// Write entry `n` of a register array.
    #[inline(always)]
    fn write_at<R>(&self, n: u8, value: R)
    where
        R: RegisterArray,
    {
        self.write_raw::<R::Raw>(R::address(n), value.into())
    }

    /// Modify entry `n` of a register array.
    #[inline(always)]
    fn modify_at<R>(&self, n: u8, f: impl FnOnce(R) -> R)
    where
        R: RegisterArray,
    {
        let value = self.read_at(n);
        self.write_at(n, f(value))
    }
}

/// Volatile access to the real, memory-mapped registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mmio {
    _private: (),
}

static TAKEN: Mutex<Cell<bool>> = Mutex::new(Cell::new(false));

impl Mmio {
    /// Take the register space. Only the first call returns `Some`.
    #[inline]
    pub fn take() -> Option<Self> {
        critical_section::with(|cs| {
            let taken = TAKEN.borrow(cs);
            if taken.get() {
                None
            } else {
                taken.set(true);
                // safety: we just made sure this is the only handle
                Some(unsafe { Self::steal() })
            }
        })
    }

    /// # Safety
    /// This hands out access to every register on the chip, regardless
    /// of what else already holds it.
    #[inline(always)]
    pub unsafe fn steal() -> Self {
        Self { _private: () }
    }
}

impl Bus for Mmio {
    #[inline(always)]
    fn read_raw<W: Word>(&self, address: u32) -> W {
        // safety: every address we use comes from a register definition
        // with the correct width and alignment for W
        unsafe { (*(address as usize as *const VolatileCell<W>)).get() }
    }

    #[inline(always)]
    fn write_raw<W: Word>(&self, address: u32, value: W) {
        // safety: as above
        unsafe { (*(address as usize as *const VolatileCell<W>)).set(value) }
    }

    #[inline(always)]
    fn barrier(&self) {
        cortex_m::asm::dsb();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn word_widths() {
        assert_eq!(1, u8::BYTES);
        assert_eq!(2, u16::BYTES);
        assert_eq!(4, u32::BYTES);
    }

    #[test]
    fn word_truncates() {
        assert_eq!(0x78u8, u8::from_u32(0x1234_5678));
        assert_eq!(0x5678u16, u16::from_u32(0x1234_5678));
        assert_eq!(0xffff_u32, 0xffffu16.into_u32());
    }

    #[test]
    fn take_once() {
        assert!(Mmio::take().is_some());
        assert!(Mmio::take().is_none());
    }
}
