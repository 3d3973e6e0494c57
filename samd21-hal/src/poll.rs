//! Waiting on hardware status flags.
//!
//! The clock tree is brought up by writing a register, then spinning on
//! a ready or sync-busy flag before the next dependent write. By default
//! those spins are unbounded, so a flag that never asserts hangs the
//! caller forever. A [PollLimit::Spins] bound turns that hang into an
//! [Error::Timeout] instead.

/// How long to wait for a status flag.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollLimit {
    /// Spin until the flag asserts, however long that takes.
    #[default]
    Forever,
    /// Give up after this many unsuccessful reads.
    Spins(u32),
}

/// The status flags this crate waits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Flag {
    /// SYSCTRL.PCLKSR.XOSC32KRDY, the 32kHz crystal is stable.
    Xosc32kReady,
    /// SYSCTRL.PCLKSR.DFLLRDY, the DFLL accepts register access.
    DfllReady,
    /// GCLK.STATUS.SYNCBUSY cleared.
    GclkSync,
    /// TC4.STATUS.SYNCBUSY cleared.
    TcSync,
}

/// A clock or timer setup error.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A status flag did not assert within the [PollLimit].
    Timeout(Flag),
}

impl core::fmt::Display for Error {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Self::Timeout(flag) => write!(f, "Timed out waiting for {:?}", flag),
        }
    }
}

/// Spin until `ready` returns true, or the limit runs out.
#[inline]
pub fn wait_until(limit: PollLimit, flag: Flag, mut ready: impl FnMut() -> bool) -> Result<(), Error> {
    match limit {
        PollLimit::Forever => {
            while !ready() {
                core::hint::spin_loop();
            }
            Ok(())
        }
        PollLimit::Spins(spins) => {
            for _ in 0..spins {
                if ready() {
                    return Ok(());
                }
                core::hint::spin_loop();
            }

            // one last look, so Spins(0) still checks once
            if ready() {
                Ok(())
            } else {
                warn!("gave up waiting for {}", flag);
                Err(Error::Timeout(flag))
            }
        }
    }
}
