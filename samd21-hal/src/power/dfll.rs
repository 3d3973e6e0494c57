use crate::bus::Bus;
use crate::poll::{self, Error, Flag, PollLimit};
use crate::registers::sysctrl::{DfllCtrl, DfllMul, DfllVal, Pclksr};

use super::calibration;

/// Closed loop coefficients for the DFLL48M.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) struct Multiplier {
    /// Output frequency over reference frequency.
    pub mul: u16,
    /// Largest fine step taken while locking.
    pub fstep: u16,
    /// Largest coarse step taken while locking.
    pub cstep: u8,
}

/// 48MHz out of a 32.768kHz reference, with half the maximum step sizes.
pub(crate) const FROM_XOSC32K: Multiplier = Multiplier {
    mul: 1465,
    fstep: 511,
    cstep: 31,
};

/// Enable the DFLL48M, load its factory coarse calibration, and switch
/// it into closed loop mode.
///
/// The reference channel must already be running. The output stays
/// gated until the loop locks (WAITLOCK), so this returns without
/// waiting for lock.
pub(crate) fn enable_closed_loop<B: Bus>(
    bus: &B,
    multiplier: &Multiplier,
    limit: PollLimit,
) -> Result<(), Error> {
    // DFLL registers may only be touched while DFLLRDY is set
    let ready = || bus.read::<Pclksr>().dfllrdy();

    poll::wait_until(limit, Flag::DfllReady, ready)?;

    // a plain write also clears ONDEMAND, which must be off while the
    // DFLL is being configured
    bus.write(DfllCtrl::new().with_enable(true));
    poll::wait_until(limit, Flag::DfllReady, ready)?;

    bus.write(
        DfllMul::new()
            .with_cstep(multiplier.cstep)
            .with_fstep(multiplier.fstep)
            .with_mul(multiplier.mul),
    );
    poll::wait_until(limit, Flag::DfllReady, ready)?;

    let coarse = calibration::read_dfll48m_coarse(bus);
    debug!("dfll48m: coarse calibration {}", coarse);
    bus.modify(|r: DfllVal| r.with_coarse(coarse));
    poll::wait_until(limit, Flag::DfllReady, ready)?;

    bus.modify(|r: DfllCtrl| r.with_mode(true).with_waitlock(true));

    Ok(())
}
