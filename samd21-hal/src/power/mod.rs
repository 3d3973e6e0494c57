//! Interfaces for power and clock control.

use crate::bus::Bus;

pub use crate::poll::{Error, Flag, PollLimit};

pub mod calibration;

mod clocks;
pub use clocks::*;

mod dfll;

mod gclk;
pub use gclk::*;

mod gate;
pub use gate::*;

/// Create a clock and power configurator on top of a register bus.
pub fn new<B: Bus>(bus: B) -> Power<B> {
    Power {
        clocks: ClockConfig::new(bus.clone()),
        gates: Gates::new(bus),
    }
}

/// Peripherals that control power and the clock.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Power<B: Bus> {
    /// The clock tree, not yet configured.
    pub clocks: ClockConfig<B>,
    pub gates: Gates<B>,
}
