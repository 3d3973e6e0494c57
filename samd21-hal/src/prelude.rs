//! Traits and extensions, meant to be glob imported.

pub use crate::bus::Bus as _samd21_hal_bus_Bus;
pub use crate::timer::MicrosDelay as _samd21_hal_timer_MicrosDelay;

pub use crate::time::DurationExtU32 as _samd21_hal_time_DurationExtU32;
pub use crate::time::RateExtU32 as _samd21_hal_time_RateExtU32;
