//! Generic types and units for working with time.
//!
//! This is a re-export of parts of the [fugit] crate.

pub use fugit::HertzU32 as Hertz;
pub use fugit::KilohertzU32 as Kilohertz;
pub use fugit::MegahertzU32 as Megahertz;
pub use fugit::MicrosDurationU32 as MicrosDuration;
pub use fugit::MillisDurationU32 as MillisDuration;
pub use fugit::NanosDurationU32 as NanosDuration;

pub use fugit::ExtU32 as DurationExtU32;
pub use fugit::RateExtU32;
