//! Interfaces for interacting with the PORT group 0 pins.

use crate::bus::Bus;

mod hal02;
mod hal1;

mod mode;
pub use mode::*;

mod pin;
pub(crate) use pin::set_function;
pub use pin::{Pin, PinState};

// one field per bonded pin, PA26 and PA29 do not exist on this package
macro_rules! pins_impl {
    {$(($name:ident, $n:literal)),+,} => {
        /// PORT group 0, split into pins.
        #[derive(Debug)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub struct Pins<B: Bus> {
            $(pub $name: Pin<B, $n, Disabled>),+
        }

        impl<B> Pins<B>
        where
            B: Bus,
        {
            #[inline(always)]
            fn new(bus: B) -> Self {
                Self {
                    $($name: Pin::new(bus.clone())),+
                }
            }
        }
    };
}

pins_impl! {
    (pa00, 0),
    (pa01, 1),
    (pa02, 2),
    (pa03, 3),
    (pa04, 4),
    (pa05, 5),
    (pa06, 6),
    (pa07, 7),
    (pa08, 8),
    (pa09, 9),
    (pa10, 10),
    (pa11, 11),
    (pa12, 12),
    (pa13, 13),
    (pa14, 14),
    (pa15, 15),
    (pa16, 16),
    (pa17, 17),
    (pa18, 18),
    (pa19, 19),
    (pa20, 20),
    (pa21, 21),
    (pa22, 22),
    (pa23, 23),
    (pa24, 24),
    (pa25, 25),
    (pa27, 27),
    (pa28, 28),
    (pa30, 30),
    (pa31, 31),
}

/// Split PORT group 0 into pins.
///
/// Every pin is assumed to be in its reset state. Calling this twice on
/// the same bus hands out two owners for each pin.
#[inline(always)]
pub fn new<B: Bus>(bus: B) -> Pins<B> {
    Pins::new(bus)
}
