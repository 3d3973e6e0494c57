#![no_std]

//! Bare-metal clock tree, GPIO and delay timer setup for the SAMD21G18A.
//!
//! Register access goes through the [bus::Bus] trait, implemented by
//! [bus::Mmio] on the chip itself and by [sim::Sim] on a host.

#[cfg(any(test, feature = "sim"))]
extern crate std;

// must come first, the macros are used by everything below
mod fmt;

pub mod bus;
pub mod gpio;
pub mod poll;
pub mod power;
pub mod prelude;
pub mod registers;
pub mod time;
pub mod timer;

#[cfg(any(test, feature = "sim"))]
pub mod sim;
