#![no_std]
#![no_main]

use blinky::App;
use samd21_hal as hal;
use {defmt_rtt as _, panic_halt as _};

// nothing left to do but wait for a debugger or a reset
fn park() -> ! {
    loop {
        cortex_m::asm::wfi();
    }
}

#[cortex_m_rt::entry]
fn main() -> ! {
    // only fails if something took the registers before us
    let Some(bus) = hal::bus::Mmio::take() else {
        defmt::error!("registers already taken");
        park();
    };

    match App::init(bus) {
        Ok(mut app) => app.run(),
        Err(e) => {
            defmt::error!("init failed: {}", e);
            park();
        }
    }
}
