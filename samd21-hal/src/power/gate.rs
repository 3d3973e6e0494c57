use crate::bus::Bus;
use crate::registers::pm::ApbCMask;

/// A control to power the bus interface of an individual device.
pub struct Gate<B, Dev> {
    bus: B,
    _marker: core::marker::PhantomData<Dev>,
}

// seal for Device trait
trait Sealed {}

/// A device with a bit in PM.APBCMASK.
#[allow(private_bounds)]
pub trait Device: Sealed {
    /// The name of the device, used in Debug instances.
    const NAME: &'static str;

    /// Set this device's bit in a mask.
    fn set_enabled(mask: ApbCMask, enabled: bool) -> ApbCMask;

    /// Read this device's bit from a mask.
    fn is_enabled(mask: ApbCMask) -> bool;
}

impl<B, Dev> core::fmt::Debug for Gate<B, Dev>
where
    B: Bus,
    Dev: Device,
{
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_tuple("Gate")
            .field(&Dev::NAME)
            .field(&self.is_enabled())
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl<B, Dev> defmt::Format for Gate<B, Dev>
where
    B: Bus,
    Dev: Device,
{
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Gate({=str}, {})", Dev::NAME, self.is_enabled());
    }
}

impl<B, Dev> Gate<B, Dev>
where
    B: Bus,
    Dev: Device,
{
    /// Only one gate for each device may exist, or they will disagree
    /// about its state.
    #[inline(always)]
    pub(crate) fn new(bus: B) -> Self {
        Self {
            bus,
            _marker: Default::default(),
        }
    }

    /// Set this device to be on or off.
    #[inline(always)]
    pub fn set_enabled(&mut self, enabled: bool) {
        trace!("gate: {=str} {}", Dev::NAME, enabled);
        self.bus.modify(|r: ApbCMask| Dev::set_enabled(r, enabled));
    }

    /// Set this device to be on.
    #[inline(always)]
    pub fn enable(&mut self) {
        self.set_enabled(true);
    }

    /// Set this device to be off.
    #[inline(always)]
    pub fn disable(&mut self) {
        self.set_enabled(false);
    }

    /// Is this device enabled?
    #[inline(always)]
    pub fn is_enabled(&self) -> bool {
        Dev::is_enabled(self.bus.read())
    }
}

macro_rules! dev_gate_impl {
    {$(($dev:ident, $name:ident, $with:ident)),+,} => {
        /// A collection of controls for powering individual devices.
        #[derive(Debug)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub struct Gates<B: Bus> {
            $(pub $name: Gate<B, $dev>),*
        }

        impl<B> Gates<B>
        where
            B: Bus,
        {
            #[inline(always)]
            pub(crate) fn new(bus: B) -> Self {
                Self {
                    $($name: Gate::new(bus.clone())),*
                }
            }
        }

        $(dev_gate_impl!(device $dev, $name, $with);)+
    };

    (device $dev:ident, $name:ident, $with:ident) => {
        #[doc = concat!("Marker for the ", stringify!($dev), " gate.")]
        #[derive(Debug)]
        pub enum $dev {}

        impl Sealed for $dev {}

        impl Device for $dev {
            const NAME: &'static str = stringify!($dev);

            #[inline(always)]
            fn set_enabled(mask: ApbCMask, enabled: bool) -> ApbCMask {
                mask.$with(enabled)
            }

            #[inline(always)]
            fn is_enabled(mask: ApbCMask) -> bool {
                mask.$name()
            }
        }
    };
}

dev_gate_impl! {
    (Tc3, tc3, with_tc3),
    (Tc4, tc4, with_tc4),
    (Tc5, tc5, with_tc5),
    (Tc6, tc6, with_tc6),
    (Tc7, tc7, with_tc7),
    (Adc, adc, with_adc),
}
