//! ES9038PRO driver instance, probe and remove
//!
//! Probe order matters: the register map is built first (no bus traffic),
//! then the optional reset line is acquired low and released high, and
//! only then is the component registered with the host. A failure at any
//! step returns before registration, so the host never sees a
//! half-initialised codec, and hands the bus back in a [`ProbeFailure`].
//!
//! # I²C Address
//!
//! | ADDR pin | Address |
//! |----------|---------|
//! | GND      | `0x48`  |
//! | VDD      | `0x49`  |

use core::fmt;

use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal::i2c::I2c;
use platform::audio::{DaiDriver, DaiFormat};
use platform::audio_types::I2cAddr;
use platform::component::{ComponentDriver, ComponentHost};
use platform::control::{ControlError, ControlInfo, ControlValue};
use platform::gpio::GpioProvider;
use platform::regmap::{Regmap, RegmapConfig};
use thiserror::Error;

use crate::access::Ess9038proAccess;
use crate::config::{DEFAULT_I2C_ADDR, I2C_DEVICE_ID, REGMAP_CONFIG, RESET_GPIO};
use crate::controls::{self, Control, CONTROLS};
use crate::dai::DAI_DRIVER;

/// Component registered with the host: the four mixer controls.
pub static COMPONENT_DRIVER: ComponentDriver = ComponentDriver {
    name: I2C_DEVICE_ID,
    controls: &CONTROLS,
};

/// Probe failure.
///
/// Generic over the GPIO provider (`GE`), reset line (`PE`) and host (`HE`)
/// error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProbeError<GE, PE, HE> {
    /// Register map configuration was refused.
    #[error("unsupported register map configuration")]
    InvalidConfig,
    /// Reset line lookup failed.
    #[error("reset line lookup failed: {0:?}")]
    Gpio(GE),
    /// Reset line could not be released.
    #[error("reset line release failed: {0:?}")]
    Reset(PE),
    /// Host refused the component.
    #[error("component registration failed: {0:?}")]
    Register(HE),
}

/// Failed probe: the cause, plus the bus handed back for a retry.
pub struct ProbeFailure<I, E> {
    /// Why the probe failed.
    pub error: E,
    /// The bus passed to the probe, unused.
    pub bus: I,
}

impl<I, E: fmt::Debug> fmt::Debug for ProbeFailure<I, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeFailure")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<I, E: fmt::Display> fmt::Display for ProbeFailure<I, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl<I, E: core::error::Error> core::error::Error for ProbeFailure<I, E> {}

/// Result of [`Ess9038pro::probe`].
pub type ProbeResult<I, G, P, H> = Result<
    Ess9038pro<I, P>,
    ProbeFailure<
        I,
        ProbeError<
            <G as GpioProvider>::Error,
            <P as embedded_hal::digital::ErrorType>::Error,
            <H as ComponentHost>::Error,
        >,
    >,
>;

/// ES9038PRO codec driver.
///
/// Owns the register map, the optional reset line and the last DAI format
/// the host set.
pub struct Ess9038pro<I, P> {
    pub(crate) regmap: Regmap<I, Ess9038proAccess>,
    reset: Option<P>,
    pub(crate) format: Option<DaiFormat>,
}

impl<I: I2c, P: OutputPin> Ess9038pro<I, P> {
    /// Probe the chip at the default address.
    ///
    /// See [`probe_at`](Self::probe_at).
    pub fn probe<G, H>(i2c: I, gpio: &mut G, host: &mut H) -> ProbeResult<I, G, P, H>
    where
        G: GpioProvider<Pin = P>,
        H: ComponentHost,
    {
        Self::probe_at(i2c, DEFAULT_I2C_ADDR, gpio, host)
    }

    /// Probe the chip at `address`.
    ///
    /// 1. build the register map (no bus traffic)
    /// 2. acquire the optional `reset-gpio` line, driven low
    /// 3. release reset (drive high)
    /// 4. register [`COMPONENT_DRIVER`] and [`DAI_DRIVER`] with `host`
    ///
    /// A board without a reset line is fine. The chip ID is not checked.
    /// On failure nothing is registered and the bus comes back in
    /// [`ProbeFailure::bus`].
    pub fn probe_at<G, H>(
        i2c: I,
        address: I2cAddr,
        gpio: &mut G,
        host: &mut H,
    ) -> ProbeResult<I, G, P, H>
    where
        G: GpioProvider<Pin = P>,
        H: ComponentHost,
    {
        Self::probe_with(i2c, address, REGMAP_CONFIG, gpio, host)
    }

    pub(crate) fn probe_with<G, H>(
        i2c: I,
        address: I2cAddr,
        config: RegmapConfig,
        gpio: &mut G,
        host: &mut H,
    ) -> ProbeResult<I, G, P, H>
    where
        G: GpioProvider<Pin = P>,
        H: ComponentHost,
    {
        #[cfg(feature = "defmt")]
        defmt::info!("ESS9038PRO: probing at {=u8:#04x}", address.get());

        let regmap = match Regmap::new(i2c, address.get(), config, Ess9038proAccess) {
            Ok(regmap) => regmap,
            Err(err) => {
                return Err(ProbeFailure {
                    error: ProbeError::InvalidConfig,
                    bus: err.into_bus(),
                });
            }
        };

        match Self::acquire(gpio, host) {
            Ok(reset) => Ok(Self {
                regmap,
                reset,
                format: None,
            }),
            Err(error) => Err(ProbeFailure {
                error,
                bus: regmap.release(),
            }),
        }
    }

    fn acquire<G, H>(
        gpio: &mut G,
        host: &mut H,
    ) -> Result<Option<P>, ProbeError<G::Error, P::Error, H::Error>>
    where
        G: GpioProvider<Pin = P>,
        H: ComponentHost,
    {
        let mut reset = gpio
            .get_optional(RESET_GPIO, PinState::Low)
            .map_err(ProbeError::Gpio)?;

        if let Some(pin) = reset.as_mut() {
            pin.set_high().map_err(ProbeError::Reset)?;
            #[cfg(feature = "defmt")]
            defmt::debug!("ESS9038PRO: reset released");
        }

        // TODO: read CHIP_ID_STATUS (64) bits [7:2] and refuse unknown parts.

        host.register_component(&COMPONENT_DRIVER, core::slice::from_ref(&DAI_DRIVER))
            .map_err(ProbeError::Register)?;

        #[cfg(feature = "defmt")]
        defmt::info!("ESS9038PRO: registered");

        Ok(reset)
    }

    /// Unregister from `host` and hand back the bus and reset line.
    ///
    /// Registers are left as they are.
    pub fn remove<H: ComponentHost>(self, host: &mut H) -> (I, Option<P>) {
        host.unregister_component(&COMPONENT_DRIVER);

        #[cfg(feature = "defmt")]
        defmt::info!("ESS9038PRO: removed");

        (self.regmap.release(), self.reset)
    }

    /// DAI format last set by the host, `None` until `set_fmt`.
    pub fn format(&self) -> Option<DaiFormat> {
        self.format
    }

    /// `true` if a reset line was wired at probe.
    pub fn has_reset_line(&self) -> bool {
        self.reset.is_some()
    }

    /// Register map, for diagnostics.
    pub fn regmap(&self) -> &Regmap<I, Ess9038proAccess> {
        &self.regmap
    }

    /// DAI descriptor registered at probe.
    #[allow(clippy::unused_self)]
    pub fn dai_driver(&self) -> &'static DaiDriver {
        &DAI_DRIVER
    }

    // -----------------------------------------------------------------------
    // Controls
    // -----------------------------------------------------------------------

    /// Shape and range of `control`.
    #[allow(clippy::unused_self)]
    pub fn control_info(&self, control: Control) -> ControlInfo {
        control.info()
    }

    /// Current value of `control`.
    pub fn control_get(
        &mut self,
        control: Control,
    ) -> Result<ControlValue, ControlError<I::Error>> {
        controls::get(&mut self.regmap, control)
    }

    /// Set `control` to `value`.
    pub fn control_put(
        &mut self,
        control: Control,
        value: ControlValue,
    ) -> Result<(), ControlError<I::Error>> {
        controls::put(&mut self.regmap, control, value)
    }

    /// Volume, 0 (most attenuation) to 100 (0 dB).
    pub fn volume(&mut self) -> Result<i32, ControlError<I::Error>> {
        controls::VOLUME_FIELD.get(&mut self.regmap)
    }

    /// Set the volume, 0 to 100.
    pub fn set_volume(&mut self, volume: i32) -> Result<(), ControlError<I::Error>> {
        controls::VOLUME_FIELD.put(&mut self.regmap, volume)
    }

    /// Route input `sel` (0–3) to every output pair.
    pub fn select_input(&mut self, sel: u32) -> Result<(), ControlError<I::Error>> {
        crate::input_select::apply(&mut self.regmap, sel)
    }

    /// Input routed to the first output pair.
    pub fn selected_input(&mut self) -> Result<u32, ControlError<I::Error>> {
        crate::input_select::current(&mut self.regmap)
    }
}
