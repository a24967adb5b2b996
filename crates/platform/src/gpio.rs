//! Optional GPIO line lookup
//!
//! Drivers ask the board for auxiliary lines (reset, enable) by consumer
//! name. A board that does not wire a line answers `Ok(None)`; only a
//! failing lookup is an error.

use embedded_hal::digital::{ErrorType, OutputPin, PinState};

/// Source of named output lines.
pub trait GpioProvider {
    /// Output line type handed out.
    type Pin: OutputPin;
    /// Lookup error.
    type Error: core::fmt::Debug;

    /// Look up the optional line `name`, driven to `initial` on acquisition.
    fn get_optional(
        &mut self,
        name: &str,
        initial: PinState,
    ) -> Result<Option<Self::Pin>, Self::Error>;
}

/// Placeholder line type for boards with no auxiliary lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Provider for boards that wire no optional lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGpio;

impl GpioProvider for NoGpio {
    type Pin = NoPin;
    type Error = core::convert::Infallible;

    fn get_optional(
        &mut self,
        _name: &str,
        _initial: PinState,
    ) -> Result<Option<Self::Pin>, Self::Error> {
        Ok(None)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn no_gpio_never_has_a_line() {
        let mut gpio = NoGpio;
        let line = gpio.get_optional("reset-gpio", PinState::Low).unwrap();
        assert!(line.is_none());
    }

    #[test]
    fn no_pin_accepts_any_level() {
        let mut pin = NoPin;
        assert!(pin.set_state(PinState::High).is_ok());
        assert!(pin.set_low().is_ok());
    }
}
