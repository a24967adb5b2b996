//! Mock implementations for testing
//!
//! Fakes for the collaborators a codec driver talks to: an emulated chip
//! register file on the I²C bus, an output line, a GPIO provider and a
//! component host. All state is inspectable for test assertions.

#![cfg(any(test, feature = "std"))]
#![allow(clippy::missing_panics_doc)]

use embedded_hal::digital::{self, OutputPin, PinState};
use embedded_hal::i2c::{self, ErrorKind, NoAcknowledgeSource, Operation};

use crate::audio::DaiDriver;
use crate::component::{ComponentDriver, ComponentHost};
use crate::gpio::GpioProvider;

// ---------------------------------------------------------------------------
// FakeRegisterFile
// ---------------------------------------------------------------------------

/// Emulated I²C register file with 256 byte-wide registers.
///
/// Understands the single-byte register protocol used by
/// [`Regmap`](crate::regmap::Regmap): `[reg]` sets the register pointer,
/// `[reg, value]` writes, a one-byte read returns the pointed-at register.
/// Transactions to any other address are NACKed.
pub struct FakeRegisterFile {
    address: u8,
    regs: [u8; 256],
    writes: heapless::Vec<(u8, u8), 256>,
    reads: usize,
    writes_before_failure: Option<usize>,
}

impl FakeRegisterFile {
    /// Chip at 7-bit `address` with every register zeroed.
    pub fn new(address: u8) -> Self {
        Self {
            address,
            regs: [0; 256],
            writes: heapless::Vec::new(),
            reads: 0,
            writes_before_failure: None,
        }
    }

    /// Set a register as if the chip changed it (power-on default, status bit).
    pub fn set_register(&mut self, reg: u8, value: u8) {
        if let Some(slot) = self.regs.get_mut(usize::from(reg)) {
            *slot = value;
        }
    }

    /// Current register contents.
    pub fn register(&self, reg: u8) -> u8 {
        self.regs.get(usize::from(reg)).copied().unwrap_or_default()
    }

    /// Successful register writes, in bus order.
    pub fn writes(&self) -> &[(u8, u8)] {
        &self.writes
    }

    /// Number of register reads served.
    pub fn read_count(&self) -> usize {
        self.reads
    }

    /// Let `count` more writes succeed, then fail every write with
    /// [`ErrorKind::Bus`].
    pub fn fail_writes_after(&mut self, count: usize) {
        self.writes_before_failure = Some(count);
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), ErrorKind> {
        if let Some(remaining) = self.writes_before_failure.as_mut() {
            if *remaining == 0 {
                return Err(ErrorKind::Bus);
            }
            *remaining = remaining.saturating_sub(1);
        }
        self.set_register(reg, value);
        let _ = self.writes.push((reg, value));
        Ok(())
    }
}

impl i2c::ErrorType for FakeRegisterFile {
    type Error = ErrorKind;
}

impl i2c::I2c for FakeRegisterFile {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        let mut pointer: Option<u8> = None;
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => match *bytes {
                    [reg] => pointer = Some(*reg),
                    [reg, value] => {
                        self.write_register(*reg, *value)?;
                        pointer = Some(*reg);
                    }
                    _ => return Err(ErrorKind::Other),
                },
                Operation::Read(buf) => {
                    let reg = pointer.ok_or(ErrorKind::Other)?;
                    if buf.len() != 1 {
                        // Sequential reads are not part of the protocol.
                        return Err(ErrorKind::Other);
                    }
                    let value = self.register(reg);
                    buf.fill(value);
                    self.reads = self.reads.saturating_add(1);
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FakePin / FakeGpio
// ---------------------------------------------------------------------------

/// Output line that records every level it is driven to.
#[derive(Debug, Default)]
pub struct FakePin {
    history: heapless::Vec<PinState, 16>,
    fail_low: bool,
    fail_high: bool,
}

impl FakePin {
    /// Working line with empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Line whose every `set_*` call fails.
    pub fn broken() -> Self {
        Self {
            fail_low: true,
            fail_high: true,
            ..Self::default()
        }
    }

    /// Line that can be driven low but fails every attempt to drive it high.
    pub fn stuck_low() -> Self {
        Self {
            fail_high: true,
            ..Self::default()
        }
    }

    /// Levels driven so far, oldest first.
    pub fn history(&self) -> &[PinState] {
        &self.history
    }

    /// Last driven level.
    pub fn level(&self) -> Option<PinState> {
        self.history.last().copied()
    }

    fn drive(&mut self, state: PinState) -> Result<(), digital::ErrorKind> {
        let fail = match state {
            PinState::Low => self.fail_low,
            PinState::High => self.fail_high,
        };
        if fail {
            return Err(digital::ErrorKind::Other);
        }
        let _ = self.history.push(state);
        Ok(())
    }
}

impl digital::ErrorType for FakePin {
    type Error = digital::ErrorKind;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(PinState::Low)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(PinState::High)
    }
}

/// Error returned by [`FakeGpio`] when configured to fail lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupFailed;

/// GPIO provider holding at most one named line.
#[derive(Debug, Default)]
pub struct FakeGpio {
    line: Option<(&'static str, FakePin)>,
    fail: bool,
    requests: heapless::Vec<PinState, 4>,
}

impl FakeGpio {
    /// Provider with no lines wired.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Provider wiring `pin` under consumer name `name`.
    pub fn with_line(name: &'static str, pin: FakePin) -> Self {
        Self {
            line: Some((name, pin)),
            ..Self::default()
        }
    }

    /// Provider whose every lookup fails with [`LookupFailed`].
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Initial levels requested by successful lookups.
    pub fn requests(&self) -> &[PinState] {
        &self.requests
    }
}

impl GpioProvider for FakeGpio {
    type Pin = FakePin;
    type Error = LookupFailed;

    fn get_optional(
        &mut self,
        name: &str,
        initial: PinState,
    ) -> Result<Option<Self::Pin>, Self::Error> {
        if self.fail {
            return Err(LookupFailed);
        }
        let _ = self.requests.push(initial);
        match self.line.take() {
            Some((line_name, mut pin)) if line_name == name => {
                pin.set_state(initial).map_err(|_| LookupFailed)?;
                Ok(Some(pin))
            }
            other => {
                self.line = other;
                Ok(None)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// RecordingHost
// ---------------------------------------------------------------------------

/// Error returned by [`RecordingHost`] when configured to refuse registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationRefused;

/// Component host that records registrations.
#[derive(Debug, Default)]
pub struct RecordingHost {
    registered: Option<(&'static ComponentDriver, &'static [DaiDriver])>,
    refuse: bool,
    unregistered: usize,
}

impl RecordingHost {
    /// Host accepting every registration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Host refusing every registration with [`RegistrationRefused`].
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::default()
        }
    }

    /// Currently registered component, if any.
    pub fn component(&self) -> Option<&'static ComponentDriver> {
        self.registered.map(|(component, _)| component)
    }

    /// DAIs registered with the current component.
    pub fn dais(&self) -> &'static [DaiDriver] {
        match self.registered {
            Some((_, dais)) => dais,
            None => &[],
        }
    }

    /// Number of `unregister_component` calls.
    pub fn unregister_count(&self) -> usize {
        self.unregistered
    }
}

impl ComponentHost for RecordingHost {
    type Error = RegistrationRefused;

    fn register_component(
        &mut self,
        component: &'static ComponentDriver,
        dais: &'static [DaiDriver],
    ) -> Result<(), Self::Error> {
        if self.refuse {
            return Err(RegistrationRefused);
        }
        self.registered = Some((component, dais));
        Ok(())
    }

    fn unregister_component(&mut self, component: &'static ComponentDriver) {
        if self.component().is_some_and(|c| c.name == component.name) {
            self.registered = None;
        }
        self.unregistered = self.unregistered.saturating_add(1);
    }
}
