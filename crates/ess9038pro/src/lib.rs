//! ESS Sabre ES9038PRO DAC control driver
//!
//! Register-level control of the ES9038PRO over I²C, exposed to a host
//! audio stack as a codec component with one stereo playback DAI and four
//! mixer controls.
//!
//! The audio samples themselves arrive over I²S/DSD from the host's serial
//! audio peripheral; that path does not go through this driver.
//!
//! # Modules
//!
//! - [`registers`]: register addresses and field constants
//! - [`access`]: per-register access modes
//! - [`controls`]: volume, FIR/IIR filter and input-select controls
//! - [`input_select`]: channel-map packing for input routing
//! - [`dai`]: DAI descriptor and stream hooks
//! - [`driver`]: [`Ess9038pro`] instance, probe and remove
//! - [`status`]: chip ID, DPLL and input status readback
//! - [`config`]: identity strings, addresses, register map layout
//!
//! # Example
//!
//! ```
//! use ess9038pro::{Control, Ess9038pro};
//! use platform::mocks::{FakeGpio, FakeRegisterFile, RecordingHost};
//! use platform::{ControlValue, DaiOps};
//!
//! let chip = FakeRegisterFile::new(0x48);
//! let mut gpio = FakeGpio::empty();
//! let mut host = RecordingHost::new();
//!
//! let mut dac = Ess9038pro::probe(chip, &mut gpio, &mut host).unwrap();
//! dac.startup().unwrap();
//! dac.control_put(Control::Volume, ControlValue::Integer(80)).unwrap();
//! assert_eq!(dac.control_get(Control::Volume).unwrap(), ControlValue::Integer(80));
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::doc_markdown)] // register names in doc comments
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod access;
pub mod config;
pub mod controls;
pub mod dai;
pub mod driver;
pub mod input_select;
pub mod registers;
pub mod status;

pub use access::{AccessMode, Ess9038proAccess};
pub use controls::{Control, CONTROLS};
pub use dai::DAI_DRIVER;
pub use driver::{Ess9038pro, ProbeError, ProbeFailure, COMPONENT_DRIVER};
pub use registers::Register;
pub use status::{ChipStatus, DpllRatio};
