//! Host-side codec abstractions for register-mapped audio chips
//!
//! This crate is the layer a codec driver plugs into: it owns the generic
//! pieces that are identical for every I²C-controlled DAC, so that a chip
//! driver only has to contribute its register table, access policy and
//! control descriptors.
//!
//! # Architecture Layers
//!
//! ```text
//! Host audio stack (stream lifecycle, control surface)
//!         ↓
//! Codec driver (e.g. `ess9038pro` crate)
//!         ↓
//! Platform (this crate: regmap, control helpers, descriptors)
//!         ↓
//! embedded-hal I²C / GPIO implementations
//! ```
//!
//! # Building Blocks
//!
//! - [`regmap::Regmap`]: cached register map over `embedded_hal::i2c::I2c`
//!   with per-register access predicates
//! - [`control`]: single-range and single-field enum control helpers,
//!   dB scale metadata
//! - [`audio`]: DAI descriptors, negotiated hardware parameters and the
//!   [`DaiOps`] stream-operation trait
//! - [`component`]: component descriptors and the [`ComponentHost`]
//!   registration seam
//! - [`gpio`]: optional output line lookup ([`GpioProvider`])
//! - [`audio_types`]: validated newtypes (sample rate, I²C address)
//!
//! # Features
//!
//! - `std`: expose [`mocks`] to downstream tests
//! - `defmt`: enable `defmt::Format` derives on public value types
//!
//! # Example
//!
//! ```
//! use platform::regmap::{CacheType, RegmapConfig};
//!
//! const CONFIG: RegmapConfig = RegmapConfig::new(8, 8)
//!     .with_max_register(0x73)
//!     .with_cache_type(CacheType::Sparse);
//! assert_eq!(CONFIG.max_register, 0x73);
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer defmt over println! in lib code
// Pedantic lints suppressed for this HAL crate:
#![allow(clippy::doc_markdown)] // hex addresses and register names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors, callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod audio;
pub mod audio_types;
pub mod component;
pub mod control;
pub mod gpio;
pub mod mocks;
pub mod regmap;

// Re-export the traits a codec driver implements or consumes
pub use audio::{DaiDriver, DaiFormat, DaiOps, HwParams, PcmFormat, PcmFormats, PcmStream};
pub use component::{ComponentDriver, ComponentHost, DeviceIds};
pub use control::{
    ControlDescriptor, ControlError, ControlInfo, ControlKind, ControlValue, DbScale, EnumField,
    RangeField,
};
pub use gpio::GpioProvider;
pub use regmap::{
    CacheType, InvalidConfig, RegisterAccess, RegisterIo, Regmap, RegmapConfig, RegmapError,
};
