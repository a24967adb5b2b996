//! User-visible control descriptors and generic register-field helpers
//!
//! Most codec controls are a single bit-field in a single register. Two
//! helpers cover them:
//!
//! - [`RangeField`]: integer in `0..=max-min`, optionally inverted
//!   (attenuation registers where 0 is loudest)
//! - [`EnumField`]: index into a text table, stored in
//!   `ceil(log2(items))` bits
//!
//! Both run read-modify-write through [`RegisterIo::update_bits`], so bits
//! outside the field are never disturbed. Controls that do not fit either
//! shape are tagged [`ControlKind::EnumExt`] and handled by the driver.

use thiserror::Error;

use crate::regmap::{RegisterIo, RegmapError};

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Gain value reported for the muted step of a [`DbScale`] with `mute` set.
pub const DB_GAIN_MUTE: i32 = -9_999_999;

/// Linear dB scale in 0.01 dB units: `db = min + step * value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DbScale {
    /// Gain of control value 0, in 0.01 dB.
    pub min: i32,
    /// Gain increment per control step, in 0.01 dB.
    pub step: i32,
    /// Control value 0 means mute rather than `min`.
    pub mute: bool,
}

impl DbScale {
    /// Build a scale.
    pub const fn new(min: i32, step: i32, mute: bool) -> Self {
        Self { min, step, mute }
    }

    /// Gain in 0.01 dB of control value `value`.
    pub fn to_centi_db(&self, value: i32) -> i32 {
        if self.mute && value == 0 {
            return DB_GAIN_MUTE;
        }
        self.min.saturating_add(self.step.saturating_mul(value))
    }
}

/// Shape and range of a control, as reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlInfo {
    /// Integer control.
    Integer {
        /// Smallest value.
        min: i32,
        /// Largest value.
        max: i32,
        /// Value increment.
        step: i32,
        /// Number of values (channels) in the control.
        count: u32,
    },
    /// Enumerated control.
    Enumerated {
        /// Item labels; the value is an index into this table.
        items: &'static [&'static str],
    },
}

/// A control value as exchanged with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlValue {
    /// Value of an integer control.
    Integer(i32),
    /// Item index of an enumerated control.
    Enumerated(u32),
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Control get/put error, generic over the bus error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlError<E> {
    /// Register access failed.
    #[error("register access failed: {0}")]
    Register(RegmapError<E>),
    /// Integer value outside the declared range.
    #[error("value {value} outside {min}..={max}")]
    OutOfRange {
        /// Rejected value.
        value: i32,
        /// Inclusive minimum.
        min: i32,
        /// Inclusive maximum.
        max: i32,
    },
    /// Enumerated index past the end of the item table.
    #[error("item {item} not below item count {items}")]
    InvalidItem {
        /// Rejected index.
        item: u32,
        /// Number of items.
        items: u32,
    },
    /// Integer value given to an enumerated control or vice versa.
    #[error("value type does not match control type")]
    TypeMismatch,
}

impl<E> From<RegmapError<E>> for ControlError<E> {
    fn from(err: RegmapError<E>) -> Self {
        Self::Register(err)
    }
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

/// Integer control over one register field.
///
/// The field is `bit_length(max)` bits wide at `shift`. With `invert`,
/// the register holds `max - value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeField {
    /// Register address.
    pub reg: u8,
    /// Bit offset of the field.
    pub shift: u8,
    /// Register value of control value 0.
    pub min: u8,
    /// Largest register value.
    pub max: u8,
    /// Register holds `max - value` instead of `value`.
    pub invert: bool,
}

impl RangeField {
    /// Field mask before shifting: all ones up to the top bit of `max`.
    pub const fn mask(&self) -> u8 {
        match u8::MAX.checked_shr(self.max.leading_zeros()) {
            Some(mask) => mask,
            None => 0,
        }
    }

    /// Largest control value (`max - min`).
    pub const fn range(&self) -> u8 {
        self.max.saturating_sub(self.min)
    }

    /// Host-facing range description.
    pub const fn info(&self) -> ControlInfo {
        ControlInfo::Integer {
            min: 0,
            max: self.range() as i32,
            step: 1,
            count: 1,
        }
    }

    /// Current control value.
    pub fn get<R: RegisterIo>(&self, io: &mut R) -> Result<i32, ControlError<R::Error>> {
        let raw = shr(io.read(self.reg)?, self.shift) & self.mask();
        let value = if self.invert {
            self.max.saturating_sub(raw)
        } else {
            raw
        };
        Ok(i32::from(value.saturating_sub(self.min)))
    }

    /// Set the control to `value`.
    ///
    /// # Errors
    ///
    /// [`ControlError::OutOfRange`] if `value` is outside `0..=max-min`;
    /// register errors otherwise.
    pub fn put<R: RegisterIo>(&self, io: &mut R, value: i32) -> Result<(), ControlError<R::Error>> {
        let range = self.range();
        let Some(value) = u8::try_from(value).ok().filter(|v| *v <= range) else {
            return Err(ControlError::OutOfRange {
                value,
                min: 0,
                max: i32::from(range),
            });
        };

        let mask = self.mask();
        let mut raw = value.saturating_add(self.min) & mask;
        if self.invert {
            raw = self.max.saturating_sub(raw);
        }
        io.update_bits(self.reg, shl(mask, self.shift), shl(raw, self.shift))?;
        Ok(())
    }
}

/// Enumerated control over one register field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumField {
    /// Register address.
    pub reg: u8,
    /// Bit offset of the field.
    pub shift: u8,
    /// Item labels.
    pub items: &'static [&'static str],
}

impl EnumField {
    /// Field mask before shifting: item count rounded up to a power of
    /// two, minus one.
    #[allow(clippy::cast_possible_truncation)] // item tables are far below 256 entries
    pub const fn mask(&self) -> u8 {
        (self.items.len().next_power_of_two() as u8).wrapping_sub(1)
    }

    /// Number of items.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn item_count(&self) -> u32 {
        self.items.len() as u32
    }

    /// Label of `item`.
    pub fn text(&self, item: u32) -> Option<&'static str> {
        usize::try_from(item)
            .ok()
            .and_then(|i| self.items.get(i))
            .copied()
    }

    /// Host-facing item table.
    pub const fn info(&self) -> ControlInfo {
        ControlInfo::Enumerated { items: self.items }
    }

    /// Current item index, as stored in the field.
    pub fn get<R: RegisterIo>(&self, io: &mut R) -> Result<u32, ControlError<R::Error>> {
        let raw = shr(io.read(self.reg)?, self.shift) & self.mask();
        Ok(u32::from(raw))
    }

    /// Select `item`.
    ///
    /// # Errors
    ///
    /// [`ControlError::InvalidItem`] if `item` is not below the item count;
    /// register errors otherwise.
    pub fn put<R: RegisterIo>(&self, io: &mut R, item: u32) -> Result<(), ControlError<R::Error>> {
        let items = self.item_count();
        let Some(raw) = u8::try_from(item).ok().filter(|_| item < items) else {
            return Err(ControlError::InvalidItem { item, items });
        };
        let mask = self.mask();
        io.update_bits(self.reg, shl(mask, self.shift), shl(raw, self.shift))?;
        Ok(())
    }
}

// Bits shifted past bit 7 are dropped; descriptors keep `shift < 8`.
fn shl(value: u8, shift: u8) -> u8 {
    value.checked_shl(u32::from(shift)).unwrap_or(0)
}

fn shr(value: u8, shift: u8) -> u8 {
    value.checked_shr(u32::from(shift)).unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Descriptors
// ---------------------------------------------------------------------------

/// How a control's value maps onto registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Integer field with a dB scale.
    Range {
        /// Register field.
        field: RangeField,
        /// dB metadata.
        tlv: DbScale,
    },
    /// Enumerated field handled by [`EnumField`].
    Enum(EnumField),
    /// Enumerated control whose get/put the driver implements itself; the
    /// field only supplies the item table and the anchor register.
    EnumExt(EnumField),
}

/// A named control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlDescriptor {
    /// Control name.
    pub name: &'static str,
    /// Value mapping.
    pub kind: ControlKind,
}

impl ControlDescriptor {
    /// Host-facing shape and range.
    pub const fn info(&self) -> ControlInfo {
        match self.kind {
            ControlKind::Range { field, .. } => field.info(),
            ControlKind::Enum(field) | ControlKind::EnumExt(field) => field.info(),
        }
    }

    /// dB scale, for range controls.
    pub const fn tlv(&self) -> Option<DbScale> {
        match self.kind {
            ControlKind::Range { tlv, .. } => Some(tlv),
            ControlKind::Enum(_) | ControlKind::EnumExt(_) => None,
        }
    }
}
