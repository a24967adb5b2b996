//! Input routing over the channel-map registers
//!
//! The ES9038PRO has eight DAC channels fed from four channel-map
//! registers, one per output pair. Each register holds two 4-bit source
//! indices: the low nibble feeds the odd output, the high nibble the even
//! one. Selecting input `n` points every pair at sources `2n` and `2n + 1`.
//!
//! Reading the selection only looks at the first pair. If something else
//! wrote the other three registers directly, the reported selection can
//! disagree with what they route.

use platform::control::{ControlError, EnumField};
use platform::regmap::RegisterIo;

use crate::registers::{Register, CHANNEL_MAP_LOW_NIBBLE};

/// Selectable inputs, in item order.
pub const INPUT_TEXTS: [&str; 4] = [
    "Input1 - USB",
    "Input2 - Optical",
    "Input3 - SPDIF",
    "Input4 - Bluetooth",
];

/// Number of selectable inputs.
#[allow(clippy::cast_possible_truncation)]
pub const INPUT_COUNT: u32 = INPUT_TEXTS.len() as u32;

/// Channel-map registers, written in this order.
pub const CHANNEL_MAP_REGS: [Register; 4] = [
    Register::ChannelMap12,
    Register::ChannelMap34,
    Register::ChannelMap56,
    Register::ChannelMap78,
];

/// Item table and anchor register for control enumeration.
pub const FIELD: EnumField = EnumField {
    reg: Register::ChannelMap12.addr(),
    shift: 0,
    items: &INPUT_TEXTS,
};

/// Channel-map byte routing input `sel` to an output pair.
///
/// `((2·sel + 1) << 4) | 2·sel`. Only the low two bits of `sel` are used.
pub const fn pack(sel: u8) -> u8 {
    let even = (sel & 0x03).wrapping_shl(1);
    (even | 1).wrapping_shl(4) | even
}

/// Input selected by a channel-map byte: `(byte & 0x0F) / 2`.
pub const fn unpack(byte: u8) -> u8 {
    (byte & CHANNEL_MAP_LOW_NIBBLE).wrapping_shr(1)
}

/// Route input `sel` to all four output pairs.
///
/// Registers are written in pair order. The first failure is returned as
/// is; pairs already written keep the new routing.
///
/// # Errors
///
/// [`ControlError::InvalidItem`] if `sel` is not below [`INPUT_COUNT`]
/// (nothing is written); register errors otherwise.
pub fn apply<R: RegisterIo>(io: &mut R, sel: u32) -> Result<(), ControlError<R::Error>> {
    let Some(sel) = u8::try_from(sel).ok().filter(|_| sel < INPUT_COUNT) else {
        return Err(ControlError::InvalidItem {
            item: sel,
            items: INPUT_COUNT,
        });
    };

    let bits = pack(sel);
    for reg in CHANNEL_MAP_REGS {
        io.update_bits(reg.addr(), 0xFF, bits)?;
    }

    #[cfg(feature = "defmt")]
    defmt::debug!(
        "ESS9038PRO: input select {=u8}, channel map {=u8:#04x}",
        sel,
        bits
    );
    Ok(())
}

/// Input currently routed to the first output pair.
pub fn current<R: RegisterIo>(io: &mut R) -> Result<u32, ControlError<R::Error>> {
    let byte = io.read(Register::ChannelMap12.addr())?;
    Ok(u32::from(unpack(byte)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn pack_places_even_source_low_and_odd_source_high() {
        assert_eq!(pack(0), 0x10);
        assert_eq!(pack(1), 0x32);
        assert_eq!(pack(2), 0x54);
        assert_eq!(pack(3), 0x76);
    }

    #[test]
    fn unpack_inverts_pack() {
        for sel in 0..4 {
            assert_eq!(unpack(pack(sel)), sel);
        }
    }

    #[test]
    fn unpack_ignores_high_nibble() {
        assert_eq!(unpack(0xF4), 2);
        assert_eq!(unpack(0x05), 2);
    }

    #[test]
    fn field_mask_covers_four_items() {
        assert_eq!(FIELD.mask(), 0b11);
        assert_eq!(FIELD.text(3), Some("Input4 - Bluetooth"));
        assert_eq!(FIELD.text(4), None);
    }
}
