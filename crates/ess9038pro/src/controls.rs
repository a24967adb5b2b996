//! User-visible mixer controls
//!
//! Four controls, registered with the host in this order:
//!
//! | Control                   | Register / field                       |
//! |---------------------------|----------------------------------------|
//! | `Digital Playback Volume` | VOLUME_1, bits \[6:0\], inverted 0–100 |
//! | `FIR Filter Type`         | FILTER_AND_MUTE bits \[7:5\]           |
//! | `IIR Filter Type`         | FILTER_AND_MUTE bits \[2:1\]           |
//! | `Input Select`            | CHANNEL_MAP_1_2 … 7_8 (custom)         |
//!
//! The first three are plain register fields handled by
//! [`platform::control`]. Input select spans four registers and is routed
//! to [`crate::input_select`].

use platform::control::{
    ControlDescriptor, ControlError, ControlInfo, ControlKind, ControlValue, DbScale, EnumField,
    RangeField,
};
use platform::regmap::RegisterIo;

use crate::input_select;
use crate::registers::{Register, FIR_FILTER_SHIFT, IIR_FILTER_SHIFT, VOLUME_MAX_STEP};

/// FIR filter shapes, in register order.
pub const FIR_FILTER_TEXTS: [&str; 8] = [
    "fast roll-off, linear",
    "slow roll-off, linear",
    "fast roll-off, minimum",
    "slow roll-off, minimum",
    "apodizing fast roll-off, linear",
    "reserved",
    "hybrid fast roll-off, minimum",
    "brickwall",
];

/// IIR bandwidth presets, in register order.
pub const IIR_FILTER_TEXTS: [&str; 4] = [
    "1.0757fs 47.44K @ 44.1kHz",
    "1.1338fs 50K @ 44.1kHz",
    "1.3605fs 60K @ 44.1kHz",
    "1.5873fs 70K @ 44.1kHz",
];

/// Volume dB scale: −127.50 dB at step 0, 0.50 dB per step, step 0 mutes.
pub const VOLUME_TLV: DbScale = DbScale::new(-12_750, 50, true);

/// VOLUME_1 as an inverted 0–100 field.
pub const VOLUME_FIELD: RangeField = RangeField {
    reg: Register::Volume1.addr(),
    shift: 0,
    min: 0,
    max: VOLUME_MAX_STEP,
    invert: true,
};

/// FIR filter shape field.
pub const FIR_FILTER_FIELD: EnumField = EnumField {
    reg: Register::FilterAndMute.addr(),
    shift: FIR_FILTER_SHIFT,
    items: &FIR_FILTER_TEXTS,
};

/// IIR bandwidth field.
pub const IIR_FILTER_FIELD: EnumField = EnumField {
    reg: Register::FilterAndMute.addr(),
    shift: IIR_FILTER_SHIFT,
    items: &IIR_FILTER_TEXTS,
};

/// Control table, in registration order.
pub static CONTROLS: [ControlDescriptor; 4] = [
    ControlDescriptor {
        name: "Digital Playback Volume",
        kind: ControlKind::Range {
            field: VOLUME_FIELD,
            tlv: VOLUME_TLV,
        },
    },
    ControlDescriptor {
        name: "FIR Filter Type",
        kind: ControlKind::Enum(FIR_FILTER_FIELD),
    },
    ControlDescriptor {
        name: "IIR Filter Type",
        kind: ControlKind::Enum(IIR_FILTER_FIELD),
    },
    ControlDescriptor {
        name: "Input Select",
        kind: ControlKind::EnumExt(input_select::FIELD),
    },
];

/// Control handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Control {
    /// `Digital Playback Volume`
    Volume,
    /// `FIR Filter Type`
    FirFilter,
    /// `IIR Filter Type`
    IirFilter,
    /// `Input Select`
    InputSelect,
}

impl Control {
    /// Every control, in registration order.
    pub const ALL: [Control; 4] = [
        Control::Volume,
        Control::FirFilter,
        Control::IirFilter,
        Control::InputSelect,
    ];

    /// Static descriptor.
    pub fn descriptor(self) -> &'static ControlDescriptor {
        let [volume, fir, iir, input] = &CONTROLS;
        match self {
            Control::Volume => volume,
            Control::FirFilter => fir,
            Control::IirFilter => iir,
            Control::InputSelect => input,
        }
    }

    /// Control name as shown to the host.
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Look up a control by its host-visible name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Shape and range.
    pub fn info(self) -> ControlInfo {
        self.descriptor().info()
    }
}

/// Current value of `control`.
pub fn get<R: RegisterIo>(
    io: &mut R,
    control: Control,
) -> Result<ControlValue, ControlError<R::Error>> {
    match control.descriptor().kind {
        ControlKind::Range { field, .. } => field.get(io).map(ControlValue::Integer),
        ControlKind::Enum(field) => field.get(io).map(ControlValue::Enumerated),
        ControlKind::EnumExt(_) => input_select::current(io).map(ControlValue::Enumerated),
    }
}

/// Set `control` to `value`.
///
/// # Errors
///
/// [`ControlError::TypeMismatch`] if `value` has the wrong shape for the
/// control; range, item and register errors from the field helpers.
pub fn put<R: RegisterIo>(
    io: &mut R,
    control: Control,
    value: ControlValue,
) -> Result<(), ControlError<R::Error>> {
    let result = match (control.descriptor().kind, value) {
        (ControlKind::Range { field, .. }, ControlValue::Integer(v)) => field.put(io, v),
        (ControlKind::Enum(field), ControlValue::Enumerated(item)) => field.put(io, item),
        (ControlKind::EnumExt(_), ControlValue::Enumerated(item)) => input_select::apply(io, item),
        _ => Err(ControlError::TypeMismatch),
    };
    result.inspect_err(|_| {
        #[cfg(feature = "defmt")]
        defmt::warn!("ESS9038PRO: control {} rejected {}", control, value);
    })
}
