//! Register access policy
//!
//! Only a small working set of the map is reachable: the filter/mute and
//! volume registers, the four channel-map registers and the status block.
//! Every other address, mapped or not, is inert and the register map
//! rejects it without touching the bus.
//!
//! | Mode       | Registers                                         |
//! |------------|---------------------------------------------------|
//! | `Writable` | 7, 15, 16–23, 38–41                               |
//! | `Cached`   | 64 (chip ID / status)                             |
//! | `Volatile` | 66–69 (PLL status), 100 (input status)            |
//! | `None`     | everything else                                   |

use platform::regmap::RegisterAccess;

use crate::registers::Register;

/// How a register may be accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccessMode {
    /// Not accessible.
    None,
    /// Readable; value may be cached.
    Cached,
    /// Readable; every read goes to the bus.
    Volatile,
    /// Readable and writable; value may be cached.
    Writable,
}

impl AccessMode {
    /// `true` if the register may be written.
    pub const fn is_writeable(self) -> bool {
        matches!(self, Self::Writable)
    }

    /// `true` if the register may be read.
    pub const fn is_readable(self) -> bool {
        !matches!(self, Self::None)
    }

    /// `true` if reads must bypass the cache.
    pub const fn is_volatile(self) -> bool {
        matches!(self, Self::Volatile)
    }
}

/// Access mode of the register at `addr`.
pub const fn access_mode(addr: u8) -> AccessMode {
    let Some(reg) = Register::from_addr(addr) else {
        return AccessMode::None;
    };
    match reg {
        Register::FilterAndMute
        | Register::VolumeConf
        | Register::Volume1
        | Register::Volume2
        | Register::Volume3
        | Register::Volume4
        | Register::Volume5
        | Register::Volume6
        | Register::Volume7
        | Register::Volume8
        | Register::ChannelMap12
        | Register::ChannelMap34
        | Register::ChannelMap56
        | Register::ChannelMap78 => AccessMode::Writable,
        Register::ChipIdStatus => AccessMode::Cached,
        Register::PllStatus0
        | Register::PllStatus1
        | Register::PllStatus2
        | Register::PllStatus3
        | Register::InputStatus => AccessMode::Volatile,
        _ => AccessMode::None,
    }
}

/// [`RegisterAccess`] policy for the ES9038PRO.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ess9038proAccess;

impl RegisterAccess for Ess9038proAccess {
    fn is_writeable(&self, reg: u8) -> bool {
        access_mode(reg).is_writeable()
    }

    fn is_readable(&self, reg: u8) -> bool {
        access_mode(reg).is_readable()
    }

    fn is_volatile(&self, reg: u8) -> bool {
        access_mode(reg).is_volatile()
    }
}
