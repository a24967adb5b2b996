//! ESS9038PRO register map
//!
//! Source: ESS Technology ES9038PRO datasheet, register overview.
//!
//! # Key I²C constraints
//!
//! ## Single-byte reads only
//! Like the rest of the Sabre family, the ES9038PRO does not support
//! sequential multi-byte reads. Every register is read with its own
//! `write_read` of one address byte and one data byte (see
//! [`platform::regmap`]).
//!
//! ## Sparse address space
//! Addresses run from 0 to 115 with holes (3, 53, 55–61, 94–99, 101–109).
//! Holes are not registers: [`Register::from_addr`] returns `None` for them
//! and the access policy treats them as inert.
//!
//! ## Volume registers hold attenuation
//! `VOLUME_n` = 0 is 0 dB (loudest); each step is 0.5 dB of attenuation.

/// Declares [`Register`] together with its address table and names.
macro_rules! registers {
    ($($variant:ident = $addr:literal => $name:literal,)+) => {
        /// Addressable ES9038PRO register.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        #[repr(u8)]
        pub enum Register {
            $(
                #[doc = $name]
                $variant = $addr,
            )+
        }

        impl Register {
            /// Every register, in address order.
            pub const ALL: &'static [Register] = &[$(Register::$variant,)+];

            /// Register at `addr`, or `None` for addresses outside the map.
            pub const fn from_addr(addr: u8) -> Option<Self> {
                match addr {
                    $($addr => Some(Register::$variant),)+
                    _ => None,
                }
            }

            /// Datasheet name.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Register::$variant => $name,)+
                }
            }
        }
    };
}

registers! {
    System = 0 => "system",
    InputSelect = 1 => "input select",
    SerialDataConf = 2 => "serial data configuration",
    AutomuteTime = 4 => "automute time",
    AutomuteLevel = 5 => "automute level",
    DeemphasisFilter = 6 => "de-emphasis filter",
    FilterAndMute = 7 => "filter and mute",
    Gpio12Conf = 8 => "GPIO 1/2 configuration",
    Gpio34Conf = 9 => "GPIO 3/4 configuration",
    MasterMode = 10 => "master mode",
    SpdifMux = 11 => "S/PDIF mux",
    JitterElim1 = 12 => "jitter eliminator 1",
    JitterElim2 = 13 => "jitter eliminator 2",
    SoftStart = 14 => "soft start",
    VolumeConf = 15 => "volume configuration",
    Volume1 = 16 => "volume control 1",
    Volume2 = 17 => "volume control 2",
    Volume3 = 18 => "volume control 3",
    Volume4 = 19 => "volume control 4",
    Volume5 = 20 => "volume control 5",
    Volume6 = 21 => "volume control 6",
    Volume7 = 22 => "volume control 7",
    Volume8 = 23 => "volume control 8",
    MasterTrim0 = 24 => "master trim 0",
    MasterTrim1 = 25 => "master trim 1",
    MasterTrim2 = 26 => "master trim 2",
    MasterTrim3 = 27 => "master trim 3",
    ThdCompC2_0 = 28 => "THD compensation C2 0",
    ThdCompC2_1 = 29 => "THD compensation C2 1",
    ThdCompC3_0 = 30 => "THD compensation C3 0",
    ThdCompC3_1 = 31 => "THD compensation C3 1",
    FirRamAddr = 32 => "programmable FIR RAM address",
    FirData0 = 33 => "programmable FIR data 0",
    FirData1 = 34 => "programmable FIR data 1",
    FirData2 = 35 => "programmable FIR data 2",
    FirData3 = 36 => "programmable FIR data 3",
    FirConf = 37 => "programmable FIR configuration",
    ChannelMap12 = 38 => "channel map 1-2",
    ChannelMap34 = 39 => "channel map 3-4",
    ChannelMap56 = 40 => "channel map 5-6",
    ChannelMap78 = 41 => "channel map 7-8",
    Nco0 = 42 => "NCO 0",
    Nco1 = 43 => "NCO 1",
    Nco2 = 44 => "NCO 2",
    Nco3 = 45 => "NCO 3",
    AdcConf = 46 => "ADC configuration",
    AdcFtrScale0 = 47 => "ADC FTR scale 0",
    AdcFtrScale1 = 48 => "ADC FTR scale 1",
    AdcFbqScale0 = 49 => "ADC FBQ scale 0",
    AdcFbqScale1 = 50 => "ADC FBQ scale 1",
    AdcFbqScale2 = 51 => "ADC FBQ scale 2",
    AdcFbqScale3 = 52 => "ADC FBQ scale 3",
    DopBypass = 54 => "DoP bypass",
    Scale18Db = 62 => "18 dB scale",
    AutoCalibrate = 63 => "auto calibrate",
    ChipIdStatus = 64 => "chip ID / status",
    GpioReadback = 65 => "GPIO readback",
    PllStatus0 = 66 => "PLL status 0",
    PllStatus1 = 67 => "PLL status 1",
    PllStatus2 = 68 => "PLL status 2",
    PllStatus3 = 69 => "PLL status 3",
    SpdifStatus00 = 70 => "S/PDIF channel status 00",
    SpdifStatus01 = 71 => "S/PDIF channel status 01",
    SpdifStatus02 = 72 => "S/PDIF channel status 02",
    SpdifStatus03 = 73 => "S/PDIF channel status 03",
    SpdifStatus04 = 74 => "S/PDIF channel status 04",
    SpdifStatus05 = 75 => "S/PDIF channel status 05",
    SpdifStatus06 = 76 => "S/PDIF channel status 06",
    SpdifStatus07 = 77 => "S/PDIF channel status 07",
    SpdifStatus08 = 78 => "S/PDIF channel status 08",
    SpdifStatus09 = 79 => "S/PDIF channel status 09",
    SpdifStatus10 = 80 => "S/PDIF channel status 10",
    SpdifStatus11 = 81 => "S/PDIF channel status 11",
    SpdifStatus12 = 82 => "S/PDIF channel status 12",
    SpdifStatus13 = 83 => "S/PDIF channel status 13",
    SpdifStatus14 = 84 => "S/PDIF channel status 14",
    SpdifStatus15 = 85 => "S/PDIF channel status 15",
    SpdifStatus16 = 86 => "S/PDIF channel status 16",
    SpdifStatus17 = 87 => "S/PDIF channel status 17",
    SpdifStatus18 = 88 => "S/PDIF channel status 18",
    SpdifStatus19 = 89 => "S/PDIF channel status 19",
    SpdifStatus20 = 90 => "S/PDIF channel status 20",
    SpdifStatus21 = 91 => "S/PDIF channel status 21",
    SpdifStatus22 = 92 => "S/PDIF channel status 22",
    SpdifStatus23 = 93 => "S/PDIF channel status 23",
    InputStatus = 100 => "input status",
    Agc1Gpio2_0 = 110 => "AGC1/GPIO2 0",
    Agc1Gpio2_1 = 111 => "AGC1/GPIO2 1",
    Agc1Gpio2_2 = 112 => "AGC1/GPIO2 2",
    Agc2Gpio1_0 = 113 => "AGC2/GPIO1 0",
    Agc2Gpio1_1 = 114 => "AGC2/GPIO1 1",
    Agc2Gpio1_2 = 115 => "AGC2/GPIO1 2",
}

impl Register {
    /// Bus address.
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

impl From<Register> for u8 {
    fn from(reg: Register) -> u8 {
        reg.addr()
    }
}

impl TryFrom<u8> for Register {
    type Error = u8;

    /// Fails with the rejected address.
    fn try_from(addr: u8) -> Result<Self, Self::Error> {
        Register::from_addr(addr).ok_or(addr)
    }
}

/// Highest register address.
pub const MAX_REGISTER: u8 = Register::Agc2Gpio1_2.addr();

/// Number of registers in the map.
pub const REGISTER_COUNT: usize = Register::ALL.len();

// ---------------------------------------------------------------------------
// Register field values
// ---------------------------------------------------------------------------

/// FILTER_AND_MUTE bit 0: mute all channels
pub const MUTE_BIT: u8 = 0x01;

/// FILTER_AND_MUTE bits \[7:5\]: FIR filter shape
pub const FIR_FILTER_SHIFT: u8 = 5;

/// FILTER_AND_MUTE bits \[2:1\]: IIR bandwidth
pub const IIR_FILTER_SHIFT: u8 = 1;

/// VOLUME_CONF bits \[2:0\]: volume mode
pub const VOLUME_CONF_MASK: u8 = 0x07;

/// VOLUME_CONF: stereo mode with channel 1 volume applied to every channel
pub const VOLUME_CONF_STEREO_LATCHED: u8 = 0x07;

/// Largest VOLUME_n value exposed as a control step.
pub const VOLUME_MAX_STEP: u8 = 100;

/// CHAN_MAP_n low nibble: source for the odd output of the pair
pub const CHANNEL_MAP_LOW_NIBBLE: u8 = 0x0F;

/// CHIP_ID_STATUS bit 0: DPLL locked to the incoming stream
pub const STATUS_DPLL_LOCK: u8 = 0x01;

/// CHIP_ID_STATUS bit 1: automute engaged
pub const STATUS_AUTOMUTE: u8 = 0x02;

/// CHIP_ID_STATUS bits \[7:2\]: chip ID
pub const STATUS_CHIP_ID_SHIFT: u8 = 2;
