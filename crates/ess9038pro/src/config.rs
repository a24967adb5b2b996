//! Compile-time driver configuration
//!
//! Identity strings the host binds the driver with, bus addresses and the
//! register map layout.

use platform::audio_types::I2cAddr;
use platform::component::DeviceIds;
use platform::regmap::{CacheType, RegmapConfig};

use crate::registers::MAX_REGISTER;

/// Bus-level device id.
pub const I2C_DEVICE_ID: &str = "ess9038pro";

/// Platform-description compatible string.
pub const OF_COMPATIBLE: &str = "sabre,ess9038pro";

/// Driver name.
pub const DRIVER_NAME: &str = "ess9038pro-i2c";

/// Consumer name of the optional reset line.
pub const RESET_GPIO: &str = "reset-gpio";

/// Default I²C address (ADDR pin = GND).
pub const DEFAULT_I2C_ADDR: I2cAddr = I2cAddr::new(0x48);

/// Alternate I²C address (ADDR pin = VDD).
pub const ALT_I2C_ADDR: I2cAddr = I2cAddr::new(0x49);

/// Identifiers grouped for device matching.
pub const DEVICE_IDS: DeviceIds = DeviceIds {
    i2c_id: I2C_DEVICE_ID,
    compatible: OF_COMPATIBLE,
    driver_name: DRIVER_NAME,
};

/// 8-bit addresses, 8-bit values, addresses 0..=115, sparse cache, no
/// register defaults.
pub const REGMAP_CONFIG: RegmapConfig = RegmapConfig::new(8, 8)
    .with_max_register(MAX_REGISTER)
    .with_cache_type(CacheType::Sparse);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regmap_config_is_supported() {
        assert!(REGMAP_CONFIG.is_supported());
        assert_eq!(REGMAP_CONFIG.max_register, 115);
        assert_eq!(REGMAP_CONFIG.cache_type, CacheType::Sparse);
    }

    #[test]
    fn device_ids_match_both_identifiers() {
        assert!(DEVICE_IDS.matches("ess9038pro"));
        assert!(DEVICE_IDS.matches("sabre,ess9038pro"));
        assert!(!DEVICE_IDS.matches("ess9038q2m"));
    }

    #[test]
    fn addresses_are_not_reserved() {
        assert!(I2cAddr::try_new(DEFAULT_I2C_ADDR.get()).is_ok());
        assert!(I2cAddr::try_new(ALT_I2C_ADDR.get()).is_ok());
    }
}
