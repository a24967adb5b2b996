//! Cached register map over an I²C control bus.
//!
//! A [`Regmap`] pairs a bus handle with a chip-supplied [`RegisterAccess`]
//! policy. The policy decides, per address, whether a register may be
//! written, whether it may be read, and whether reads must always go to the
//! bus (volatile). Everything else is served from a sparse cache keyed by
//! address.
//!
//! # Bus protocol
//!
//! Registers are 8-bit addresses holding 8-bit values:
//!
//! - write: one `write` of `[reg, value]`
//! - read: one `write_read` sending `[reg]` and reading back exactly one byte
//!
//! Sequential multi-byte reads are never issued. ESS Sabre DACs do not
//! support them; clocking out a second byte leaves the I²C decoder in an
//! undefined state that only a reset clears.
//!
//! # Errors
//!
//! Bus errors are returned verbatim inside [`RegmapError::Bus`]. There is no
//! retry and no rollback; a failed write leaves the cache untouched for that
//! register.

use embedded_hal::i2c::I2c;
use heapless::LinearMap;
use thiserror::Error;

/// Number of distinct registers the sparse cache can hold.
///
/// [`Regmap::new`] rejects configurations whose address space would not fit.
pub const CACHE_CAPACITY: usize = 128;

// ---------------------------------------------------------------------------
// Access policy
// ---------------------------------------------------------------------------

/// Per-register access predicates supplied by a chip driver.
///
/// Addresses for which all three predicates are `false` are inert: the
/// register map rejects every access to them with an error.
pub trait RegisterAccess {
    /// `true` if the register may be written.
    fn is_writeable(&self, reg: u8) -> bool;

    /// `true` if the register may be read.
    fn is_readable(&self, reg: u8) -> bool;

    /// `true` if the register changes outside driver control and must never
    /// be served from the cache.
    fn is_volatile(&self, reg: u8) -> bool;
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Register cache strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CacheType {
    /// Every read goes to the bus.
    None,
    /// Values are cached by address as they are read or written.
    Sparse,
}

/// Register map layout and cache configuration.
///
/// Built with `const` setters so drivers can declare it as a constant:
///
/// ```
/// use platform::regmap::{CacheType, RegmapConfig};
///
/// const CONFIG: RegmapConfig = RegmapConfig::new(8, 8)
///     .with_max_register(0x73)
///     .with_cache_type(CacheType::Sparse);
/// # assert_eq!(CONFIG.cache_type, CacheType::Sparse);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegmapConfig {
    /// Register address width in bits. Only 8 is supported.
    pub reg_bits: u8,
    /// Register value width in bits. Only 8 is supported.
    pub val_bits: u8,
    /// Highest valid register address (inclusive).
    pub max_register: u8,
    /// Cache strategy.
    pub cache_type: CacheType,
}

impl RegmapConfig {
    /// Layout with the given widths, full address range and no cache.
    pub const fn new(reg_bits: u8, val_bits: u8) -> Self {
        Self {
            reg_bits,
            val_bits,
            max_register: u8::MAX,
            cache_type: CacheType::None,
        }
    }

    /// Set the highest valid register address.
    #[must_use]
    pub const fn with_max_register(mut self, max_register: u8) -> Self {
        self.max_register = max_register;
        self
    }

    /// Set the cache strategy.
    #[must_use]
    pub const fn with_cache_type(mut self, cache_type: CacheType) -> Self {
        self.cache_type = cache_type;
        self
    }

    /// `true` if this layout can be served by [`Regmap`].
    pub fn is_supported(&self) -> bool {
        let fits_cache = match self.cache_type {
            CacheType::None => true,
            CacheType::Sparse => usize::from(self.max_register) < CACHE_CAPACITY,
        };
        self.reg_bits == 8 && self.val_bits == 8 && fits_cache
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Register map error, generic over the bus error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegmapError<E> {
    /// The underlying bus transaction failed.
    #[error("bus transaction failed: {0:?}")]
    Bus(E),
    /// The access policy does not allow reading this register.
    #[error("register {0:#04x} is not readable")]
    NotReadable(u8),
    /// The access policy does not allow writing this register.
    #[error("register {0:#04x} is not writeable")]
    NotWriteable(u8),
    /// The address is above the configured `max_register`.
    #[error("register {0:#04x} is outside the register map")]
    OutOfRange(u8),
}

/// [`Regmap::new`] refused the configuration (width or cache size).
///
/// Holds the bus so the caller can reuse it.
#[derive(Error)]
#[error("unsupported register map configuration")]
pub struct InvalidConfig<I>(I);

impl<I> InvalidConfig<I> {
    /// Take back the bus handed to [`Regmap::new`].
    pub fn into_bus(self) -> I {
        self.0
    }
}

impl<I> core::fmt::Debug for InvalidConfig<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("InvalidConfig")
    }
}

// ---------------------------------------------------------------------------
// Register I/O abstraction
// ---------------------------------------------------------------------------

/// Byte-wide register read/write access.
///
/// Implemented by [`Regmap`]; control helpers are written against this trait
/// so their bit-packing can be exercised against any register file.
pub trait RegisterIo {
    /// Bus error type carried inside [`RegmapError::Bus`].
    type Error;

    /// Read a register (possibly from cache).
    fn read(&mut self, reg: u8) -> Result<u8, RegmapError<Self::Error>>;

    /// Write a register.
    fn write(&mut self, reg: u8, value: u8) -> Result<(), RegmapError<Self::Error>>;

    /// Read-modify-write the bits selected by `mask`.
    ///
    /// The new value is `(old & !mask) | (value & mask)`. The write is
    /// skipped when it would not change the register. Returns `true` if a
    /// write was issued.
    fn update_bits(
        &mut self,
        reg: u8,
        mask: u8,
        value: u8,
    ) -> Result<bool, RegmapError<Self::Error>> {
        let old = self.read(reg)?;
        let new = (old & !mask) | (value & mask);
        if new == old {
            return Ok(false);
        }
        self.write(reg, new)?;
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Regmap
// ---------------------------------------------------------------------------

/// Register map bound to one I²C device.
pub struct Regmap<I, A> {
    i2c: I,
    address: u8,
    config: RegmapConfig,
    access: A,
    cache: LinearMap<u8, u8, CACHE_CAPACITY>,
}

impl<I: I2c, A: RegisterAccess> Regmap<I, A> {
    /// Create a register map for the device at 7-bit `address`.
    ///
    /// No bus traffic happens here; the cache starts empty (there is no
    /// default-value table).
    ///
    /// # Errors
    ///
    /// [`InvalidConfig`] carrying `i2c` if `config` is not supported (see
    /// [`RegmapConfig::is_supported`]).
    pub fn new(
        i2c: I,
        address: u8,
        config: RegmapConfig,
        access: A,
    ) -> Result<Self, InvalidConfig<I>> {
        if !config.is_supported() {
            return Err(InvalidConfig(i2c));
        }
        Ok(Self {
            i2c,
            address,
            config,
            access,
            cache: LinearMap::new(),
        })
    }

    /// Read a register.
    ///
    /// Non-volatile registers are served from the cache when present and
    /// cached after a bus read. Volatile registers always hit the bus.
    pub fn read(&mut self, reg: u8) -> Result<u8, RegmapError<I::Error>> {
        self.check_range(reg)?;
        if !self.access.is_readable(reg) {
            return Err(RegmapError::NotReadable(reg));
        }

        let volatile = self.access.is_volatile(reg);
        if !volatile {
            if let Some(value) = self.cache.get(&reg) {
                return Ok(*value);
            }
        }

        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(RegmapError::Bus)?;
        let [value] = buf;

        if !volatile {
            self.cache_store(reg, value);
        }
        Ok(value)
    }

    /// Write a register and update the cache.
    pub fn write(&mut self, reg: u8, value: u8) -> Result<(), RegmapError<I::Error>> {
        self.check_range(reg)?;
        if !self.access.is_writeable(reg) {
            return Err(RegmapError::NotWriteable(reg));
        }

        self.i2c
            .write(self.address, &[reg, value])
            .map_err(RegmapError::Bus)?;

        if !self.access.is_volatile(reg) {
            self.cache_store(reg, value);
        }
        Ok(())
    }

    /// Read-modify-write the bits selected by `mask`.
    ///
    /// See [`RegisterIo::update_bits`].
    pub fn update_bits(
        &mut self,
        reg: u8,
        mask: u8,
        value: u8,
    ) -> Result<bool, RegmapError<I::Error>> {
        <Self as RegisterIo>::update_bits(self, reg, mask, value)
    }

    /// Cached value of `reg`, without touching the bus.
    pub fn cached(&self, reg: u8) -> Option<u8> {
        self.cache.get(&reg).copied()
    }

    /// Forget every cached value. The next read of each register goes to
    /// the bus.
    pub fn drop_cache(&mut self) {
        self.cache.clear();
    }

    /// 7-bit device address.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Layout and cache configuration.
    pub fn config(&self) -> &RegmapConfig {
        &self.config
    }

    /// Access policy.
    pub fn access(&self) -> &A {
        &self.access
    }

    /// Tear down the map and hand the bus back.
    pub fn release(self) -> I {
        self.i2c
    }

    fn check_range(&self, reg: u8) -> Result<(), RegmapError<I::Error>> {
        if reg > self.config.max_register {
            Err(RegmapError::OutOfRange(reg))
        } else {
            Ok(())
        }
    }

    fn cache_store(&mut self, reg: u8, value: u8) {
        if self.config.cache_type == CacheType::Sparse {
            // Capacity covers every address up to max_register (checked in new()).
            let _ = self.cache.insert(reg, value);
        }
    }
}

impl<I: I2c, A: RegisterAccess> RegisterIo for Regmap<I, A> {
    type Error = I::Error;

    fn read(&mut self, reg: u8) -> Result<u8, RegmapError<Self::Error>> {
        Regmap::read(self, reg)
    }

    fn write(&mut self, reg: u8, value: u8) -> Result<(), RegmapError<Self::Error>> {
        Regmap::write(self, reg, value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::mocks::FakeRegisterFile;

    const ADDR: u8 = 0x48;
    const CONFIG: RegmapConfig = RegmapConfig::new(8, 8)
        .with_max_register(0x20)
        .with_cache_type(CacheType::Sparse);

    /// 0x00–0x0F writable, 0x10 read-only, 0x11 volatile, rest inert.
    struct TestAccess;

    impl RegisterAccess for TestAccess {
        fn is_writeable(&self, reg: u8) -> bool {
            reg <= 0x0F
        }
        fn is_readable(&self, reg: u8) -> bool {
            reg <= 0x11
        }
        fn is_volatile(&self, reg: u8) -> bool {
            reg == 0x11
        }
    }

    fn regmap(chip: FakeRegisterFile) -> Regmap<FakeRegisterFile, TestAccess> {
        Regmap::new(chip, ADDR, CONFIG, TestAccess).unwrap()
    }

    #[test]
    fn rejects_wide_registers() {
        let config = RegmapConfig::new(16, 8);
        let Err(err) = Regmap::new(FakeRegisterFile::new(ADDR), ADDR, config, TestAccess) else {
            panic!("16-bit registers must be rejected");
        };
        let bus = err.into_bus();
        assert_eq!(bus.read_count(), 0);
        assert!(bus.writes().is_empty());
    }

    #[test]
    fn rejects_address_space_larger_than_cache() {
        let config = RegmapConfig::new(8, 8).with_cache_type(CacheType::Sparse);
        assert!(!config.is_supported());
        // Uncached maps may span the whole 8-bit space.
        assert!(RegmapConfig::new(8, 8).is_supported());
    }

    #[test]
    fn read_is_cached_after_first_bus_access() {
        let mut chip = FakeRegisterFile::new(ADDR);
        chip.set_register(0x05, 0xA5);
        let mut map = regmap(chip);

        assert_eq!(map.read(0x05).unwrap(), 0xA5);
        assert_eq!(map.read(0x05).unwrap(), 0xA5);
        assert_eq!(map.cached(0x05), Some(0xA5));
        assert_eq!(map.release().read_count(), 1);
    }

    #[test]
    fn volatile_register_always_hits_bus() {
        let mut map = regmap(FakeRegisterFile::new(ADDR));
        map.read(0x11).unwrap();
        map.read(0x11).unwrap();
        assert_eq!(map.cached(0x11), None);
        assert_eq!(map.release().read_count(), 2);
    }

    #[test]
    fn write_populates_cache() {
        let mut map = regmap(FakeRegisterFile::new(ADDR));
        map.write(0x03, 0x42).unwrap();
        assert_eq!(map.cached(0x03), Some(0x42));
        assert_eq!(map.read(0x03).unwrap(), 0x42);
        assert_eq!(map.release().read_count(), 0);
    }

    #[test]
    fn inert_register_is_rejected_without_bus_traffic() {
        let mut map = regmap(FakeRegisterFile::new(ADDR));
        assert_eq!(map.read(0x15), Err(RegmapError::NotReadable(0x15)));
        assert_eq!(map.write(0x15, 1), Err(RegmapError::NotWriteable(0x15)));
        assert_eq!(map.write(0x10, 1), Err(RegmapError::NotWriteable(0x10)));
        let chip = map.release();
        assert_eq!(chip.read_count(), 0);
        assert!(chip.writes().is_empty());
    }

    #[test]
    fn address_above_max_register_is_out_of_range() {
        let mut map = regmap(FakeRegisterFile::new(ADDR));
        assert_eq!(map.read(0x21), Err(RegmapError::OutOfRange(0x21)));
    }

    #[test]
    fn update_bits_preserves_unmasked_bits() {
        let mut chip = FakeRegisterFile::new(ADDR);
        chip.set_register(0x07, 0b1010_0000);
        let mut map = regmap(chip);

        assert!(map.update_bits(0x07, 0x01, 0x01).unwrap());
        assert_eq!(map.read(0x07).unwrap(), 0b1010_0001);
    }

    #[test]
    fn update_bits_skips_write_when_unchanged() {
        let mut chip = FakeRegisterFile::new(ADDR);
        chip.set_register(0x07, 0x01);
        let mut map = regmap(chip);

        assert!(!map.update_bits(0x07, 0x01, 0x01).unwrap());
        assert!(map.release().writes().is_empty());
    }

    #[test]
    fn failed_write_leaves_cache_untouched() {
        let mut chip = FakeRegisterFile::new(ADDR);
        chip.fail_writes_after(0);
        let mut map = regmap(chip);

        assert!(matches!(map.write(0x02, 0x10), Err(RegmapError::Bus(_))));
        assert_eq!(map.cached(0x02), None);
    }

    #[test]
    fn drop_cache_forces_bus_reread() {
        let mut map = regmap(FakeRegisterFile::new(ADDR));
        map.read(0x01).unwrap();
        map.drop_cache();
        map.read(0x01).unwrap();
        assert_eq!(map.release().read_count(), 2);
    }

    #[test]
    fn uncached_map_reads_every_time() {
        let config = RegmapConfig::new(8, 8).with_max_register(0x20);
        let mut map = Regmap::new(FakeRegisterFile::new(ADDR), ADDR, config, TestAccess).unwrap();
        map.write(0x01, 0x33).unwrap();
        assert_eq!(map.cached(0x01), None);
        assert_eq!(map.read(0x01).unwrap(), 0x33);
        assert_eq!(map.release().read_count(), 1);
    }
}
