//! Configuration system for the emulator core.
//!
//! This module defines the configuration structures used to size the
//! translation path. It provides:
//! 1. **Defaults:** Baseline RAM layout and TLB capacities.
//! 2. **Structures:** `memory` and `mmu` sections under a root `Config`.
//! 3. **Loading:** JSON parsing from a string or a file, followed by validation.
//!
//! Every field is optional in JSON; missing fields take the defaults below.
//! TLB capacities are fixed once an `Mmu` has been built from a `Config`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants for the emulator core.
mod defaults {
    /// Base address of main system RAM.
    pub const RAM_BASE: u32 = 0;

    /// Total size of main system RAM (512 MiB).
    pub const RAM_SIZE: usize = 512 * 1024 * 1024;

    /// Instruction TLB entry count.
    pub const ITLB_SIZE: usize = 32;

    /// Data TLB entry count.
    pub const DTLB_SIZE: usize = 32;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use rvemu_core::Config;
///
/// let config = Config::from_json(r#"{ "mmu": { "itlb_size": 16 } }"#).unwrap();
/// assert_eq!(config.mmu.itlb_size, 16);
/// assert_eq!(config.mmu.dtlb_size, 32);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Main memory configuration
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Translation lookaside buffer sizing
    #[serde(default)]
    pub mmu: MmuConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` for malformed input and the validation
    /// error for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise as
    /// [`Config::from_json`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Checks values that would make construction panic.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ZeroTlbCapacity` for an empty TLB set and
    /// `ConfigError::ZeroRamSize` for empty RAM.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.mmu.itlb_size == 0 {
            return Err(ConfigError::ZeroTlbCapacity { set: "itlb" });
        }
        if self.mmu.dtlb_size == 0 {
            return Err(ConfigError::ZeroTlbCapacity { set: "dtlb" });
        }
        if self.memory.ram_size == 0 {
            return Err(ConfigError::ZeroRamSize);
        }
        Ok(())
    }
}

/// Main memory configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemoryConfig {
    /// Physical base address of RAM
    #[serde(default = "MemoryConfig::default_ram_base")]
    pub ram_base: u32,

    /// RAM size in bytes
    #[serde(default = "MemoryConfig::default_ram_size")]
    pub ram_size: usize,
}

impl MemoryConfig {
    /// Returns the default RAM base address.
    const fn default_ram_base() -> u32 {
        defaults::RAM_BASE
    }

    /// Returns the default RAM size.
    const fn default_ram_size() -> usize {
        defaults::RAM_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            ram_base: defaults::RAM_BASE,
            ram_size: defaults::RAM_SIZE,
        }
    }
}

/// TLB sizing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MmuConfig {
    /// Instruction TLB entry count
    #[serde(default = "MmuConfig::default_itlb_size")]
    pub itlb_size: usize,

    /// Data TLB entry count
    #[serde(default = "MmuConfig::default_dtlb_size")]
    pub dtlb_size: usize,
}

impl MmuConfig {
    /// Returns the default instruction TLB entry count.
    const fn default_itlb_size() -> usize {
        defaults::ITLB_SIZE
    }

    /// Returns the default data TLB entry count.
    const fn default_dtlb_size() -> usize {
        defaults::DTLB_SIZE
    }
}

impl Default for MmuConfig {
    fn default() -> Self {
        Self {
            itlb_size: defaults::ITLB_SIZE,
            dtlb_size: defaults::DTLB_SIZE,
        }
    }
}
