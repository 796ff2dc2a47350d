//! RISC-V Privilege Modes.
//!
//! This module defines the privilege levels supported by the RISC-V architecture.
//! It implements the following:
//! 1. **Mode Classification:** Definitions for User (U), Supervisor (S), and Machine (M) modes.
//! 2. **Serialization:** Conversion between numeric representations and enum variants.
//! 3. **Observability:** Human-readable naming and display formatting for privilege states.

/// RISC-V privilege mode levels.
///
/// Translation only happens below Machine mode; the TLB distinguishes user
/// requests from everything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrivilegeMode {
    /// User mode (U-mode).
    ///
    /// May only use translations whose PTE has the U bit set.
    User = 0,

    /// Supervisor mode (S-mode).
    ///
    /// Uses translations without the U bit; user pages need `sstatus.SUM`.
    Supervisor = 1,

    /// Machine mode (M-mode).
    ///
    /// Accesses bypass translation entirely.
    Machine = 3,
}

impl PrivilegeMode {
    /// Converts a `u8` value to a privilege mode.
    ///
    /// Returns `None` for the reserved encoding 2 and anything above 3.
    pub const fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(Self::User),
            1 => Some(Self::Supervisor),
            3 => Some(Self::Machine),
            _ => None,
        }
    }

    /// Converts a privilege mode to its `u8` representation.
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Returns the human-readable name of the privilege mode.
    pub const fn name(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Supervisor => "Supervisor",
            Self::Machine => "Machine",
        }
    }
}

impl std::fmt::Display for PrivilegeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
