//! Memory Access Types.
//!
//! This module defines how memory accesses are classified throughout the emulator.
//! These types are used for the following:
//! 1. **Permission Validation:** Checking Read/Write/Execute (RWX) and user rights in the MMU and TLB.
//! 2. **Fault Generation:** Determining the correct page fault or access fault trap type.
//! 3. **Page Sizing:** Describing which page-size tier a translation covers.

use std::fmt;
use std::ops::BitOr;

use super::constants::{
    PAGE_OFFSET_MASK, PAGE_SHIFT, PTE_R, PTE_U, PTE_W, PTE_X, SUPERPAGE_OFFSET_MASK,
    SUPERPAGE_SHIFT,
};

/// Type of memory access operation.
///
/// Used to distinguish between instruction fetches, data loads, and data stores
/// for TLB selection and permission enforcement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessType {
    /// Instruction fetch access.
    ///
    /// Requires Execute (X) permission and is served by the instruction TLB.
    Fetch,

    /// Data read access.
    ///
    /// Requires Read (R) permission and is served by the data TLB.
    Read,

    /// Data write access.
    ///
    /// Requires Write (W) permission and is served by the data TLB.
    Write,
}

impl AccessType {
    /// Returns the single right this access requires.
    #[inline]
    pub const fn required_right(self) -> AccessRights {
        match self {
            Self::Fetch => AccessRights::EXEC,
            Self::Read => AccessRights::READ,
            Self::Write => AccessRights::WRITE,
        }
    }
}

/// Permission bits cached alongside a translation.
///
/// The bit positions mirror the R/W/X/U bits of a RISC-V page-table entry so a
/// PTE's rights can be carried over by masking, never by reinterpretation.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AccessRights(u8);

impl AccessRights {
    /// No rights.
    pub const NONE: Self = Self(0);
    /// Read permission (`PTE_R`).
    pub const READ: Self = Self(PTE_R as u8);
    /// Write permission (`PTE_W`).
    pub const WRITE: Self = Self(PTE_W as u8);
    /// Execute permission (`PTE_X`).
    pub const EXEC: Self = Self(PTE_X as u8);
    /// User-accessible page (`PTE_U`).
    pub const USER: Self = Self(PTE_U as u8);

    const MASK: u8 = (PTE_R | PTE_W | PTE_X | PTE_U) as u8;

    /// Builds a rights set from raw bits, discarding anything that is not R/W/X/U.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }

    /// Extracts the R/W/X/U rights of a raw page-table entry.
    #[inline]
    pub const fn from_pte(pte: u32) -> Self {
        Self::from_bits(pte as u8)
    }

    /// Returns `true` if every right in `other` is also in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `self` without the rights in `other`.
    #[inline]
    #[must_use]
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Returns `true` if the page is user-accessible.
    #[inline]
    pub const fn is_user(self) -> bool {
        self.contains(Self::USER)
    }

    /// Returns `true` if these rights allow `access`.
    #[inline]
    pub const fn permits(self, access: AccessType) -> bool {
        self.contains(access.required_right())
    }
}

impl BitOr for AccessRights {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for AccessRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |right: Self, c: char| if self.contains(right) { c } else { '-' };
        write!(
            f,
            "{}{}{}{}",
            flag(Self::READ, 'r'),
            flag(Self::WRITE, 'w'),
            flag(Self::EXEC, 'x'),
            flag(Self::USER, 'u')
        )
    }
}

/// Page-size tier of a translation.
///
/// Sv32 has two: a 4 KiB base page and a 4 MiB superpage (a leaf found in the
/// root table, collapsing a whole second-level table into one mapping).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PageLevel {
    /// 4 KiB page; the low 12 bits are the offset.
    #[default]
    Base = 0,
    /// 4 MiB superpage; the low 22 bits are the offset.
    Super = 1,
}

impl PageLevel {
    /// Number of offset bits for a page of this level.
    #[inline]
    pub const fn offset_bits(self) -> u32 {
        match self {
            Self::Base => PAGE_SHIFT,
            Self::Super => SUPERPAGE_SHIFT,
        }
    }

    /// Mask selecting the offset bits for a page of this level.
    #[inline]
    pub const fn offset_mask(self) -> u32 {
        match self {
            Self::Base => PAGE_OFFSET_MASK,
            Self::Super => SUPERPAGE_OFFSET_MASK,
        }
    }
}

impl fmt::Display for PageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => write!(f, "4K"),
            Self::Super => write!(f, "4M"),
        }
    }
}
