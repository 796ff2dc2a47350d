//! Physical and Virtual Address types.
//!
//! This module defines strong types for physical and virtual addresses to prevent
//! accidental mixing of address spaces. It provides the following:
//! 1. **Type Safety:** Distinguishes between virtual and physical address spaces at compile time.
//! 2. **Page Arithmetic:** Splits addresses into page number and offset for a given page level.
//! 3. **Walker Support:** Extracts the per-level VPN fields used by the Sv32 page-table walk.

use std::fmt;

use super::constants::{PAGE_SHIFT, VPN_BITS_PER_LEVEL, VPN_ENTRY_MASK};
use super::data::PageLevel;

/// A virtual address in the 32-bit RISC-V address space.
///
/// Virtual addresses are produced by the CPU and must be translated to physical
/// addresses through the MMU before accessing memory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtAddr(pub u32);

/// A physical address in the 32-bit RISC-V address space.
///
/// Physical addresses name actual memory locations and are used after
/// translation has completed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhysAddr(pub u32);

impl VirtAddr {
    /// Creates a new virtual address from a raw 32-bit value.
    #[inline(always)]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Returns the raw 32-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u32 {
        self.0
    }

    /// Returns the address with the offset bits of `level` cleared.
    ///
    /// This is the virtual page number in the form the TLB stores it: an
    /// aligned address, not a shifted index.
    #[inline(always)]
    pub const fn page_number(self, level: PageLevel) -> u32 {
        self.0 & !level.offset_mask()
    }

    /// Returns the offset of the address within a page of size `level`.
    #[inline(always)]
    pub const fn page_offset(self, level: PageLevel) -> u32 {
        self.0 & level.offset_mask()
    }

    /// Returns the 10-bit VPN field used to index the page table at walk level `index`.
    ///
    /// `index` 1 selects VPN\[1\] (the root table), `index` 0 selects VPN\[0\].
    #[inline]
    pub const fn vpn_field(self, index: u32) -> u32 {
        (self.0 >> (PAGE_SHIFT + index * VPN_BITS_PER_LEVEL)) & VPN_ENTRY_MASK
    }
}

impl PhysAddr {
    /// Creates a new physical address from a raw 32-bit value.
    #[inline(always)]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Returns the raw 32-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u32 {
        self.0
    }

    /// Returns `true` if no offset bits of `level` are set.
    #[inline]
    pub const fn is_page_aligned(self, level: PageLevel) -> bool {
        self.0 & level.offset_mask() == 0
    }
}

impl fmt::Display for VirtAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl fmt::Display for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}
