//! Sv32 Paging Constants.
//!
//! This module defines the page geometry and page-table-entry layout used by
//! the MMU. It includes:
//! 1. **Page Geometry:** Base page and superpage sizes, shifts and offset masks.
//! 2. **Walk Constants:** Level count, VPN field width and PTE size for Sv32.
//! 3. **PTE Layout:** Bit positions of the flag bits and the PPN field.

/// Base page size in bytes (4 KiB).
pub const PAGE_SIZE: u32 = 1 << PAGE_SHIFT;

/// Number of offset bits in a base page.
pub const PAGE_SHIFT: u32 = 12;

/// Mask for extracting the offset within a base page.
pub const PAGE_OFFSET_MASK: u32 = PAGE_SIZE - 1;

/// Number of offset bits in a superpage (4 MiB).
pub const SUPERPAGE_SHIFT: u32 = PAGE_SHIFT + VPN_BITS_PER_LEVEL;

/// Mask for extracting the offset within a superpage.
pub const SUPERPAGE_OFFSET_MASK: u32 = (1 << SUPERPAGE_SHIFT) - 1;

/// Number of page-table levels in Sv32.
pub const SV32_LEVELS: usize = 2;

/// Width of each VPN field in a virtual address.
pub const VPN_BITS_PER_LEVEL: u32 = 10;

/// Mask for a single VPN field.
pub const VPN_ENTRY_MASK: u32 = (1 << VPN_BITS_PER_LEVEL) - 1;

/// Size of an Sv32 page-table entry in bytes.
pub const PTE_SIZE: u32 = 4;

/// Page-table entry valid bit.
pub const PTE_V: u32 = 1 << 0;

/// Page-table entry read permission bit.
pub const PTE_R: u32 = 1 << 1;

/// Page-table entry write permission bit.
pub const PTE_W: u32 = 1 << 2;

/// Page-table entry execute permission bit.
pub const PTE_X: u32 = 1 << 3;

/// Page-table entry user-accessible bit.
pub const PTE_U: u32 = 1 << 4;

/// Page-table entry accessed bit.
pub const PTE_A: u32 = 1 << 6;

/// Page-table entry dirty bit.
pub const PTE_D: u32 = 1 << 7;

/// Shift of the PPN field inside a page-table entry.
pub const PTE_PPN_SHIFT: u32 = 10;

/// Mask for the low PPN field (PPN[0]); must be zero in a superpage leaf.
pub const PTE_PPN0_MASK: u32 = VPN_ENTRY_MASK;
