//! Hardware Page Table Walker (PTW) for RISC-V Sv32.
//!
//! This module implements the page-table walk run on a TLB miss. It traverses
//! the two-level Sv32 table tree rooted at `satp.PPN`, checks the leaf against
//! the request, maintains the Accessed/Dirty bits, and reports the
//! `(ppn, rights, level)` tuple the TLB caches.

use tracing::debug;

use crate::common::constants::{
    PAGE_SHIFT, PTE_A, PTE_D, PTE_PPN_SHIFT, PTE_PPN0_MASK, PTE_R, PTE_SIZE, PTE_U, PTE_V, PTE_W,
    PTE_X, SV32_LEVELS,
};
use crate::common::{AccessRights, AccessType, PageLevel, PhysAddr, Trap, VirtAddr};
use crate::core::arch::csr::{Satp, StatusFlags};
use crate::core::arch::mode::PrivilegeMode;
use crate::soc::traits::PhysMemory;

/// A strongly-typed wrapper around a raw 32-bit Sv32 Page Table Entry.
#[derive(Clone, Copy, Debug)]
struct PageTableEntry(u32);

impl PageTableEntry {
    /// Returns the underlying raw value.
    const fn raw(self) -> u32 {
        self.0
    }

    /// Returns true if the Valid (V) bit is set.
    const fn is_valid(self) -> bool {
        self.0 & PTE_V != 0
    }

    /// Returns true if the Read (R) bit is set.
    const fn can_read(self) -> bool {
        self.0 & PTE_R != 0
    }

    /// Returns true if the Write (W) bit is set.
    const fn can_write(self) -> bool {
        self.0 & PTE_W != 0
    }

    /// Returns true if the Execute (X) bit is set.
    const fn can_exec(self) -> bool {
        self.0 & PTE_X != 0
    }

    /// Returns true if the User (U) bit is set.
    const fn is_user(self) -> bool {
        self.0 & PTE_U != 0
    }

    /// Returns true if the Accessed (A) bit is set.
    const fn is_accessed(self) -> bool {
        self.0 & PTE_A != 0
    }

    /// Returns true if the Dirty (D) bit is set.
    const fn is_dirty(self) -> bool {
        self.0 & PTE_D != 0
    }

    /// Extracts the 22-bit Physical Page Number.
    const fn ppn(self) -> u32 {
        self.0 >> PTE_PPN_SHIFT
    }

    /// A valid entry with R=0, W=0 and X=0 points at the next-level table.
    const fn is_pointer(self) -> bool {
        !self.can_read() && !self.can_write() && !self.can_exec()
    }

    /// W without R is a reserved encoding.
    const fn is_reserved(self) -> bool {
        !self.can_read() && self.can_write()
    }
}

/// Leaf translation produced by a successful walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WalkResult {
    /// Physical page base, aligned to `level`.
    pub ppn: PhysAddr,
    /// Rights safe to cache: the leaf's R/X/U, and W only once the page is dirty.
    pub rights: AccessRights,
    /// Page-size tier of the leaf.
    pub level: PageLevel,
}

impl WalkResult {
    /// Splices the offset of `vaddr` onto the physical page base.
    pub const fn translate(&self, vaddr: VirtAddr) -> PhysAddr {
        PhysAddr::new(self.ppn.val() | vaddr.page_offset(self.level))
    }
}

/// Performs a hardware page table walk for Sv32.
///
/// Supports 4 KiB pages and 4 MiB superpages. Page-table reads and the A/D
/// write-back go through `mem`.
///
/// # Arguments
///
/// * `mem` - Physical memory holding the page tables.
/// * `satp` - Current `satp`; its PPN locates the root table.
/// * `status` - SUM/MXR bits from `sstatus`.
/// * `vaddr` - The virtual address to translate.
/// * `access` - The type of memory access (Fetch, Read, Write).
/// * `privilege` - The effective privilege mode of the access.
///
/// # Errors
///
/// Returns the page fault matching `access` for an invalid, reserved,
/// misaligned or insufficiently privileged mapping, and the access fault
/// matching `access` when a PTE cannot be read or written back.
pub fn page_table_walk<M: PhysMemory + ?Sized>(
    mem: &mut M,
    satp: Satp,
    status: StatusFlags,
    vaddr: VirtAddr,
    access: AccessType,
    privilege: PrivilegeMode,
) -> Result<WalkResult, Trap> {
    let page_fault = |reason: &'static str| {
        debug!(vaddr = %vaddr, ?access, %privilege, reason, "page fault");
        Trap::page_fault(access, vaddr.val())
    };
    let access_fault = |paddr: PhysAddr| {
        debug!(vaddr = %vaddr, pte_addr = %paddr, ?access, "access fault on pte");
        Trap::access_fault(access, vaddr.val())
    };

    let mut table = satp.ppn();

    for index in (0..SV32_LEVELS as u32).rev() {
        let pte_addr = PhysAddr::new((table << PAGE_SHIFT) | (vaddr.vpn_field(index) * PTE_SIZE));
        let pte = PageTableEntry(mem.read_u32(pte_addr).map_err(|_| access_fault(pte_addr))?);

        if !pte.is_valid() {
            return Err(page_fault("pte not valid"));
        }
        if pte.is_reserved() {
            return Err(page_fault("reserved w-without-r encoding"));
        }

        if pte.is_pointer() {
            if index == 0 {
                return Err(page_fault("pointer pte at last level"));
            }
            table = pte.ppn();
            continue;
        }

        let level = if index == 1 {
            PageLevel::Super
        } else {
            PageLevel::Base
        };
        if level == PageLevel::Super && pte.ppn() & PTE_PPN0_MASK != 0 {
            return Err(page_fault("misaligned superpage"));
        }

        if !is_permitted(pte, access, privilege, status) {
            return Err(page_fault("permission denied"));
        }

        let (pte, updated) = update_access_bits(pte, access);
        if updated {
            mem.write_u32(pte_addr, pte.raw())
                .map_err(|_| access_fault(pte_addr))?;
        }

        let mut rights = AccessRights::from_pte(pte.raw());
        if !pte.is_dirty() {
            rights = rights.without(AccessRights::WRITE);
        }

        return Ok(WalkResult {
            ppn: PhysAddr::new(pte.ppn() << PAGE_SHIFT),
            rights,
            level,
        });
    }

    Err(page_fault("walk exhausted levels"))
}

/// Validates access permissions for a leaf PTE.
///
/// Checks R/W/X bits, the User bit, and the SUM/MXR status flags.
fn is_permitted(
    pte: PageTableEntry,
    access: AccessType,
    privilege: PrivilegeMode,
    status: StatusFlags,
) -> bool {
    let rwx_ok = match access {
        AccessType::Fetch => pte.can_exec(),
        AccessType::Read => pte.can_read() || (status.mxr && pte.can_exec()),
        AccessType::Write => pte.can_write(),
    };
    if !rwx_ok {
        return false;
    }

    match privilege {
        PrivilegeMode::User => pte.is_user(),
        PrivilegeMode::Supervisor | PrivilegeMode::Machine => {
            !pte.is_user() || (status.sum && access != AccessType::Fetch)
        }
    }
}

/// Sets the Accessed (A) bit, and the Dirty (D) bit for writes.
///
/// Returns the possibly modified PTE and whether it must be written back.
const fn update_access_bits(pte: PageTableEntry, access: AccessType) -> (PageTableEntry, bool) {
    let mut raw = pte.raw();
    if !pte.is_accessed() {
        raw |= PTE_A;
    }
    if matches!(access, AccessType::Write) && !pte.is_dirty() {
        raw |= PTE_D;
    }
    (PageTableEntry(raw), raw != pte.raw())
}
