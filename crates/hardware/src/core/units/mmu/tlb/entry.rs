//! TLB entry.
//!
//! A single cached translation: an aligned virtual page, the physical page it
//! maps to, the page-size tier and the rights copied from the leaf PTE.

use crate::common::{AccessRights, AccessType, PageLevel, PhysAddr, VirtAddr};
use crate::core::arch::mode::PrivilegeMode;

/// A single entry in a translation set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TlbEntry {
    /// Virtual page number (tag), stored as an address with the offset bits of `level` cleared.
    vpn: u32,
    /// Physical page base, offset bits of `level` cleared.
    ppn: PhysAddr,
    /// Page-size tier; decides how an incoming address is split into tag and offset.
    level: PageLevel,
    /// R/W/X/U rights; never more than the leaf PTE granted.
    rights: AccessRights,
    /// Entry validity flag. Cleared by a flush; the slot stays resident until evicted.
    valid: bool,
}

impl TlbEntry {
    /// Creates a valid entry mapping the `level`-sized page containing `vaddr` to `ppn`.
    ///
    /// The virtual page number is derived from `vaddr` here; `ppn` must already
    /// be aligned to `level` since the TLB never infers physical offsets.
    #[inline]
    pub fn new(vaddr: VirtAddr, ppn: PhysAddr, rights: AccessRights, level: PageLevel) -> Self {
        debug_assert!(
            ppn.is_page_aligned(level),
            "refill with unaligned ppn {ppn} for a {level} page"
        );
        Self {
            vpn: vaddr.page_number(level),
            ppn,
            level,
            rights,
            valid: true,
        }
    }

    /// Returns the virtual page number (aligned virtual address).
    #[inline]
    pub const fn vpn(&self) -> u32 {
        self.vpn
    }

    /// Returns the physical page base.
    #[inline]
    pub const fn ppn(&self) -> PhysAddr {
        self.ppn
    }

    /// Returns the page-size tier.
    #[inline]
    pub const fn level(&self) -> PageLevel {
        self.level
    }

    /// Returns the cached rights.
    #[inline]
    pub const fn rights(&self) -> AccessRights {
        self.rights
    }

    /// Returns `true` while the entry represents a live mapping.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns `true` if this entry is valid and its page contains `vaddr`.
    #[inline(always)]
    pub const fn matches(&self, vaddr: VirtAddr) -> bool {
        self.valid && self.vpn == vaddr.page_number(self.level)
    }

    /// Returns `true` if this entry is valid and caches exactly `(vpn, level)`.
    #[inline]
    pub(crate) fn is_same_page(&self, vpn: u32, level: PageLevel) -> bool {
        self.valid && self.level == level && self.vpn == vpn
    }

    /// Checks the cached rights and the U bit against a request.
    ///
    /// A user page only serves user-mode requests and a supervisor page only
    /// serves the other modes. Anything else is a miss, so the walker gets to
    /// apply SUM/MXR and raise the right fault.
    #[inline(always)]
    pub const fn permits(&self, access: AccessType, privilege: PrivilegeMode) -> bool {
        let privilege_ok = if self.rights.is_user() {
            matches!(privilege, PrivilegeMode::User)
        } else {
            !matches!(privilege, PrivilegeMode::User)
        };
        privilege_ok && self.rights.permits(access)
    }

    /// Splices the offset of `vaddr` onto the physical page base.
    #[inline(always)]
    pub const fn translate(&self, vaddr: VirtAddr) -> PhysAddr {
        PhysAddr::new(self.ppn.val() | vaddr.page_offset(self.level))
    }

    /// Replaces the mapping of a live entry in place.
    #[inline]
    pub(crate) const fn update(&mut self, ppn: PhysAddr, rights: AccessRights) {
        self.ppn = ppn;
        self.rights = rights;
    }

    /// Marks the entry as no longer representing a mapping.
    #[inline]
    pub(crate) const fn invalidate(&mut self) {
        self.valid = false;
    }
}
