//! Memory Management Unit (MMU).
//!
//! This module implements the Memory Management Unit, responsible for
//! virtual-to-physical address translation. It supports the RISC-V Sv32
//! paging scheme and caches translations in a split instruction/data TLB.
//!
//! A translation first consults the TLB; on a miss the page-table walker runs
//! against physical memory and its result is refilled into the set that
//! missed.

/// Page table walker implementation for Sv32 virtual memory.
pub mod ptw;

/// Translation Lookaside Buffer (TLB) for caching virtual-to-physical address translations.
pub mod tlb;

use tracing::debug;

use crate::common::{AccessType, PhysAddr, Trap, VirtAddr};
use crate::config::MmuConfig;
use crate::core::arch::csr::{Satp, StatusFlags, TranslationMode};
use crate::core::arch::mode::PrivilegeMode;
use crate::soc::traits::PhysMemory;
use crate::stats::MmuStats;

use self::tlb::{Tlb, TlbKind};

/// Memory Management Unit (MMU) for virtual-to-physical address translation.
///
/// Owns the TLB controller together with the `satp` and `sstatus` state the
/// page-table walker depends on.
#[derive(Clone, Debug)]
pub struct Mmu {
    /// Split instruction/data TLB.
    tlb: Tlb,
    /// Current address translation register.
    satp: Satp,
    /// SUM/MXR bits latched from `sstatus`.
    status: StatusFlags,
    /// Page-table walks started after a miss.
    walks: u64,
    /// Walks that ended in a trap.
    faults: u64,
}

impl Mmu {
    /// Creates a new MMU with independently sized instruction and data TLBs.
    ///
    /// Translation starts in Bare mode.
    ///
    /// # Panics
    ///
    /// Panics if either size is zero.
    pub fn new(itlb_size: usize, dtlb_size: usize) -> Self {
        Self {
            tlb: Tlb::with_capacities(itlb_size, dtlb_size),
            satp: Satp::default(),
            status: StatusFlags::default(),
            walks: 0,
            faults: 0,
        }
    }

    /// Creates an MMU sized from the `mmu` configuration section.
    ///
    /// # Panics
    ///
    /// Panics if either size is zero; `Config::validate` rejects such
    /// configurations.
    pub fn from_config(config: &MmuConfig) -> Self {
        Self::new(config.itlb_size, config.dtlb_size)
    }

    /// Translates a virtual address to a physical address.
    ///
    /// Machine mode and Bare mode bypass translation. Otherwise the TLB set
    /// serving `access` is consulted and, on a miss, the page tables in `mem`
    /// are walked and the result is cached.
    ///
    /// Cached user pages only serve User mode. A Supervisor access to a user
    /// page with SUM set therefore never hits: every such access walks again
    /// and refills the entry in place, which counts as a replacement.
    ///
    /// # Arguments
    ///
    /// * `vaddr` - Virtual address to translate
    /// * `access` - Type of access (Fetch, Read, Write)
    /// * `privilege` - Current privilege mode
    /// * `mem` - Physical memory holding the page tables
    ///
    /// # Errors
    ///
    /// Returns the page fault or access fault raised by the walker.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvemu_core::Mmu;
    /// use rvemu_core::common::{AccessType, VirtAddr};
    /// use rvemu_core::core::arch::mode::PrivilegeMode;
    /// use rvemu_core::soc::Memory;
    ///
    /// let mut mmu = Mmu::new(8, 8);
    /// let mut mem = Memory::new(0, 0x1000);
    ///
    /// // Bare mode: addresses pass through without translation.
    /// let paddr = mmu
    ///     .translate(VirtAddr::new(0x8000_0000), AccessType::Fetch, PrivilegeMode::Supervisor, &mut mem)
    ///     .unwrap();
    /// assert_eq!(paddr.val(), 0x8000_0000);
    /// ```
    pub fn translate<M: PhysMemory + ?Sized>(
        &mut self,
        vaddr: VirtAddr,
        access: AccessType,
        privilege: PrivilegeMode,
        mem: &mut M,
    ) -> Result<PhysAddr, Trap> {
        if privilege == PrivilegeMode::Machine || self.satp.mode() == TranslationMode::Bare {
            return Ok(PhysAddr::new(vaddr.val()));
        }

        let kind = TlbKind::for_access(access);
        if let Some(paddr) = self.tlb.lookup(kind, vaddr, access, privilege) {
            return Ok(paddr);
        }

        self.walks += 1;
        let walk = ptw::page_table_walk(mem, self.satp, self.status, vaddr, access, privilege)
            .inspect_err(|trap| {
                self.faults += 1;
                debug!(%kind, vaddr = %vaddr, cause = trap.cause(), "translation fault");
            })?;

        self.tlb
            .refill(kind, vaddr, walk.ppn, walk.rights, walk.level);
        Ok(walk.translate(vaddr))
    }

    /// Returns the current `satp`.
    pub const fn satp(&self) -> Satp {
        self.satp
    }

    /// Writes `satp`, flushing both TLB sets when the value changes.
    pub fn write_satp(&mut self, raw: u32) {
        let satp = Satp::new(raw);
        if satp == self.satp {
            return;
        }
        debug!(
            old = format_args!("{:#010x}", self.satp.raw()),
            new = format_args!("{raw:#010x}"),
            mode = ?satp.mode(),
            asid = satp.asid(),
            "satp write"
        );
        self.satp = satp;
        self.tlb.flush(Some(satp.asid()), None);
    }

    /// Returns the latched SUM/MXR flags.
    pub const fn status(&self) -> StatusFlags {
        self.status
    }

    /// Latches SUM and MXR from a raw `sstatus` value.
    pub const fn write_sstatus(&mut self, raw: u32) {
        self.status = StatusFlags::from_sstatus(raw);
    }

    /// Executes `SFENCE.VMA`.
    ///
    /// `None` operands stand for `rs1 = x0` / `rs2 = x0`. Both sets are
    /// flushed in full whatever the operands are.
    pub fn sfence_vma(&mut self, vaddr: Option<VirtAddr>, asid: Option<u16>) {
        self.tlb.flush(asid, vaddr);
    }

    /// Flushes both TLB sets if the privilege mode actually changes.
    pub fn change_privilege(&mut self, from: PrivilegeMode, to: PrivilegeMode) {
        if from != to {
            debug!(%from, %to, "privilege change");
            self.tlb.flush(None, None);
        }
    }

    /// Returns the TLB controller.
    pub const fn tlb(&self) -> &Tlb {
        &self.tlb
    }

    /// Returns the TLB controller mutably.
    pub const fn tlb_mut(&mut self) -> &mut Tlb {
        &mut self.tlb
    }

    /// Returns a snapshot of the translation counters.
    pub fn stats(&self) -> MmuStats {
        MmuStats {
            itlb: self.tlb.stats(TlbKind::Instruction).clone(),
            dtlb: self.tlb.stats(TlbKind::Data).clone(),
            walks: self.walks,
            faults: self.faults,
        }
    }

    /// Tears the MMU down, releasing the TLB storage.
    pub fn shutdown(self) {
        debug!(walks = self.walks, faults = self.faults, "mmu shutdown");
        self.tlb.delete();
    }
}
