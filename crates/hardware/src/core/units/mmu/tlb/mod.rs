//! Translation Lookaside Buffer (TLB).
//!
//! The TLB caches virtual-to-physical translations so the MMU only walks the
//! page tables on a miss. It owns two independent translation sets, one for
//! instruction fetches and one for data accesses; a refill or eviction in one
//! never touches the other.
//!
//! The controller picks the set by [`TlbKind`], forwards lookups and refills,
//! flushes both sets together, and keeps per-set [`TlbStats`].

/// A single cached translation.
pub mod entry;

/// Bounded FIFO storage for one translation set.
pub mod set;

pub use entry::TlbEntry;
pub use set::{RefillOutcome, TranslationSet};

use std::fmt;

use tracing::{debug, trace};

use crate::common::{AccessRights, AccessType, PageLevel, PhysAddr, VirtAddr};
use crate::core::arch::mode::PrivilegeMode;
use crate::stats::TlbStats;

/// Selects which translation set serves an access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TlbKind {
    /// Instruction TLB (iTLB), used for fetches.
    Instruction,
    /// Data TLB (dTLB), used for loads and stores.
    Data,
}

impl TlbKind {
    /// Returns the set that serves `access`.
    #[inline(always)]
    pub const fn for_access(access: AccessType) -> Self {
        match access {
            AccessType::Fetch => Self::Instruction,
            AccessType::Read | AccessType::Write => Self::Data,
        }
    }

    /// Short lowercase name, as used in logs and configuration.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Instruction => "itlb",
            Self::Data => "dtlb",
        }
    }
}

impl fmt::Display for TlbKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// TLB controller owning the instruction and data translation sets.
#[derive(Clone, Debug)]
pub struct Tlb {
    /// Instruction translation set.
    itlb: TranslationSet,
    /// Data translation set.
    dtlb: TranslationSet,
    /// Instruction set counters.
    itlb_stats: TlbStats,
    /// Data set counters.
    dtlb_stats: TlbStats,
}

impl Tlb {
    /// Creates a TLB whose instruction and data sets each hold `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        Self::with_capacities(capacity, capacity)
    }

    /// Creates a TLB with independently sized instruction and data sets.
    ///
    /// # Panics
    ///
    /// Panics if either capacity is zero.
    pub fn with_capacities(itlb_capacity: usize, dtlb_capacity: usize) -> Self {
        debug!(itlb_capacity, dtlb_capacity, "tlb created");
        Self {
            itlb: TranslationSet::new(itlb_capacity),
            dtlb: TranslationSet::new(dtlb_capacity),
            itlb_stats: TlbStats::default(),
            dtlb_stats: TlbStats::default(),
        }
    }

    /// Returns a read-only view of one translation set.
    #[inline]
    pub const fn set(&self, kind: TlbKind) -> &TranslationSet {
        match kind {
            TlbKind::Instruction => &self.itlb,
            TlbKind::Data => &self.dtlb,
        }
    }

    /// Returns the counters of one translation set.
    #[inline]
    pub const fn stats(&self, kind: TlbKind) -> &TlbStats {
        match kind {
            TlbKind::Instruction => &self.itlb_stats,
            TlbKind::Data => &self.dtlb_stats,
        }
    }

    /// Zeroes the counters of both sets.
    pub fn reset_stats(&mut self) {
        self.itlb_stats = TlbStats::default();
        self.dtlb_stats = TlbStats::default();
    }

    #[inline(always)]
    const fn parts_mut(&mut self, kind: TlbKind) -> (&mut TranslationSet, &mut TlbStats) {
        match kind {
            TlbKind::Instruction => (&mut self.itlb, &mut self.itlb_stats),
            TlbKind::Data => (&mut self.dtlb, &mut self.dtlb_stats),
        }
    }

    /// Looks up `vaddr` in the set selected by `kind` and counts the result.
    ///
    /// # Returns
    ///
    /// The physical address on a hit; `None` on a miss, after which the caller
    /// walks the page tables and calls [`Tlb::refill`].
    #[inline]
    pub fn lookup(
        &mut self,
        kind: TlbKind,
        vaddr: VirtAddr,
        access: AccessType,
        privilege: PrivilegeMode,
    ) -> Option<PhysAddr> {
        let (set, stats) = self.parts_mut(kind);
        let paddr = set.lookup(vaddr, access, privilege);
        stats.record_lookup(paddr.is_some());
        paddr
    }

    /// Looks up `vaddr` without touching the counters.
    pub fn peek(
        &self,
        kind: TlbKind,
        vaddr: VirtAddr,
        access: AccessType,
        privilege: PrivilegeMode,
    ) -> Option<PhysAddr> {
        self.set(kind).lookup(vaddr, access, privilege)
    }

    /// Caches a walker result in the set selected by `kind`.
    ///
    /// Evicts the oldest entry of that set first when it is full. `ppn` must
    /// already be aligned to `level`.
    pub fn refill(
        &mut self,
        kind: TlbKind,
        vaddr: VirtAddr,
        ppn: PhysAddr,
        rights: AccessRights,
        level: PageLevel,
    ) {
        let (set, stats) = self.parts_mut(kind);
        let outcome = set.refill(vaddr, ppn, rights, level);
        stats.refills += 1;
        match outcome {
            RefillOutcome::Inserted => {
                trace!(%kind, vaddr = %vaddr, ppn = %ppn, %level, ?rights, "tlb refill");
            }
            RefillOutcome::Replaced => {
                stats.replacements += 1;
                trace!(%kind, vaddr = %vaddr, ppn = %ppn, %level, ?rights, "tlb entry replaced");
            }
            RefillOutcome::Evicted(victim) => {
                stats.evictions += 1;
                trace!(
                    %kind,
                    vaddr = %vaddr,
                    ppn = %ppn,
                    %level,
                    victim_vpn = %VirtAddr::new(victim.vpn()),
                    victim_level = %victim.level(),
                    "tlb refill evicted oldest entry"
                );
            }
        }
    }

    /// Flushes both translation sets.
    ///
    /// Every entry of both sets is invalidated whatever `asid` and `vaddr`
    /// are; they are recorded for tracing only. `None` means the operand was
    /// not named and the flush covers all address spaces or all addresses.
    pub fn flush(&mut self, asid: Option<u16>, vaddr: Option<VirtAddr>) {
        let itlb = self.itlb.flush(asid, vaddr);
        let dtlb = self.dtlb.flush(asid, vaddr);
        self.itlb_stats.flushes += 1;
        self.dtlb_stats.flushes += 1;
        debug!(?asid, ?vaddr, itlb, dtlb, "tlb flush");
    }

    /// Releases both sets' storage.
    ///
    /// Consumes the controller, so no entry can be referenced afterwards.
    pub fn delete(mut self) {
        debug!(
            itlb_resident = self.itlb.len(),
            dtlb_resident = self.dtlb.len(),
            "tlb deleted"
        );
        self.itlb.clear();
        self.dtlb.clear();
    }
}
