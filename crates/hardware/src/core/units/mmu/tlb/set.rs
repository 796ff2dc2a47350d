//! Translation set: bounded FIFO storage for TLB entries.
//!
//! Each set is fully associative and evicts in insertion order. Storage is a
//! fixed ring of slots with `head`/`len` indices, so eviction is O(1) and a
//! lookup scans at most `capacity` slots.
//!
//! # Entry lifecycle
//!
//! An entry is appended valid on refill, marked invalid by a flush (the slot
//! stays resident and counted), and leaves the set when it reaches the FIFO
//! head and is evicted, or when the set is cleared.

use tracing::trace;

use super::entry::TlbEntry;
use crate::common::{AccessRights, AccessType, PageLevel, PhysAddr, VirtAddr};
use crate::core::arch::mode::PrivilegeMode;

/// Result of a refill, reported back so the controller can keep statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefillOutcome {
    /// A new entry was appended to a set that had room.
    Inserted,
    /// A valid entry for the same page and level was updated in place.
    Replaced,
    /// The set was full; the returned FIFO head was evicted before appending.
    Evicted(TlbEntry),
}

/// One independent translation cache (instruction or data).
#[derive(Clone, Debug)]
pub struct TranslationSet {
    /// Ring storage; its length is the capacity.
    slots: Vec<TlbEntry>,
    /// Slot index of the oldest resident entry.
    head: usize,
    /// Number of resident entries (valid or flushed).
    len: usize,
}

impl TranslationSet {
    /// Creates an empty set holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. `Config::validate` rejects that before
    /// any set is built.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "translation set capacity must be non-zero");
        Self {
            slots: vec![TlbEntry::default(); capacity],
            head: 0,
            len: 0,
        }
    }

    /// Maximum number of resident entries.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of resident entries, including flushed ones that have not aged out.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no entries are resident.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if the next refill of a new page must evict.
    #[inline]
    pub const fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Number of resident entries that are still valid.
    pub fn valid_len(&self) -> usize {
        self.iter().filter(|e| e.is_valid()).count()
    }

    /// Iterates resident entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &TlbEntry> + '_ {
        (0..self.len)
            .map(move |pos| &self.slots[self.slot_index(pos)])
    }

    /// Maps a FIFO position (0 = oldest) to a slot index.
    #[inline(always)]
    const fn slot_index(&self, pos: usize) -> usize {
        let idx = self.head + pos;
        if idx >= self.slots.len() {
            idx - self.slots.len()
        } else {
            idx
        }
    }

    /// Finds the slot of the valid entry caching exactly `(vpn, level)`.
    fn find_page(&self, vpn: u32, level: PageLevel) -> Option<usize> {
        (0..self.len)
            .map(|pos| self.slot_index(pos))
            .find(|&idx| self.slots[idx].is_same_page(vpn, level))
    }

    /// Looks up `vaddr` for the given access and privilege.
    ///
    /// Every resident entry is considered with its own page level, so base
    /// pages and superpages coexist in one set. A hit needs a valid entry whose
    /// page contains `vaddr`, whose rights include `access`, and whose U bit
    /// agrees with `privilege`.
    ///
    /// # Returns
    ///
    /// The physical address (`ppn | offset`) on a hit, `None` on a miss.
    #[inline]
    pub fn lookup(
        &self,
        vaddr: VirtAddr,
        access: AccessType,
        privilege: PrivilegeMode,
    ) -> Option<PhysAddr> {
        self.iter()
            .find(|e| e.matches(vaddr) && e.permits(access, privilege))
            .map(|e| e.translate(vaddr))
    }

    /// Caches the translation of the `level`-sized page containing `vaddr`.
    ///
    /// A valid entry for the same `(vpn, level)` is updated in place and keeps
    /// its FIFO position. Otherwise the oldest entry is evicted if the set is
    /// full and the new entry is appended as the newest.
    ///
    /// `ppn` must have its `level` offset bits cleared.
    pub fn refill(
        &mut self,
        vaddr: VirtAddr,
        ppn: PhysAddr,
        rights: AccessRights,
        level: PageLevel,
    ) -> RefillOutcome {
        let vpn = vaddr.page_number(level);
        if let Some(idx) = self.find_page(vpn, level) {
            self.slots[idx].update(ppn, rights);
            return RefillOutcome::Replaced;
        }

        let evicted = if self.is_full() {
            Some(self.evict())
        } else {
            None
        };

        let tail = self.slot_index(self.len);
        self.slots[tail] = TlbEntry::new(vaddr, ppn, rights, level);
        self.len += 1;

        evicted.map_or(RefillOutcome::Inserted, RefillOutcome::Evicted)
    }

    /// Removes and returns the oldest resident entry.
    ///
    /// # Panics
    ///
    /// Panics if the set is empty. Evicting from an empty set means the
    /// refill path lost track of the size; continuing would corrupt it.
    pub fn evict(&mut self) -> TlbEntry {
        assert!(self.len > 0, "evict from an empty translation set");
        let victim = std::mem::take(&mut self.slots[self.head]);
        self.head = self.slot_index(1);
        self.len -= 1;
        victim
    }

    /// Invalidates every resident entry.
    ///
    /// `asid` and `vaddr` identify the `SFENCE.VMA` operands, with `None` for
    /// an `x0` operand (all address spaces or all addresses). Entries carry no
    /// ASID tag, so the whole set is invalidated regardless of them. Slots stay
    /// resident until they age out of the FIFO.
    ///
    /// # Returns
    ///
    /// The number of entries that were valid before the flush.
    pub fn flush(&mut self, asid: Option<u16>, vaddr: Option<VirtAddr>) -> usize {
        let mut invalidated = 0;
        for pos in 0..self.len {
            let idx = self.slot_index(pos);
            let entry = &mut self.slots[idx];
            if entry.is_valid() {
                entry.invalidate();
                invalidated += 1;
            }
        }
        trace!(?asid, ?vaddr, invalidated, "translation set flushed");
        invalidated
    }

    /// Drops every resident entry and resets the ring.
    pub fn clear(&mut self) {
        self.slots.fill(TlbEntry::default());
        self.head = 0;
        self.len = 0;
    }
}
