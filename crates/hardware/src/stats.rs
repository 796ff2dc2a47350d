//! Translation statistics collection and reporting.
//!
//! This module tracks how the address-translation path behaves. It provides:
//! 1. **Per-set counters:** Lookups, hits, misses, refills, in-place replacements, evictions, flushes.
//! 2. **MMU counters:** Page-table walks performed and faults raised.
//! 3. **Reporting:** A JSON export via `serde_json` and a plain-text report.

use serde::Serialize;

/// Counters for one translation set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TlbStats {
    /// Lookups issued against the set.
    pub lookups: u64,
    /// Lookups that returned a physical address.
    pub hits: u64,
    /// Lookups that missed.
    pub misses: u64,
    /// Refill calls, including in-place replacements.
    pub refills: u64,
    /// Refills that updated an already cached page.
    pub replacements: u64,
    /// Entries evicted to make room.
    pub evictions: u64,
    /// Flushes applied to the set.
    pub flushes: u64,
}

impl TlbStats {
    /// Records the result of one lookup.
    #[inline(always)]
    pub const fn record_lookup(&mut self, hit: bool) {
        self.lookups += 1;
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }

    /// Fraction of lookups that hit, or `0.0` before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        if self.lookups == 0 {
            0.0
        } else {
            self.hits as f64 / self.lookups as f64
        }
    }

    /// Percentage of lookups that missed, or `0.0` before the first lookup.
    pub fn miss_percent(&self) -> f64 {
        if self.lookups == 0 {
            0.0
        } else {
            self.hit_rate().mul_add(-100.0, 100.0)
        }
    }
}

/// Snapshot of the whole translation path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MmuStats {
    /// Instruction TLB counters.
    pub itlb: TlbStats,
    /// Data TLB counters.
    pub dtlb: TlbStats,
    /// Page-table walks started after a TLB miss.
    pub walks: u64,
    /// Walks that ended in a trap.
    pub faults: u64,
}

impl MmuStats {
    /// Serializes the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Prints the statistics report to stdout.
    pub fn print(&self) {
        let print_tlb = |name: &str, s: &TlbStats| {
            println!(
                "  {:<5} lookups: {:<10} | hits: {:<10} | miss_rate: {:.2}% | evictions: {:<8} | flushes: {}",
                name,
                s.lookups,
                s.hits,
                s.miss_percent(),
                s.evictions,
                s.flushes
            );
        };
        println!("\n==========================================================");
        println!("ADDRESS TRANSLATION STATISTICS");
        println!("==========================================================");
        print_tlb("iTLB", &self.itlb);
        print_tlb("dTLB", &self.dtlb);
        println!("----------------------------------------------------------");
        println!("  ptw.walks              {}", self.walks);
        println!("  ptw.faults             {}", self.faults);
        println!("==========================================================");
    }
}
