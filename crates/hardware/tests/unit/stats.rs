//! # Statistics Tests
//!
//! Verifies hit-rate computation, the MMU snapshot after real translations,
//! and the JSON export.

use crate::common::harness::{A, R, TestContext};
use rvemu_core::common::AccessType;
use rvemu_core::stats::{MmuStats, TlbStats};

#[test]
fn hit_rate_is_zero_before_lookups() {
    assert!(TlbStats::default().hit_rate().abs() < f64::EPSILON);
}

#[test]
fn record_lookup_splits_hits_and_misses() {
    let mut stats = TlbStats::default();
    stats.record_lookup(true);
    stats.record_lookup(true);
    stats.record_lookup(false);
    stats.record_lookup(true);
    assert_eq!(stats.lookups, 4);
    assert_eq!(stats.hits, 3);
    assert_eq!(stats.misses, 1);
    assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
}

#[test]
fn miss_percent_complements_hit_rate() {
    assert!(TlbStats::default().miss_percent().abs() < f64::EPSILON);

    let mut stats = TlbStats::default();
    for hit in [true, true, true, false] {
        stats.record_lookup(hit);
    }
    assert!((stats.miss_percent() - 25.0).abs() < 1e-9);
}

#[test]
fn snapshot_reflects_translations() {
    let mut ctx = TestContext::new();
    let _ = ctx.map_page(0x1000, 0xA000, R | A);
    let _ = ctx.translate_s(0x1000, AccessType::Read);
    let _ = ctx.translate_s(0x1000, AccessType::Read);
    let _ = ctx.translate_s(0x7000, AccessType::Read);

    let stats = ctx.mmu.stats();
    assert_eq!(stats.dtlb.lookups, 3);
    assert_eq!(stats.dtlb.hits, 1);
    assert_eq!(stats.walks, 2);
    assert_eq!(stats.faults, 1);
    assert_eq!(stats.itlb, TlbStats {
        flushes: stats.itlb.flushes,
        ..TlbStats::default()
    });
}

#[test]
fn json_export_contains_every_counter() {
    let stats = MmuStats {
        dtlb: TlbStats {
            lookups: 10,
            hits: 7,
            misses: 3,
            refills: 3,
            replacements: 0,
            evictions: 1,
            flushes: 2,
        },
        walks: 3,
        faults: 0,
        ..MmuStats::default()
    };

    let json: serde_json::Value = serde_json::from_str(&stats.to_json().unwrap()).unwrap();
    assert_eq!(json["dtlb"]["lookups"], 10);
    assert_eq!(json["dtlb"]["evictions"], 1);
    assert_eq!(json["itlb"]["hits"], 0);
    assert_eq!(json["walks"], 3);
    assert_eq!(json["faults"], 0);
}

#[test]
fn print_report_handles_empty_and_populated_stats() {
    MmuStats::default().print();

    let mut ctx = TestContext::new();
    let _ = ctx.map_page(0x1000, 0xA000, R | A);
    let _ = ctx.translate_s(0x1000, AccessType::Read);
    ctx.mmu.stats().print();
}
