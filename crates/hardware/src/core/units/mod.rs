//! Functional units.
//!
//! This module contains the memory management unit, which owns the instruction
//! and data TLBs and the page-table walker that refills them.

/// Memory Management Unit with TLB and page table walker.
pub mod mmu;
