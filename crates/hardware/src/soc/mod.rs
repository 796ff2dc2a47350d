//! Physical memory components.
//!
//! This module holds what sits on the physical side of the MMU: the
//! `PhysMemory` trait the page-table walker reads and updates PTEs through,
//! and a flat RAM implementing it.

/// Flat little-endian RAM.
pub mod memory;

/// Physical memory access trait.
pub mod traits;

pub use memory::Memory;
pub use traits::PhysMemory;
