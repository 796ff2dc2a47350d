//! RISC-V architecture-specific components.
//!
//! This module contains the architectural state address translation reads:
//! 1. **CSRs:** `satp` decoding and the `sstatus` SUM/MXR bits.
//! 2. **Modes:** Privilege mode definitions.

/// Translation-related Control and Status Register definitions.
pub mod csr;

/// Privilege mode definitions.
pub mod mode;
