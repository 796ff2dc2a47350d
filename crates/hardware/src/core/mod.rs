//! Core processor state.
//!
//! This module contains the parts of the CPU core that take part in address
//! translation: the architectural state the MMU consults and the MMU itself.

/// Architecture-specific components (translation CSRs, privilege modes).
pub mod arch;

/// Functional units (MMU with TLB and page-table walker).
pub mod units;
