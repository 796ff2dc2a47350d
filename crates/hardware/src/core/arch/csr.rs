//! Translation-related Control and Status Registers.
//!
//! Only the CSR state that address translation depends on lives here:
//! 1. **SATP:** Translation mode, address-space identifier and root page-table PPN (Sv32 layout).
//! 2. **SSTATUS:** The SUM and MXR bits consulted by the page-table walker.

/// Supervisor user memory access bit in `sstatus`.
pub const SSTATUS_SUM: u32 = 1 << 18;

/// Make executable readable bit in `sstatus`.
pub const SSTATUS_MXR: u32 = 1 << 19;

/// Bit shift for the translation mode field in `satp`.
pub const SATP_MODE_SHIFT: u32 = 31;

/// Bare (no address translation) mode value for `satp`.
pub const SATP_MODE_BARE: u32 = 0;

/// Sv32 (32-bit virtual address, two-level tables) mode value for `satp`.
pub const SATP_MODE_SV32: u32 = 1;

/// Bit shift for the ASID field in `satp`.
pub const SATP_ASID_SHIFT: u32 = 22;

/// Bit mask for the ASID field in `satp` (after shifting).
pub const SATP_ASID_MASK: u32 = 0x1FF;

/// Physical page number mask in `satp`.
pub const SATP_PPN_MASK: u32 = 0x003F_FFFF;

/// Address translation mode selected by `satp.MODE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TranslationMode {
    /// No translation; virtual addresses are physical addresses.
    Bare,
    /// Two-level Sv32 paging.
    Sv32,
}

/// Decoded Sv32 `satp` register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Satp(u32);

impl Satp {
    /// Creates a `satp` value from the raw register contents.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Builds a `satp` value from its fields.
    pub const fn from_parts(mode: TranslationMode, asid: u16, ppn: u32) -> Self {
        let mode_bit = match mode {
            TranslationMode::Bare => SATP_MODE_BARE,
            TranslationMode::Sv32 => SATP_MODE_SV32,
        };
        Self(
            (mode_bit << SATP_MODE_SHIFT)
                | ((asid as u32 & SATP_ASID_MASK) << SATP_ASID_SHIFT)
                | (ppn & SATP_PPN_MASK),
        )
    }

    /// Returns the raw register value.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the translation mode.
    pub const fn mode(self) -> TranslationMode {
        if (self.0 >> SATP_MODE_SHIFT) == SATP_MODE_SV32 {
            TranslationMode::Sv32
        } else {
            TranslationMode::Bare
        }
    }

    /// Returns the address-space identifier.
    pub const fn asid(self) -> u16 {
        ((self.0 >> SATP_ASID_SHIFT) & SATP_ASID_MASK) as u16
    }

    /// Returns the physical page number of the root page table.
    pub const fn ppn(self) -> u32 {
        self.0 & SATP_PPN_MASK
    }
}

/// The `sstatus` bits that change how leaf PTE permissions are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusFlags {
    /// SUM: supervisor may load/store user pages.
    pub sum: bool,
    /// MXR: loads may read execute-only pages.
    pub mxr: bool,
}

impl StatusFlags {
    /// Extracts SUM and MXR from a raw `sstatus` (or `mstatus`) value.
    pub const fn from_sstatus(sstatus: u32) -> Self {
        Self {
            sum: sstatus & SSTATUS_SUM != 0,
            mxr: sstatus & SSTATUS_MXR != 0,
        }
    }
}
