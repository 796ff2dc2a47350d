use std::io;
use std::sync::{Arc, Mutex};

use rvemu_core::Mmu;
use rvemu_core::common::{AccessType, PhysAddr, Trap, VirtAddr};
use rvemu_core::config::MemoryConfig;
use rvemu_core::core::arch::csr::{Satp, TranslationMode};
use rvemu_core::core::arch::mode::PrivilegeMode;
use rvemu_core::soc::{Memory, PhysMemory};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Physical address of the root page table built by `TestContext`.
pub const ROOT_TABLE: u32 = 0x0001_0000;
/// Second-level tables are allocated upwards from here.
pub const TABLE_POOL: u32 = 0x0002_0000;
/// RAM backing the page tables.
pub const RAM_SIZE: usize = 0x0010_0000;
/// ASID written to `satp` by `TestContext::new`.
pub const TEST_ASID: u16 = 1;

pub const V: u32 = 1 << 0;
pub const R: u32 = 1 << 1;
pub const W: u32 = 1 << 2;
pub const X: u32 = 1 << 3;
pub const U: u32 = 1 << 4;
pub const A: u32 = 1 << 6;
pub const D: u32 = 1 << 7;

/// Installs a `tracing` subscriber once per test binary; `RUST_LOG` selects verbosity.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// In-memory sink for log lines written by `capture_logs`.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a thread-local DEBUG subscriber and returns what it logged.
pub fn capture_logs(f: impl FnOnce()) -> String {
    let buffer = LogBuffer::default();
    let sink = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || sink.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = buffer.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

/// Builds a valid PTE pointing at the page containing `paddr`.
pub const fn make_pte(paddr: u32, flags: u32) -> u32 {
    ((paddr >> 12) << 10) | flags | V
}

pub struct TestContext {
    pub mmu: Mmu,
    pub mem: Memory,
    next_table: u32,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Small TLBs so tests can force evictions, Sv32 enabled.
    pub fn new() -> Self {
        Self::with_tlb_sizes(4, 4)
    }

    pub fn with_tlb_sizes(itlb: usize, dtlb: usize) -> Self {
        init_logging();

        let mut mmu = Mmu::new(itlb, dtlb);
        let satp = Satp::from_parts(TranslationMode::Sv32, TEST_ASID, ROOT_TABLE >> 12);
        mmu.write_satp(satp.raw());

        Self {
            mmu,
            mem: Memory::from_config(&MemoryConfig {
                ram_base: 0,
                ram_size: RAM_SIZE,
            }),
            next_table: TABLE_POOL,
        }
    }

    /// Maps the 4 KiB page containing `vaddr` to `paddr`, allocating the
    /// second-level table on first use. Returns the leaf PTE's address.
    pub fn map_page(&mut self, vaddr: u32, paddr: u32, flags: u32) -> u32 {
        let va = VirtAddr::new(vaddr);
        let root_slot = ROOT_TABLE + va.vpn_field(1) * 4;
        let root_pte = self.read_pte(root_slot);

        let table = if root_pte & V == 0 {
            let table = self.next_table;
            self.next_table += 0x1000;
            self.write_pte(root_slot, make_pte(table, 0));
            table
        } else {
            (root_pte >> 10) << 12
        };

        let leaf_slot = table + va.vpn_field(0) * 4;
        self.write_pte(leaf_slot, make_pte(paddr, flags));
        leaf_slot
    }

    /// Maps the 4 MiB superpage containing `vaddr` to `paddr` with a root-level
    /// leaf. Returns the leaf PTE's address.
    pub fn map_superpage(&mut self, vaddr: u32, paddr: u32, flags: u32) -> u32 {
        let root_slot = ROOT_TABLE + VirtAddr::new(vaddr).vpn_field(1) * 4;
        self.write_pte(root_slot, make_pte(paddr, flags));
        root_slot
    }

    pub fn read_pte(&mut self, addr: u32) -> u32 {
        self.mem.read_u32(PhysAddr::new(addr)).unwrap()
    }

    pub fn write_pte(&mut self, addr: u32, pte: u32) {
        self.mem.write_u32(PhysAddr::new(addr), pte).unwrap();
    }

    pub fn translate(
        &mut self,
        vaddr: u32,
        access: AccessType,
        privilege: PrivilegeMode,
    ) -> Result<u32, Trap> {
        self.mmu
            .translate(VirtAddr::new(vaddr), access, privilege, &mut self.mem)
            .map(PhysAddr::val)
    }

    /// Supervisor-mode translation.
    pub fn translate_s(&mut self, vaddr: u32, access: AccessType) -> Result<u32, Trap> {
        self.translate(vaddr, access, PrivilegeMode::Supervisor)
    }
}
