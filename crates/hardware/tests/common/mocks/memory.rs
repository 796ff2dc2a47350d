use mockall::mock;
use rvemu_core::common::{BusError, PhysAddr};
use rvemu_core::soc::PhysMemory;

mock! {
    pub PhysMem {}
    impl PhysMemory for PhysMem {
        fn read_u32(&mut self, paddr: PhysAddr) -> Result<u32, BusError>;
        fn write_u32(&mut self, paddr: PhysAddr, val: u32) -> Result<(), BusError>;
    }
}
