//! Address Arithmetic Tests.
//!
//! Verifies page-number and offset splitting for both page levels, Sv32 VPN
//! field extraction, and alignment checks.

use rstest::rstest;
use rvemu_core::common::{PageLevel, PhysAddr, VirtAddr};

#[rstest]
#[case(0x1234_5678, PageLevel::Base, 0x1234_5000, 0x678)]
#[case(0x1234_5678, PageLevel::Super, 0x1200_0000, 0x34_5678)]
#[case(0xFFFF_FFFF, PageLevel::Base, 0xFFFF_F000, 0xFFF)]
#[case(0xFFFF_FFFF, PageLevel::Super, 0xFFC0_0000, 0x3F_FFFF)]
#[case(0, PageLevel::Super, 0, 0)]
fn page_number_and_offset_split(
    #[case] addr: u32,
    #[case] level: PageLevel,
    #[case] vpn: u32,
    #[case] offset: u32,
) {
    let va = VirtAddr::new(addr);
    assert_eq!(va.page_number(level), vpn);
    assert_eq!(va.page_offset(level), offset);
    assert_eq!(va.page_number(level) | va.page_offset(level), addr);
}

#[test]
fn vpn_fields_index_both_levels() {
    // VPN[1] = 0x048, VPN[0] = 0x345
    let va = VirtAddr::new(0x1234_5678);
    assert_eq!(va.vpn_field(1), 0x048);
    assert_eq!(va.vpn_field(0), 0x345);

    let top = VirtAddr::new(0xFFFF_F000);
    assert_eq!(top.vpn_field(1), 0x3FF);
    assert_eq!(top.vpn_field(0), 0x3FF);
}

#[test]
fn phys_alignment_depends_on_level() {
    let base_aligned = PhysAddr::new(0x0000_A000);
    assert!(base_aligned.is_page_aligned(PageLevel::Base));
    assert!(!base_aligned.is_page_aligned(PageLevel::Super));

    let super_aligned = PhysAddr::new(0x0040_0000);
    assert!(super_aligned.is_page_aligned(PageLevel::Base));
    assert!(super_aligned.is_page_aligned(PageLevel::Super));

    let unaligned = PhysAddr::new(0x0000_A004);
    assert!(!unaligned.is_page_aligned(PageLevel::Base));
}

#[test]
fn display_is_zero_padded_hex() {
    assert_eq!(VirtAddr::new(0x1000).to_string(), "0x00001000");
    assert_eq!(PhysAddr::new(0xDEAD_B000).to_string(), "0xdeadb000");
}
