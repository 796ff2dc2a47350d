//! Translation Entry Tests.
//!
//! Verifies tag derivation, page containment at both levels, offset splicing,
//! and the privilege/permission rules a lookup applies to one entry.

use rstest::rstest;
use rvemu_core::common::{AccessRights, AccessType, PageLevel, PhysAddr, VirtAddr};
use rvemu_core::core::arch::mode::PrivilegeMode;
use rvemu_core::core::units::mmu::tlb::TlbEntry;

const RWX: AccessRights = AccessRights::from_bits(0b1110);

#[test]
fn default_entry_is_invalid() {
    let entry = TlbEntry::default();
    assert!(!entry.is_valid());
    assert!(!entry.matches(VirtAddr::new(0)));
}

#[test]
fn new_entry_is_valid_with_aligned_tag() {
    let entry = TlbEntry::new(
        VirtAddr::new(0x0000_1ABC),
        PhysAddr::new(0x0000_A000),
        AccessRights::READ,
        PageLevel::Base,
    );
    assert!(entry.is_valid());
    assert_eq!(entry.vpn(), 0x0000_1000);
    assert_eq!(entry.ppn(), PhysAddr::new(0x0000_A000));
    assert_eq!(entry.level(), PageLevel::Base);
    assert_eq!(entry.rights(), AccessRights::READ);
}

#[test]
fn base_page_matches_only_its_page() {
    let entry = TlbEntry::new(
        VirtAddr::new(0x0000_1000),
        PhysAddr::new(0x0000_A000),
        RWX,
        PageLevel::Base,
    );
    assert!(entry.matches(VirtAddr::new(0x0000_1000)));
    assert!(entry.matches(VirtAddr::new(0x0000_1FFF)));
    assert!(!entry.matches(VirtAddr::new(0x0000_2000)));
    assert!(!entry.matches(VirtAddr::new(0x0000_0FFF)));
}

#[test]
fn superpage_matches_whole_4m_region() {
    let entry = TlbEntry::new(
        VirtAddr::new(0x0040_0000),
        PhysAddr::new(0x0080_0000),
        RWX,
        PageLevel::Super,
    );
    assert!(entry.matches(VirtAddr::new(0x0040_0000)));
    assert!(entry.matches(VirtAddr::new(0x0041_2345)));
    assert!(entry.matches(VirtAddr::new(0x007F_FFFF)));
    assert!(!entry.matches(VirtAddr::new(0x0080_0000)));
    assert_eq!(
        entry.translate(VirtAddr::new(0x0041_2345)),
        PhysAddr::new(0x0081_2345)
    );
}

#[test]
fn translate_splices_base_offset() {
    let entry = TlbEntry::new(
        VirtAddr::new(0x0000_3000),
        PhysAddr::new(0x0000_C000),
        RWX,
        PageLevel::Base,
    );
    assert_eq!(
        entry.translate(VirtAddr::new(0x0000_3ABC)),
        PhysAddr::new(0x0000_CABC)
    );
}

#[rstest]
#[case(AccessRights::USER, PrivilegeMode::User, true)]
#[case(AccessRights::USER, PrivilegeMode::Supervisor, false)]
#[case(AccessRights::USER, PrivilegeMode::Machine, false)]
#[case(AccessRights::NONE, PrivilegeMode::User, false)]
#[case(AccessRights::NONE, PrivilegeMode::Supervisor, true)]
#[case(AccessRights::NONE, PrivilegeMode::Machine, true)]
fn privilege_isolation(
    #[case] user_bit: AccessRights,
    #[case] privilege: PrivilegeMode,
    #[case] expected: bool,
) {
    let entry = TlbEntry::new(
        VirtAddr::new(0x1000),
        PhysAddr::new(0xA000),
        RWX | user_bit,
        PageLevel::Base,
    );
    assert_eq!(entry.permits(AccessType::Read, privilege), expected);
}

#[rstest]
#[case(AccessType::Fetch, false)]
#[case(AccessType::Read, true)]
#[case(AccessType::Write, false)]
fn permits_checks_required_right(#[case] access: AccessType, #[case] expected: bool) {
    let entry = TlbEntry::new(
        VirtAddr::new(0x1000),
        PhysAddr::new(0xA000),
        AccessRights::READ,
        PageLevel::Base,
    );
    assert_eq!(entry.permits(access, PrivilegeMode::Supervisor), expected);
}
