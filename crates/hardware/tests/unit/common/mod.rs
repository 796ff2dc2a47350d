/// Virtual/physical address helpers.
pub mod addr;
