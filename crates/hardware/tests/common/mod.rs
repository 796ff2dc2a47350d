/// Test context owning an MMU, RAM and a page-table builder.
pub mod harness;
