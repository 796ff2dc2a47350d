/// Single translation entries.
pub mod entry;
