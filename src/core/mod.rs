/// Writer abstraction shared by every output format
pub mod item;
