pub mod delivery;
pub mod format;
pub mod log;
