pub mod check;
pub mod common;
pub mod complete;
pub mod format;
pub mod resolve;
