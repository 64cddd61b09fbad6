//! Output formatting

pub mod console;
pub mod currency;
pub mod formatter;
