//! CSV format reading.

mod read;

pub(crate) use read::*;
