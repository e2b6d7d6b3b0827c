mod common;
pub mod lcu;

pub use common::*;
