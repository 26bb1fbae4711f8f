//! Common types shared by the store documents

pub mod loose;

pub use loose::{is_set, Flag};
