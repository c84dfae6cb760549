//! CLI command implementations

pub mod assess;
pub mod inspect;
pub mod label;
pub mod train;
