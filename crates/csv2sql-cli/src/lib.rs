//! Library components of the csv2sql CLI.

pub mod logging;
pub mod pipeline;
pub mod types;
