//! Mock servers for exercising clients end to end.

pub mod network;

pub use network::*;
