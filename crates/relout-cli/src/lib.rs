//! CLI library components for the relation output decoder.

pub mod logging;
