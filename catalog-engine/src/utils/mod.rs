//! Engine utilities

pub mod logger;
