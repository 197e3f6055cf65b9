//! Handler utilities

pub mod logging;
