// Main library entry point for strictc.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;
