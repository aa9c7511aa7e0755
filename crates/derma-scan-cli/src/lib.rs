//! Library surface of the derma-scan CLI.
//!
//! The binary in `main.rs` is a thin shell over these modules; exposing
//! them as a library lets integration tests drive the screening loop
//! with mock ports instead of real weights and photos.

pub mod commands;
pub mod config;
pub mod output;
