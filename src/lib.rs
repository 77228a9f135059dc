//! Hypercube - N-dimensional wireframe viewer
//!
//! Application layer around [`hypercube_core`]: layered configuration and
//! the headless systems used by the driver binary.

pub mod config;
pub mod systems;
