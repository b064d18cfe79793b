//! Use cases - User story orchestration.
//!
//! Each module contains use cases for one entry point. Use cases
//! orchestrate the session layer and the ports to fulfill a command or a
//! button press.

pub mod components;
pub mod fractals;

pub use components::ComponentUseCases;
pub use fractals::FractalUseCases;
