//! Foundation layer shared by every other engine module
//!
//! - `math`: nalgebra aliases, direction constants, affine helpers
//! - `time`: fixed-step frame clock driving the simulation
//! - `logging`: `log` re-exports and binary-side logger setup

pub mod math;
pub mod time;
pub mod logging;
