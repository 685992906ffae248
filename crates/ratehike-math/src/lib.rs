//! # RateHike Math
//!
//! Numerical routines for the RateHike curve bootstrapping library.
//!
//! This crate provides:
//!
//! - **Solvers**: Brent's bracketed root finder, driven by a mutable
//!   objective so that each trial may update external state (a curve
//!   pillar) before it is evaluated.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::float_cmp)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{brent, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
