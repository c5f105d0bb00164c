#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Julia set renderer
//!
//! A Julia set is drawn by taking every point of a window on the
//! complex plane, repeatedly squaring it and adding a fixed constant,
//! and watching whether the result stays near the origin.  Points that
//! stay bounded belong to the set; the rest escape toward infinity at
//! varying speeds, and that speed is what gets shaded.
//!
//! This crate always runs the full iteration budget for every pixel and
//! counts how many of those steps stayed inside the disc of radius two.
//! The square root of that count is the pixel's score.  Since every
//! pixel costs the same, the work splits evenly across threads, and the
//! crate exists mostly to time that split: the grid is divided into
//! bands of rows, one per worker, and the compute time is reported
//! alongside the finished grid.

pub mod bands;
pub mod config;
pub mod encode;
pub mod errors;
pub mod grid;
pub mod kernel;
pub mod planes;

pub use config::{DisplayRange, JuliaConfig};
pub use errors::{JuliaError, Result};
pub use grid::{compute, Grid, GridComputer};
pub use kernel::score;
