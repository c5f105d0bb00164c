// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Run parameters and the string parsers the command line uses to
//! build them.

use crate::errors::{JuliaError, Result};
use num::Complex;
use std::convert::TryFrom;
use std::str::FromStr;

/// The real part of the default Julia constant.
pub const DEFAULT_C_RE: f32 = -0.778;
/// The imaginary part of the default Julia constant.
pub const DEFAULT_C_IM: f32 = -0.116;
/// Default side length of the grid, in pixels.
pub const DEFAULT_SIZE: usize = 1000;
/// Default number of iterations per pixel.
pub const DEFAULT_ITERATIONS: usize = 1000;

/// Everything the grid computer needs to know.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct JuliaConfig {
    /// The constant `c` in `z = z^2 + c`; picks which Julia set is drawn.
    pub constant: Complex<f32>,
    /// Side length of the square grid.
    pub size: usize,
    /// Number of iterations run for every pixel.
    pub iterations: usize,
    /// Number of bands the rows are split into.  This partition count
    /// is never overridden by the number of cores, though the number of
    /// OS threads rendering the bands may be capped.
    pub threads: usize,
}

impl Default for JuliaConfig {
    fn default() -> Self {
        JuliaConfig {
            constant: Complex::new(DEFAULT_C_RE, DEFAULT_C_IM),
            size: DEFAULT_SIZE,
            iterations: DEFAULT_ITERATIONS,
            threads: num_cpus::get(),
        }
    }
}

impl JuliaConfig {
    /// Refuse a configuration the grid computer cannot run.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(JuliaError::invalid("size", self.size));
        }
        if self.iterations == 0 {
            return Err(JuliaError::invalid("iterations", self.iterations));
        }
        if self.threads == 0 {
            return Err(JuliaError::invalid("threads", self.threads));
        }
        Ok(())
    }
}

/// The span of scores mapped onto black..white by the encoder.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DisplayRange {
    /// Scores at or below this are black.
    pub low: f32,
    /// Scores at or above this are white.
    pub high: f32,
}

impl Default for DisplayRange {
    fn default() -> Self {
        DisplayRange {
            low: 0.0,
            high: 80.0,
        }
    }
}

/// Given a string and a separator, returns the two values
/// separated by the separator.
pub fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

/// A specific implementation of parse_pair using a comma and expecting
/// floating point numbers.
pub fn parse_complex(s: &str) -> Option<Complex<f32>> {
    parse_pair(s, ',').map(|(re, im)| Complex { re, im })
}

/// Parse a finite `RE,IM` Julia constant.
pub fn parse_constant(s: &str) -> Result<Complex<f32>> {
    match parse_complex(s) {
        Some(c) if c.re.is_finite() && c.im.is_finite() => Ok(c),
        _ => Err(JuliaError::invalid("constant", s)),
    }
}

/// Parse a strictly positive count.  Zero, negative numbers and
/// anything that isn't a number are all invalid arguments.
pub fn parse_positive(name: &'static str, s: &str) -> Result<usize> {
    match i64::from_str(s.trim()) {
        Ok(n) if n > 0 => usize::try_from(n).map_err(|_| JuliaError::invalid(name, s)),
        _ => Err(JuliaError::invalid(name, s)),
    }
}

/// Parse a `LOW,HIGH` display range.  The bounds must be finite and
/// `LOW` must be below `HIGH`.
pub fn parse_range(s: &str) -> Result<DisplayRange> {
    match parse_pair::<f32>(s, ',') {
        Some((low, high)) if low.is_finite() && high.is_finite() && low < high => {
            Ok(DisplayRange { low, high })
        }
        _ => Err(JuliaError::invalid("range", s)),
    }
}
