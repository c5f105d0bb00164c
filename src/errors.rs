// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong between reading the command line and
//! writing the image.  The kernel itself cannot fail; only the
//! arguments handed to it and the buffer it writes into can.

use failure::Fail;
use std::io;

/// The error type for the whole crate.
#[derive(Debug, Fail)]
pub enum JuliaError {
    /// A size, iteration count, thread count, constant or display
    /// range that is zero, negative, or could not be parsed.
    #[fail(display = "invalid argument {}: {:?}", name, value)]
    InvalidArgument {
        /// Which argument was rejected.
        name: &'static str,
        /// The offending value, as the caller supplied it.
        value: String,
    },

    /// The grid buffer could not be allocated.
    #[fail(display = "could not allocate a grid of {} cells", cells)]
    OutOfMemory {
        /// The number of cells requested.  Saturates at `usize::MAX`
        /// when `size * size` overflows.
        cells: usize,
    },

    /// The image encoder could not write its output.
    #[fail(display = "could not write image: {}", _0)]
    Encode(#[cause] io::Error),
}

impl JuliaError {
    pub(crate) fn invalid<T: ToString>(name: &'static str, value: T) -> Self {
        JuliaError::InvalidArgument {
            name,
            value: value.to_string(),
        }
    }

    /// True for the argument-validation variant.
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            JuliaError::InvalidArgument { .. } => true,
            _ => false,
        }
    }
}

impl From<io::Error> for JuliaError {
    fn from(err: io::Error) -> Self {
        JuliaError::Encode(err)
    }
}

/// Shorthand used throughout the crate.
pub type Result<T> = std::result::Result<T, JuliaError>;
