// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which relates a square integral
//! plane with an origin at 0,0 to a fixed window on the complex plane.
//! The window is 3 units wide along the real axis and 2 units tall
//! along the imaginary axis, centered on the origin, so a square
//! image of the set comes out stretched horizontally by half again.
use num::Complex;

/// Describes the x, y of a pixel in the grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// The horizontal stretch of the window relative to its height.
pub const REAL_SCALE: f64 = 1.5;

/// Maps pixels of a `side x side` grid onto the complex plane, and
/// pixels onto their offset in the flat grid buffer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlaneMapper {
    side: usize,
    // Half the side length; the center of the grid in both axes.
    half: f64,
}

impl PlaneMapper {
    /// Constructor.  A zero side length is allowed here and describes
    /// an empty plane; the grid computer refuses it before it gets
    /// this far.
    pub fn new(side: usize) -> PlaneMapper {
        PlaneMapper {
            side,
            half: (side as f64) * 0.5,
        }
    }

    /// The side length of the integral plane.
    pub fn side(&self) -> usize {
        self.side
    }

    /// The total number of points in the integral grid.
    pub fn len(&self) -> usize {
        self.side * self.side
    }

    /// Describes whether the integral plane has any points at all.
    pub fn is_empty(&self) -> bool {
        self.side == 0
    }

    /// Given a pixel on the integral plane, return the point on the
    /// complex plane it stands for.  The arithmetic is done in double
    /// precision and only the result is narrowed, so every pixel lands
    /// on exactly the same single precision point no matter how the
    /// work was split up.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f32> {
        let re = REAL_SCALE * ((pixel.0 as f64) - self.half) / self.half;
        let im = ((pixel.1 as f64) - self.half) / self.half;
        Complex::new(re as f32, im as f32)
    }

    /// The offset of a pixel in the flat grid buffer.  Pixels sharing
    /// an x coordinate are contiguous, ordered by y.
    #[inline]
    pub fn pixel_to_offset(&self, pixel: &Pixel) -> usize {
        pixel.1 + pixel.0 * self.side
    }
}
