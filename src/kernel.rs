// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The per-pixel escape score.
//!
//! A point `z` is squared and offset by the Julia constant `c` a fixed
//! number of times.  Every step that leaves `z` inside the disc of
//! radius two counts toward the score, and the score is the square
//! root of that count.  The loop never stops early, so every pixel
//! costs the same and the thread timings stay comparable.  An orbit
//! that runs away overflows to infinity or NaN, and neither compares
//! as inside.

use num::Complex;

/// The bound on `|z|^2` for a step to count as inside.
pub const ESCAPE_NORM_SQR: f32 = 4.0;

/// Iterate `z = z^2 + c` from `z0` exactly `iterations` times and
/// return the square root of the number of steps that stayed inside.
#[inline]
pub fn score_point(z0: Complex<f32>, c: Complex<f32>, iterations: usize) -> f32 {
    let mut z = z0;
    let mut count: usize = 0;
    for _ in 0..iterations {
        z = z * z + c;
        if z.norm_sqr() <= ESCAPE_NORM_SQR {
            count += 1;
        }
    }
    (count as f32).sqrt()
}

/// [`score_point`] taking its arguments as loose floats.
#[inline]
pub fn score(plane_re: f32, plane_im: f32, c_re: f32, c_im: f32, iterations: usize) -> f32 {
    score_point(
        Complex::new(plane_re, plane_im),
        Complex::new(c_re, c_im),
        iterations,
    )
}
