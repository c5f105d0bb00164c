// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns a grid of scores into an 8-bit grayscale image file.
//!
//! The buffer is written out in storage order, as-is, with the grid's
//! side as both width and height.  Because the grid keeps columns
//! contiguous, the real axis runs down the image and the imaginary axis
//! runs across it.

use crate::config::DisplayRange;
use crate::errors::Result;
use crate::grid::Grid;
use image::png::PNGEncoder;
use image::pnm::{PNMEncoder, PNMSubtype, SampleEncoding};
use image::ColorType;
use log::debug;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Map a score onto `0..=255`, clamping to the display range.
pub fn normalize(score: f32, range: &DisplayRange) -> u8 {
    let span = range.high - range.low;
    if !(span > 0.0) {
        return 0;
    }
    let clamped = num::clamp(score, range.low, range.high);
    ((clamped - range.low) / span * 255.0).round() as u8
}

/// The whole grid as grayscale bytes, in storage order.
pub fn to_gray(grid: &Grid, range: &DisplayRange) -> Vec<u8> {
    grid.as_slice()
        .iter()
        .map(|&score| normalize(score, range))
        .collect()
}

fn is_pnm(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.eq_ignore_ascii_case("pnm") || ext.eq_ignore_ascii_case("pgm"),
        None => false,
    }
}

/// Write the grid to `path`.  Files ending in `.pnm` or `.pgm` are
/// written as binary graymaps, everything else as PNG.
pub fn write_image<P: AsRef<Path>>(path: P, grid: &Grid, range: &DisplayRange) -> Result<()> {
    let path = path.as_ref();
    let pixels = to_gray(grid, range);
    let side = grid.size() as u32;
    let output = BufWriter::new(File::create(path)?);
    if is_pnm(path) {
        let mut encoder =
            PNMEncoder::new(output).with_subtype(PNMSubtype::Graymap(SampleEncoding::Binary));
        encoder.encode(&pixels[..], side, side, ColorType::Gray(8))?;
    } else {
        PNGEncoder::new(output).encode(&pixels, side, side, ColorType::Gray(8))?;
    }
    debug!("wrote {}x{} image to {}", side, side, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::compute;
    use tempfile::tempdir;

    #[test]
    fn normalize_clamps_and_scales() {
        let range = DisplayRange::default();
        assert_eq!(normalize(-3.0, &range), 0);
        assert_eq!(normalize(0.0, &range), 0);
        assert_eq!(normalize(40.0, &range), 128);
        assert_eq!(normalize(80.0, &range), 255);
        assert_eq!(normalize(1000.0, &range), 255);
    }

    #[test]
    fn normalize_with_an_offset_range() {
        let range = DisplayRange {
            low: 10.0,
            high: 20.0,
        };
        assert_eq!(normalize(10.0, &range), 0);
        assert_eq!(normalize(15.0, &range), 128);
        assert_eq!(normalize(25.0, &range), 255);
    }

    #[test]
    fn degenerate_ranges_are_black() {
        let range = DisplayRange {
            low: 5.0,
            high: 5.0,
        };
        assert_eq!(normalize(5.0, &range), 0);
        assert_eq!(normalize(50.0, &range), 0);
    }

    #[test]
    fn gray_buffer_follows_storage_order() {
        let (grid, _) = compute(0.0, 0.0, 4, 16, 2).unwrap();
        let range = DisplayRange {
            low: 0.0,
            high: 4.0,
        };
        let gray = to_gray(&grid, &range);
        assert_eq!(gray.len(), 16);
        // (2, 2) is the origin, inside for all 16 steps: sqrt(16) == high.
        assert_eq!(gray[2 + 2 * 4], 255);
    }

    #[test]
    fn writes_png_and_pgm() {
        let dir = tempdir().unwrap();
        let (grid, _) = compute(-0.778, -0.116, 8, 20, 2).unwrap();
        let range = DisplayRange::default();
        for name in &["julia.png", "julia.pgm"] {
            let path = dir.path().join(name);
            write_image(&path, &grid, &range).unwrap();
            let decoded = image::open(&path).unwrap().to_luma();
            assert_eq!(decoded.width(), 8);
            assert_eq!(decoded.height(), 8);
            assert_eq!(decoded.into_raw(), to_gray(&grid, &range));
        }
    }

    #[test]
    fn unwritable_paths_are_encode_errors() {
        let dir = tempdir().unwrap();
        let (grid, _) = compute(0.0, 0.0, 2, 2, 1).unwrap();
        let path = dir.path().join("missing").join("julia.png");
        let err = write_image(&path, &grid, &DisplayRange::default()).unwrap_err();
        assert!(!err.is_invalid_argument());
    }
}
