// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The grid of scores and the machinery that fills it.
//!
//! The buffer keeps each column of the image contiguous (see
//! [`PlaneMapper::pixel_to_offset`]) while the work is split by row.
//! Each worker therefore gets one short slice out of every column: the
//! slices are carved out of the buffer with `split_at_mut` before any
//! thread starts, so the borrow checker sees that no two workers can
//! touch the same cell and no locking is needed.
//!
//! The grid is always cut into as many bands as threads were asked
//! for.  The number of OS threads actually started is capped at
//! [`WORKERS_PER_CORE`] per core; past that, each worker renders every
//! `workers`-th band in turn.

use crate::bands::{partition_rows, RowBand};
use crate::config::JuliaConfig;
use crate::errors::{JuliaError, Result};
use crate::kernel::score_point;
use crate::planes::{Pixel, PlaneMapper};
use itertools::iproduct;
use log::{debug, info, warn};
use num::Complex;
use std::cmp;
use std::mem;
use std::panic;
use std::thread;
use std::time::Instant;

/// A finished, read-only grid of scores.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    plane: PlaneMapper,
    cells: Vec<f32>,
}

impl Grid {
    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.plane.side()
    }

    /// Number of cells, `size * size`.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Describes whether the grid has any cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The score of pixel `(x, y)`, if it is on the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.size() || y >= self.size() {
            return None;
        }
        Some(self.cells[self.plane.pixel_to_offset(&Pixel(x, y))])
    }

    /// The raw buffer, in storage order.
    pub fn as_slice(&self) -> &[f32] {
        &self.cells
    }

    /// Give up the grid and keep the buffer.
    pub fn into_vec(self) -> Vec<f32> {
        self.cells
    }
}

fn allocate(cells: usize) -> Result<Vec<f32>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(cells)
        .map_err(|_| JuliaError::OutOfMemory { cells })?;
    buffer.resize(cells, 0.0);
    Ok(buffer)
}

// Cut every column into one slice per band.  The result holds, for
// each band, that band's slice of column 0, column 1, and so on.
fn split_bands<'a>(
    cells: &'a mut [f32],
    side: usize,
    bands: &[RowBand],
) -> Vec<Vec<&'a mut [f32]>> {
    let mut split: Vec<Vec<&'a mut [f32]>> = bands
        .iter()
        .map(|band| Vec::with_capacity(if band.is_empty() { 0 } else { side }))
        .collect();
    for column in cells.chunks_mut(side) {
        let mut rest = column;
        for (band, slots) in bands.iter().zip(split.iter_mut()) {
            if band.is_empty() {
                continue;
            }
            let (head, tail) = mem::take(&mut rest).split_at_mut(band.len());
            slots.push(head);
            rest = tail;
        }
    }
    split
}

// The bands one worker renders, each with its column slices.
type Share<'a> = Vec<(RowBand, Vec<&'a mut [f32]>)>;

// Deal the bands out to `workers` workers, band `i` going to worker
// `i % workers`.  Empty bands are dropped.
fn deal_bands<'a>(
    bands: &[RowBand],
    columns: Vec<Vec<&'a mut [f32]>>,
    workers: usize,
) -> Vec<Share<'a>> {
    let mut shares: Vec<Share<'a>> = (0..workers).map(|_| Vec::new()).collect();
    for (unit, (band, slots)) in bands.iter().zip(columns).enumerate() {
        if !band.is_empty() {
            shares[unit % workers].push((*band, slots));
        }
    }
    shares
}

/// The most scoped worker threads started per core.
pub const WORKERS_PER_CORE: usize = 4;

/// Fills a grid with escape scores for one Julia constant, splitting
/// the rows across a fixed number of scoped worker threads.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridComputer {
    plane: PlaneMapper,
    constant: Complex<f32>,
    iterations: usize,
    threads: usize,
}

impl GridComputer {
    /// Takes the run parameters and refuses any that are zero.
    pub fn new(config: &JuliaConfig) -> Result<Self> {
        config.validate()?;
        Ok(GridComputer {
            plane: PlaneMapper::new(config.size),
            constant: config.constant,
            iterations: config.iterations,
            threads: config.threads,
        })
    }

    /// The number of bands the rows will be split into.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// The number of OS threads that will render those bands.
    pub fn workers(&self) -> usize {
        cmp::min(self.threads, num_cpus::get() * WORKERS_PER_CORE)
    }

    fn cells(&self) -> Result<usize> {
        let side = self.plane.side();
        side.checked_mul(side)
            .ok_or(JuliaError::OutOfMemory { cells: usize::MAX })
    }

    #[inline]
    fn score(&self, pixel: &Pixel) -> f32 {
        score_point(
            self.plane.pixel_to_point(pixel),
            self.constant,
            self.iterations,
        )
    }

    fn render_band(&self, band: RowBand, mut columns: Vec<&mut [f32]>) {
        debug!(
            "rows {}..{} on {:?}",
            band.start,
            band.end,
            thread::current().id()
        );
        for y in band.rows() {
            for (x, column) in columns.iter_mut().enumerate() {
                column[y - band.start] = self.score(&Pixel(x, y));
            }
        }
    }

    /// Compute every cell of the grid.  Returns the grid and the wall
    /// clock time, in seconds, spent computing it; allocation is not
    /// counted.
    ///
    /// The rows are always cut into `threads` bands.  Up to
    /// [`workers`](#method.workers) OS threads render them, so a very
    /// large request still completes.  A panic in a worker is re-raised
    /// here.
    pub fn compute(&self) -> Result<(Grid, f64)> {
        let side = self.plane.side();
        let mut cells = allocate(self.cells()?)?;
        let bands = partition_rows(side, self.threads);
        let workers = self.workers();
        if workers < self.threads {
            warn!(
                "{} bands requested; rendering them on {} workers",
                self.threads, workers
            );
        }

        let elapsed = {
            let shares = deal_bands(&bands, split_bands(&mut cells, side, &bands), workers);
            let start = Instant::now();
            let scoped = crossbeam::scope(|spawner| {
                for share in shares {
                    spawner.spawn(move |_| {
                        for (band, slots) in share {
                            self.render_band(band, slots);
                        }
                    });
                }
            });
            if let Err(payload) = scoped {
                panic::resume_unwind(payload);
            }
            start.elapsed().as_secs_f64()
        };

        info!(
            "{}x{} grid, {} iterations, {} threads: {:.6}s",
            side, side, self.iterations, self.threads, elapsed
        );
        Ok((
            Grid {
                plane: self.plane,
                cells,
            },
            elapsed,
        ))
    }

    /// The single-threaded version of [`compute`](#method.compute), run
    /// on the calling thread.
    pub fn compute_serial(&self) -> Result<Grid> {
        let side = self.plane.side();
        let mut cells = allocate(self.cells()?)?;
        for (y, x) in iproduct!(0..side, 0..side) {
            let pixel = Pixel(x, y);
            cells[self.plane.pixel_to_offset(&pixel)] = self.score(&pixel);
        }
        Ok(Grid {
            plane: self.plane,
            cells,
        })
    }
}

/// Compute a `size x size` grid for the constant `c_re + c_im i` with
/// `threads` workers.  Returns the grid and the elapsed compute time in
/// seconds.
pub fn compute(
    c_re: f32,
    c_im: f32,
    size: usize,
    iterations: usize,
    threads: usize,
) -> Result<(Grid, f64)> {
    GridComputer::new(&JuliaConfig {
        constant: Complex::new(c_re, c_im),
        size,
        iterations,
        threads,
    })?
    .compute()
}
