// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Splits the rows of a grid into contiguous bands, one per worker.

use std::ops::Range;

/// A half-open range of rows handed to a single worker.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RowBand {
    /// The first row of the band.
    pub start: usize,
    /// One past the last row of the band.
    pub end: usize,
}

impl RowBand {
    /// The number of rows in the band.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for the trailing bands when there are more workers than rows.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The rows of the band as a range.
    pub fn rows(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Divide `rows` rows into exactly `units` bands, in order.  The first
/// `rows % units` bands are one row taller than the rest, so no two
/// bands differ by more than a row.  Asking for zero units yields no
/// bands.
pub fn partition_rows(rows: usize, units: usize) -> Vec<RowBand> {
    if units == 0 {
        return vec![];
    }
    let base = rows / units;
    let extra = rows % units;
    let mut start = 0;
    (0..units)
        .map(|unit| {
            let height = base + if unit < extra { 1 } else { 0 };
            let band = RowBand {
                start,
                end: start + height,
            };
            start = band.end;
            band
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_covers(rows: usize, bands: &[RowBand]) {
        let mut next = 0;
        for band in bands {
            assert_eq!(band.start, next);
            assert!(band.end >= band.start);
            next = band.end;
        }
        assert_eq!(next, rows);
    }

    #[test]
    fn even_split() {
        let bands = partition_rows(12, 4);
        assert_eq!(bands.len(), 4);
        assert!(bands.iter().all(|b| b.len() == 3));
        assert_covers(12, &bands);
    }

    #[test]
    fn remainder_goes_to_the_first_bands() {
        let bands = partition_rows(10, 4);
        let heights: Vec<usize> = bands.iter().map(RowBand::len).collect();
        assert_eq!(heights, vec![3, 3, 2, 2]);
        assert_covers(10, &bands);
    }

    #[test]
    fn single_unit_takes_everything() {
        assert_eq!(partition_rows(7, 1), vec![RowBand { start: 0, end: 7 }]);
    }

    #[test]
    fn more_units_than_rows_leaves_empty_bands() {
        let bands = partition_rows(3, 8);
        assert_eq!(bands.len(), 8);
        assert_eq!(bands.iter().filter(|b| b.is_empty()).count(), 5);
        assert_covers(3, &bands);
    }

    #[test]
    fn partitioning_is_deterministic() {
        for rows in 1..40 {
            for units in 1..12 {
                let bands = partition_rows(rows, units);
                assert_eq!(bands, partition_rows(rows, units));
                assert_eq!(bands.len(), units);
                assert_covers(rows, &bands);
            }
        }
    }

    #[test]
    fn zero_units() {
        assert!(partition_rows(5, 0).is_empty());
    }
}
