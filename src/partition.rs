//! Splits the image's rows into one contiguous band per worker.

use std::ops::Range;

use crate::errors::RenderError;

/// The half-open band of rows `[start_row, end_row)` a worker owns.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WorkerAssignment {
    /// Which worker.
    pub worker_index: usize,
    /// First row, inclusive.
    pub start_row: usize,
    /// Last row, exclusive.
    pub end_row: usize,
}

impl WorkerAssignment {
    /// How many rows the worker renders.
    pub fn rows(&self) -> usize {
        self.end_row - self.start_row
    }

    /// The band as a range.
    pub fn row_range(&self) -> Range<usize> {
        self.start_row..self.end_row
    }
}

/// Every worker gets `height / workers` rows, in order, except the
/// last one, which also takes the `height % workers` left over.  The
/// bands never overlap and between them cover every row exactly once.
pub fn partition(height: usize, workers: usize) -> Result<Vec<WorkerAssignment>, RenderError> {
    if workers == 0 {
        return Err(RenderError::Config(
            "At least one worker is required.".to_string(),
        ));
    }

    let rows_per_worker = height / workers;
    Ok((0..workers)
        .map(|worker_index| {
            let start_row = worker_index * rows_per_worker;
            let end_row = if worker_index == workers - 1 {
                height
            } else {
                start_row + rows_per_worker
            };
            WorkerAssignment {
                worker_index,
                start_row,
                end_row,
            }
        })
        .collect())
}
