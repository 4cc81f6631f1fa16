//! Row-partitioned parallel execution.
//!
//! Transforms in this crate parallelize over destination rows: the output
//! buffer is split into disjoint runs of whole rows, each run is handed to
//! one scoped worker thread, and the caller blocks on the scope's join
//! barrier. Because ownership is purely positional and the compute closures
//! are pure per destination pixel, the result is bit-identical for any
//! worker count.

use serde::{Deserialize, Serialize};

/// Worker-count configuration for row-parallel transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Parallelism {
    /// One worker per available hardware thread.
    #[default]
    Auto,
    /// Exactly this many workers (values below 1 are treated as 1).
    Fixed(usize),
}

impl Parallelism {
    /// Resolve to a concrete worker count.
    pub fn workers(self) -> usize {
        match self {
            Parallelism::Auto => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            Parallelism::Fixed(n) => n.max(1),
        }
    }
}

/// A contiguous range of destination rows owned by one worker.
///
/// Half-open: `start` is the first row, `end` one past the last. Ranges
/// live for a single transform call and are never shared between workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

impl RowRange {
    /// Number of rows in the range.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True if the range holds no rows.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Split `height` rows into chunks of `ceil(height / workers)` rows.
///
/// Chunks that would start past the last row are not produced, so when
/// `workers` exceeds `height` fewer than `workers` ranges come back. The
/// returned ranges are disjoint and cover `0..height` exactly.
pub fn partition_rows(height: usize, workers: usize) -> Vec<RowRange> {
    if height == 0 {
        return Vec::new();
    }
    let workers = workers.max(1);
    let chunk = height.div_ceil(workers);
    let mut ranges = Vec::with_capacity(workers.min(height));
    let mut start = 0;
    while start < height {
        let end = (start + chunk).min(height);
        ranges.push(RowRange { start, end });
        start = end;
    }
    ranges
}

/// Fill a row-major destination buffer by fanning `render` out over workers.
///
/// `dst` must hold a whole number of rows of `row_stride` bytes. Each worker
/// owns a disjoint run of rows and invokes `render(y, row)` for every row in
/// it; the call returns once all workers have finished. With one worker the
/// rows are rendered inline on the calling thread.
pub fn fill_rows<F>(dst: &mut [u8], row_stride: usize, parallelism: Parallelism, render: F)
where
    F: Fn(usize, &mut [u8]) + Sync,
{
    if row_stride == 0 || dst.is_empty() {
        return;
    }
    debug_assert_eq!(dst.len() % row_stride, 0, "destination is not whole rows");

    let height = dst.len() / row_stride;
    let workers = parallelism.workers().min(height);

    if workers <= 1 {
        for (y, row) in dst.chunks_mut(row_stride).enumerate() {
            render(y, row);
        }
        return;
    }

    let ranges = partition_rows(height, workers);
    let chunk_rows = ranges[0].len();
    let render = &render;

    std::thread::scope(|scope| {
        for (range, chunk) in ranges
            .into_iter()
            .zip(dst.chunks_mut(chunk_rows * row_stride))
        {
            scope.spawn(move || {
                for (i, row) in chunk.chunks_mut(row_stride).enumerate() {
                    render(range.start + i, row);
                }
            });
        }
    });
}
