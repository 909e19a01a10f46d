use std::ops::Range;

use rayon::prelude::*;
use thiserror::Error;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The row stride must be non-zero to split a buffer into rows.
    #[error("row stride must be > 0, got {0}")]
    InvalidRowStride(usize),
}

/// Controls how parallel operations are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool and process every output row as one task.
    #[default]
    ParallelRows,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

impl ExecutionStrategy {
    /// Build the local thread pool for [`ExecutionStrategy::Fixed`].
    ///
    /// Returns `Ok(None)` for strategies that do not own a pool.
    fn thread_pool(&self) -> Result<Option<rayon::ThreadPool>, ParallelError> {
        match *self {
            ExecutionStrategy::Fixed(0) => Err(ParallelError::InvalidThreadCount(0)),
            ExecutionStrategy::Fixed(n) => rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map(Some)
                .map_err(|e| ParallelError::BuildError(e.to_string())),
            _ => Ok(None),
        }
    }
}

/// Apply a function to a range of rows of a strided buffer.
///
/// The buffer is split into chunks of `stride` elements; `f` receives the row
/// index and the full chunk of every row in `rows` exactly once. The last chunk
/// may be shorter than `stride` when the buffer carries no trailing padding.
///
/// All configuration errors are reported before `f` is called for any row.
///
/// # Arguments
///
/// * `strategy` - The execution strategy.
/// * `data` - The strided destination buffer.
/// * `stride` - The number of elements between the start of two rows.
/// * `rows` - The rows to visit.
/// * `f` - The operation to perform on each row.
pub fn par_rows_mut<T, F>(
    strategy: ExecutionStrategy,
    data: &mut [T],
    stride: usize,
    rows: Range<usize>,
    f: F,
) -> Result<(), ParallelError>
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    if stride == 0 {
        return Err(ParallelError::InvalidRowStride(stride));
    }

    let pool = strategy.thread_pool()?;

    if rows.is_empty() {
        return Ok(());
    }

    let (start, len) = (rows.start, rows.len());

    match (strategy, pool) {
        (ExecutionStrategy::Serial, _) => {
            data.chunks_mut(stride)
                .enumerate()
                .skip(start)
                .take(len)
                .for_each(|(y, row)| f(y, row));
        }
        (_, Some(pool)) => pool.install(|| par_chunk_rows(data, stride, start, len, &f)),
        (_, None) => par_chunk_rows(data, stride, start, len, &f),
    }

    Ok(())
}

fn par_chunk_rows<T, F>(data: &mut [T], stride: usize, start: usize, len: usize, f: &F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    data.par_chunks_mut(stride)
        .enumerate()
        .skip(start)
        .take(len)
        .for_each(|(y, row)| f(y, row));
}
