//! Cyclic scanline assignment.
//!
//! Worker `i` of `T` renders rows `i, i + T, i + 2T, ...`. Interleaving rows
//! spreads expensive parts of the image (silhouettes, shadow edges, mirrors)
//! over all workers, whatever the height of the image.

/// The worker that owns `row`.
#[inline]
pub fn worker_for_row(row: usize, threads: usize) -> usize {
    row % threads
}

/// Rows owned by `worker`, in increasing order.
pub fn rows_for_worker(worker: usize, threads: usize, height: usize) -> impl Iterator<Item = usize> {
    debug_assert!(threads > 0 && worker < threads);
    (worker..height).step_by(threads)
}

/// One row of the pixel buffer, handed to the worker that renders it.
#[derive(Debug)]
pub struct Scanline<'a> {
    /// Row index in the image
    pub y: u32,
    /// The row's RGB bytes
    pub pixels: &'a mut [u8],
}

/// Split a row-major RGB buffer into per-worker scanline lists.
///
/// Entry `i` of the result holds exactly the rows of
/// [`rows_for_worker`]`(i, threads, height)`. Every row is moved into exactly
/// one list, so workers can write their rows without synchronization.
pub fn assign_scanlines(buffer: &mut [u8], width: u32, threads: usize) -> Vec<Vec<Scanline<'_>>> {
    debug_assert!(threads > 0);
    let stride = width as usize * 3;
    let mut assignments: Vec<Vec<Scanline<'_>>> = (0..threads).map(|_| Vec::new()).collect();

    if stride == 0 {
        return assignments;
    }

    for (y, pixels) in buffer.chunks_exact_mut(stride).enumerate() {
        assignments[worker_for_row(y, threads)].push(Scanline {
            y: y as u32,
            pixels,
        });
    }

    assignments
}
