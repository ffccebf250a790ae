//! Fork-join per-pixel dispatcher over row-interleaved strips.
//!
//! Rows are dealt round-robin into `workers` strips: strip `k` owns rows
//! `k, k + W, k + 2W, ...`. Each strip is a set of disjoint `&mut` row
//! slices, so workers write without locks, and since the partition does not
//! depend on scheduling the output is identical for any worker count.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::EngineError;
use crate::frame::FrameBuffer;
use crate::math::{Vec2, Vec3};
use crate::render::context::RenderContext;
use crate::render::shader::Shader;

/// Strip count used when hardware concurrency cannot be queried.
pub const REFERENCE_WORKERS: usize = 8;

/// A fixed-size worker pool that evaluates a [`Shader`] once per pixel.
pub struct TileRenderer {
    workers: usize,
    pool: ThreadPool,
}

impl TileRenderer {
    /// Creates a renderer with exactly `workers` strips and pool threads.
    ///
    /// Returns `EngineError::InvalidWorkerCount` for zero workers and
    /// `EngineError::ThreadPool` if the threads cannot be spawned.
    pub fn new(workers: usize) -> Result<Self, EngineError> {
        if workers == 0 {
            return Err(EngineError::InvalidWorkerCount);
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("tessel-strip-{i}"))
            .build()
            .map_err(|e| EngineError::ThreadPool(e.to_string()))?;
        log::debug!("tile renderer started with {workers} workers");
        Ok(Self { workers, pool })
    }

    /// Creates a renderer sized to the machine's available parallelism,
    /// falling back to [`REFERENCE_WORKERS`].
    pub fn from_hardware() -> Result<Self, EngineError> {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(REFERENCE_WORKERS);
        Self::new(workers)
    }

    /// Number of strips (and pool threads).
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Shades every pixel of `frame`, blocking until all strips finish.
    ///
    /// Returns `EngineError::DimensionMismatch` if the context resolution
    /// differs from the frame size.
    pub fn render<S: Shader + ?Sized>(
        &self,
        frame: &mut FrameBuffer,
        ctx: &RenderContext,
        shader: &S,
    ) -> Result<(), EngineError> {
        let width = frame.width();
        self.render_into(frame.data_mut(), width, ctx, shader)
    }

    /// Shades a caller-owned row-major buffer of `width`-pixel rows.
    ///
    /// The buffer is written in place and never resized. Returns
    /// `EngineError::DimensionMismatch` if `buf.len()` is not
    /// `width * height` for the context's resolution.
    pub fn render_into<S: Shader + ?Sized>(
        &self,
        buf: &mut [Vec3],
        width: usize,
        ctx: &RenderContext,
        shader: &S,
    ) -> Result<(), EngineError> {
        let (ctx_w, ctx_h) = ctx.size();
        if width != ctx_w || buf.len() != ctx_w * ctx_h {
            return Err(EngineError::DimensionMismatch {
                lhs_w: width,
                lhs_h: buf.len() / width.max(1),
                rhs_w: ctx_w,
                rhs_h: ctx_h,
            });
        }

        let strips = partition_rows(buf, width, self.workers);
        log::debug!(
            "rendering {ctx_w}x{ctx_h} frame {} across {} strips",
            ctx.frame(),
            strips.len()
        );

        self.pool.install(|| {
            strips.into_par_iter().enumerate().for_each(|(k, strip)| {
                log::trace!("strip {k}: {} rows", strip.len());
                for (y, row) in strip {
                    shade_row(row, y, ctx, shader);
                }
            });
        });
        Ok(())
    }
}

impl std::fmt::Debug for TileRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileRenderer")
            .field("workers", &self.workers)
            .finish()
    }
}

/// Deals rows round-robin into `workers` strips, each row tagged with its index.
fn partition_rows(
    buf: &mut [Vec3],
    width: usize,
    workers: usize,
) -> Vec<Vec<(usize, &mut [Vec3])>> {
    let mut strips: Vec<Vec<(usize, &mut [Vec3])>> = (0..workers).map(|_| Vec::new()).collect();
    for (y, row) in buf.chunks_exact_mut(width).enumerate() {
        strips[y % workers].push((y, row));
    }
    strips
}

fn shade_row<S: Shader + ?Sized>(row: &mut [Vec3], y: usize, ctx: &RenderContext, shader: &S) {
    for (x, px) in row.iter_mut().enumerate() {
        *px = shader.evaluate(Vec2::new(x as f32, y as f32), ctx, *px);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn uv_shader(coord: Vec2, ctx: &RenderContext, _dst: Vec3) -> Vec3 {
        let res = ctx.resolution();
        Vec3::new(coord.x / res.x, coord.y / res.y, 0.0)
    }

    fn render_uv(width: usize, height: usize, workers: usize) -> FrameBuffer {
        let renderer = TileRenderer::new(workers).unwrap();
        let ctx = RenderContext::still(width, height).unwrap();
        let mut frame = FrameBuffer::new(width, height).unwrap();
        renderer.render(&mut frame, &ctx, &uv_shader).unwrap();
        frame
    }

    #[test]
    fn output_is_identical_for_any_worker_count() {
        let reference = render_uv(37, 23, 1);
        for workers in [4, 8, 16] {
            let other = render_uv(37, 23, workers);
            let same = reference
                .data()
                .iter()
                .zip(other.data())
                .all(|(a, b)| a.to_array().map(f32::to_bits) == b.to_array().map(f32::to_bits));
            assert!(same, "{workers} workers diverged from 1 worker");
        }
    }

    #[test]
    fn each_pixel_receives_its_own_coordinate() {
        let frame = render_uv(5, 3, 8);
        assert_eq!(frame.get(0, 0).unwrap(), Vec3::ZERO);
        assert_eq!(frame.get(4, 2).unwrap(), Vec3::new(4.0 / 5.0, 2.0 / 3.0, 0.0));
    }

    #[test]
    fn shader_runs_exactly_once_per_pixel() {
        let calls = AtomicUsize::new(0);
        let counting = |_: Vec2, _: &RenderContext, dst: Vec3| {
            calls.fetch_add(1, Ordering::Relaxed);
            dst + Vec3::ONE
        };
        let renderer = TileRenderer::new(3).unwrap();
        let ctx = RenderContext::still(7, 10).unwrap();
        let mut frame = FrameBuffer::new(7, 10).unwrap();
        renderer.render(&mut frame, &ctx, &counting).unwrap();
        assert_eq!(calls.load(Ordering::Relaxed), 70);
        assert!(frame.data().iter().all(|&c| c == Vec3::ONE));
    }

    #[test]
    fn more_workers_than_rows_is_fine() {
        let frame = render_uv(4, 2, 16);
        assert_eq!(frame.get(3, 1).unwrap(), Vec3::new(0.75, 0.5, 0.0));
    }

    #[test]
    fn shader_sees_existing_pixel_as_background() {
        let renderer = TileRenderer::new(2).unwrap();
        let ctx = RenderContext::still(2, 2).unwrap();
        let mut frame = FrameBuffer::filled(2, 2, Vec3::splat(0.25)).unwrap();
        let double = |_: Vec2, _: &RenderContext, dst: Vec3| dst * 2.0;
        renderer.render(&mut frame, &ctx, &double).unwrap();
        assert!(frame.data().iter().all(|&c| c == Vec3::splat(0.5)));
    }

    #[test]
    fn render_into_writes_caller_buffer() {
        let renderer = TileRenderer::new(4).unwrap();
        let ctx = RenderContext::still(3, 3).unwrap();
        let mut buf = vec![Vec3::ZERO; 9];
        renderer.render_into(&mut buf, 3, &ctx, &uv_shader).unwrap();
        assert_eq!(buf[7], Vec3::new(1.0 / 3.0, 2.0 / 3.0, 0.0));
    }

    #[test]
    fn mismatched_context_is_rejected() {
        let renderer = TileRenderer::new(2).unwrap();
        let ctx = RenderContext::still(4, 4).unwrap();
        let mut frame = FrameBuffer::new(4, 3).unwrap();
        assert!(matches!(
            renderer.render(&mut frame, &ctx, &uv_shader),
            Err(EngineError::DimensionMismatch { .. })
        ));
        let mut short = vec![Vec3::ZERO; 15];
        assert!(renderer.render_into(&mut short, 4, &ctx, &uv_shader).is_err());
    }

    #[test]
    fn zero_workers_is_rejected() {
        assert!(matches!(
            TileRenderer::new(0),
            Err(EngineError::InvalidWorkerCount)
        ));
    }

    #[test]
    fn hardware_renderer_has_at_least_one_worker() {
        let renderer = TileRenderer::from_hardware().unwrap();
        assert!(renderer.workers() >= 1);
    }

    #[test]
    fn partition_is_row_interleaved() {
        let mut buf = vec![Vec3::ZERO; 6 * 2];
        let strips = partition_rows(&mut buf, 2, 4);
        let rows: Vec<Vec<usize>> = strips
            .iter()
            .map(|s| s.iter().map(|(y, _)| *y).collect())
            .collect();
        assert_eq!(rows, vec![vec![0, 4], vec![1, 5], vec![2], vec![3]]);
    }

    #[test]
    fn nan_output_propagates_silently() {
        let renderer = TileRenderer::new(2).unwrap();
        let ctx = RenderContext::still(2, 2).unwrap();
        let mut frame = FrameBuffer::new(2, 2).unwrap();
        let nan = |_: Vec2, _: &RenderContext, _: Vec3| Vec3::splat(f32::NAN);
        renderer.render(&mut frame, &ctx, &nan).unwrap();
        assert!(frame.data().iter().all(|c| c.x.is_nan()));
    }
}
