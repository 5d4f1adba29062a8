//! Entry points.  `render` splits the image across a group of
//! workers and gathers the result; `render_single` does the whole
//! thing on the calling thread.  Both produce the same bytes.

use crate::buffer::PixelBuffer;
use crate::errors::RenderError;
use crate::gather::GatherCoordinator;
use crate::group::{WorkerGroup, ROOT};
use crate::partition::partition;
use crate::planes::RenderConfig;
use crate::worker::render_rows;

/// The main function, and primary entry point.  Partitions the rows
/// over `workers` workers, has each of them render its band, and
/// returns the image the root assembled.  Any worker failing fails
/// the render.
pub fn render(config: &RenderConfig, workers: usize) -> Result<PixelBuffer, RenderError> {
    let assignments = partition(config.height(), workers)?;
    let group = WorkerGroup::new(workers)?;
    let coordinator = GatherCoordinator::new(config, &assignments);
    info!(
        "rendering {}x{} at {} iterations over {} workers",
        config.width(),
        config.height(),
        config.max_iterations(),
        workers
    );

    let outcomes = group.run(|endpoint| {
        let config = *config;
        let assignment = &assignments[endpoint.rank()];
        let local = render_rows(&config, assignment);
        debug!(
            "worker {} finished {} rows",
            endpoint.rank(),
            assignment.rows()
        );
        coordinator.assemble(&endpoint, local)
    })?;

    // The root's outcome comes first, so its error wins if it has one.
    let mut image = None;
    for outcome in outcomes {
        if let Some(buffer) = outcome? {
            image = Some(buffer);
        }
    }
    image.ok_or(RenderError::WorkerUnreachable(ROOT))
}

/// The degenerate one-worker render, with no group and no gather.
pub fn render_single(config: &RenderConfig) -> Result<PixelBuffer, RenderError> {
    let assignments = partition(config.height(), 1)?;
    info!(
        "rendering {}x{} at {} iterations on one worker",
        config.width(),
        config.height(),
        config.max_iterations()
    );
    Ok(render_rows(config, &assignments[0]))
}
