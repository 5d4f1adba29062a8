//! The part of the render every worker does on its own: walk its
//! band of rows, iterate every pixel, colour it, and store it in a
//! local buffer.  No communication happens here.

use itertools::iproduct;

use crate::buffer::PixelBuffer;
use crate::escape::iterate;
use crate::palette::color_of;
use crate::partition::WorkerAssignment;
use crate::planes::RenderConfig;

/// Renders the rows in `assignment` into a buffer exactly that many
/// rows tall.  Local row 0 is image row `assignment.start_row`.
pub fn render_rows(config: &RenderConfig, assignment: &WorkerAssignment) -> PixelBuffer {
    let mut local = PixelBuffer::new(config.width(), assignment.rows());
    for (row, column) in iproduct!(assignment.row_range(), 0..config.width()) {
        let n = iterate(config.point_for(column, row), config.max_iterations());
        local.put(
            column,
            row - assignment.start_row,
            color_of(n, config.max_iterations()),
        );
    }
    trace!(
        "worker {} rendered rows {}..{}",
        assignment.worker_index,
        assignment.start_row,
        assignment.end_row
    );
    local
}
