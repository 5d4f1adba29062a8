#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Row-partitioned Mandelbrot renderer
//!
//! The Mandelbrot set is the collection of points on the complex
//! plane which, when repeatedly squared and added to themselves,
//! never run off to infinity.  For every pixel of an image we take
//! the corresponding point, iterate it, and count how long it takes
//! to escape; that count becomes the pixel's colour.
//!
//! Every pixel is independent of every other pixel, so the image's
//! rows are split into one contiguous band per worker.  Each worker
//! renders its band on its own, with no shared state, and then all
//! of the bands are gathered onto a single coordinator, which copies
//! each band into its place in the final image.  The last worker
//! picks up whatever rows are left over when the height doesn't
//! divide evenly, so the gather has to cope with bands of different
//! sizes.  Because the per-pixel arithmetic is deterministic, the
//! final image is identical no matter how many workers rendered it.

#[macro_use]
extern crate failure;
extern crate crossbeam;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;

pub mod buffer;
pub mod errors;
pub mod escape;
pub mod gather;
pub mod group;
pub mod palette;
pub mod partition;
pub mod planes;
pub mod render;
pub mod worker;

pub use buffer::PixelBuffer;
pub use errors::RenderError;
pub use palette::PixelColor;
pub use partition::WorkerAssignment;
pub use planes::{ComplexPlaneWindow, RenderConfig};
pub use render::{render, render_single};
