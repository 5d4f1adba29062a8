//! Contains the ComplexPlaneWindow and RenderConfig structs, which
//! together describe a relationship between a rectangle on the
//! integral plane with an origin at 0,0 (the image) and a rectangle
//! on the complex plane (the part of the Mandelbrot set we're
//! looking at).
use num::Complex;

use crate::buffer::CHANNELS;
use crate::errors::RenderError;

/// Describes the left, right, bottom and top edges of the part of
/// the complex plane being rendered, treating the real part as the
/// x-component and the imaginary part as the y-component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexPlaneWindow {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl ComplexPlaneWindow {
    /// Constructor.  The window must have some width and some height,
    /// and all four edges must be finite.
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Result<Self, RenderError> {
        if [min_x, max_x, min_y, max_y].iter().any(|v| !v.is_finite()) {
            return Err(RenderError::Config(
                "The complex plane bounds must be finite.".to_string(),
            ));
        }

        if min_x >= max_x {
            return Err(RenderError::Config(
                "The left edge is not to the left of the right edge.".to_string(),
            ));
        }

        if min_y >= max_y {
            return Err(RenderError::Config(
                "The bottom edge is not below the top edge.".to_string(),
            ));
        }

        Ok(ComplexPlaneWindow {
            min_x,
            max_x,
            min_y,
            max_y,
        })
    }

    /// Builds a window out of its left-lower and right-upper corners.
    pub fn from_corners(
        leftlower: Complex<f64>,
        rightupper: Complex<f64>,
    ) -> Result<Self, RenderError> {
        ComplexPlaneWindow::new(leftlower.re, rightupper.re, leftlower.im, rightupper.im)
    }

    /// Left edge.
    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    /// Right edge.
    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    /// Bottom edge.
    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    /// Top edge.
    pub fn max_y(&self) -> f64 {
        self.max_y
    }
}

/// Everything a worker needs to know to render its rows.  Once built
/// it is never changed; every worker gets its own copy.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderConfig {
    width: usize,
    height: usize,
    max_iterations: usize,
    window: ComplexPlaneWindow,
}

impl RenderConfig {
    /// Requires the width and height of the image, the number of
    /// iterations after which a point is considered to be inside the
    /// set, and the window onto the complex plane.
    pub fn new(
        width: usize,
        height: usize,
        max_iterations: usize,
        window: ComplexPlaneWindow,
    ) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::Config(format!(
                "The image must have a positive size, not {}x{}.",
                width, height
            )));
        }

        if width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(CHANNELS))
            .is_none()
        {
            return Err(RenderError::Config(format!(
                "A {}x{} image is too large to hold in memory.",
                width, height
            )));
        }

        if max_iterations == 0 {
            return Err(RenderError::Config(
                "The iteration cap must be at least one.".to_string(),
            ));
        }

        Ok(RenderConfig {
            width,
            height,
            max_iterations,
            window,
        })
    }

    /// 800x800 pixels over [-2.0, 1.0] x [-1.5, 1.5], 1000 iterations.
    pub fn reference() -> Self {
        RenderConfig {
            width: 800,
            height: 800,
            max_iterations: 1000,
            window: ComplexPlaneWindow {
                min_x: -2.0,
                max_x: 1.0,
                min_y: -1.5,
                max_y: 1.5,
            },
        }
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels, which is also the number of rows to
    /// be shared out among the workers.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The iteration cap.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// The window onto the complex plane.
    pub fn window(&self) -> &ComplexPlaneWindow {
        &self.window
    }

    /// Given a pixel on the image, map it to its point on the complex
    /// plane.  Column 0 sits exactly on the left edge and row 0
    /// exactly on the bottom edge; the right and top edges themselves
    /// are never sampled.
    pub fn point_for(&self, x: usize, y: usize) -> Complex<f64> {
        let w = &self.window;
        Complex::new(
            w.min_x + (w.max_x - w.min_x) * (x as f64) / (self.width as f64),
            w.min_y + (w.max_y - w.min_y) * (y as f64) / (self.height as f64),
        )
    }
}
