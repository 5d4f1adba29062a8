//! The escape-time iteration at the heart of every Mandelbrot
//! renderer.

use num::Complex;

/// This is our classic iterator function: starting from zero,
/// repeatedly square z and add the point, and count how many
/// iterations it takes for |z|² to reach 4.  If the point hasn't
/// escaped after `max_iterations`, it's considered to be inside the
/// set and `max_iterations` itself is returned.
///
/// The square is expanded into its real and imaginary parts so that
/// |z|² falls out of the terms we need anyway.  Nothing here depends
/// on which worker is running it, which is what lets any number of
/// workers produce the same image.
pub fn iterate(c: Complex<f64>, max_iterations: usize) -> usize {
    let (mut zr, mut zi) = (0.0_f64, 0.0_f64);
    let (mut zr2, mut zi2) = (0.0_f64, 0.0_f64);
    let mut iterations = 0;
    while iterations < max_iterations && zr2 + zi2 < 4.0 {
        zi = 2.0 * zr * zi + c.im;
        zr = zr2 - zi2 + c.re;
        zr2 = zr * zr;
        zi2 = zi * zi;
        iterations += 1;
    }
    iterations
}
