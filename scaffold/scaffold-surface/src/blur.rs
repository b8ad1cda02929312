//! Separable Gaussian smoothing of density grids.

use rayon::prelude::*;

/// Binomial approximation of a Gaussian, `[1, 4, 6, 4, 1] / 16`.
pub const BLUR_KERNEL: [f64; 5] = [0.0625, 0.25, 0.375, 0.25, 0.0625];

#[derive(Debug, Clone, Copy)]
enum Axis {
    X,
    Y,
    Z,
}

/// Blurs `values` (laid out `x + nx * (y + ny * z)`) along X, then Y, then
/// Z. Samples past the boundary are clamped to the edge sample.
///
/// Each pass reads the previous pass's complete output. Within a pass the
/// z-slices are independent and run on the rayon pool when `parallel` is
/// set.
///
/// A buffer whose length does not match `dims` is left unchanged.
pub fn gaussian_blur(values: &mut [f64], dims: [usize; 3], parallel: bool) {
    let [nx, ny, nz] = dims;
    if nx * ny * nz == 0 || values.len() != nx * ny * nz {
        return;
    }

    let mut scratch = vec![0.0; values.len()];
    blur_axis(values, &mut scratch, dims, Axis::X, parallel);
    blur_axis(&scratch, values, dims, Axis::Y, parallel);
    blur_axis(values, &mut scratch, dims, Axis::Z, parallel);
    values.copy_from_slice(&scratch);
}

fn blur_axis(src: &[f64], dst: &mut [f64], dims: [usize; 3], axis: Axis, parallel: bool) {
    let [nx, ny, nz] = dims;

    let blur_slice = |(z, out): (usize, &mut [f64])| {
        for y in 0..ny {
            for x in 0..nx {
                let mut acc = 0.0;
                for (k, w) in BLUR_KERNEL.iter().enumerate() {
                    let i = match axis {
                        Axis::X => clamp_tap(x, k, nx) + nx * (y + ny * z),
                        Axis::Y => x + nx * (clamp_tap(y, k, ny) + ny * z),
                        Axis::Z => x + nx * (y + ny * clamp_tap(z, k, nz)),
                    };
                    acc += w * src[i];
                }
                out[x + nx * y] = acc;
            }
        }
    };

    if parallel {
        dst.par_chunks_mut(nx * ny).enumerate().for_each(blur_slice);
    } else {
        dst.chunks_mut(nx * ny).enumerate().for_each(blur_slice);
    }
}

/// Index of kernel tap `k` around `i`, clamped to `[0, n)`.
#[inline]
fn clamp_tap(i: usize, k: usize, n: usize) -> usize {
    (i + k).saturating_sub(2).min(n - 1)
}
