//! Non-maximum suppression on gradient magnitude with direction alignment.
//!
//! Each pixel is compared with its two neighbours along the gradient direction
//! quantized to 0°, 45°, 90° or 135°. Ties are broken asymmetrically: a pixel
//! must be strictly greater than the neighbour on the "previous" side (left or
//! upper row) and at least equal to the one on the "next" side, so a plateau
//! two pixels wide keeps exactly one of them.
//!
//! The outermost 1-pixel frame is always suppressed, which keeps neighbour
//! lookups in bounds.
use crate::edges::grad::Grad;
use crate::image::{ImageF32, ImageView, ImageViewMut};

const TAN_22_5_DEG: f32 = 0.414_213_57;

/// Keep local maxima of `grad.mag`, zero elsewhere.
///
/// Pixels below `mag_floor` are skipped outright; they can never become edges
/// so the result after thresholding is the same as with a zero floor.
pub fn suppress_non_maxima(grad: &Grad, mag_floor: f32) -> ImageF32 {
    let w = grad.width();
    let h = grad.height();
    let mut out = ImageF32::new(w, h);
    if w < 3 || h < 3 {
        return out;
    }

    for y in 1..h - 1 {
        let mag_prev = grad.mag.row(y - 1);
        let mag_row = grad.mag.row(y);
        let mag_next = grad.mag.row(y + 1);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);
        let out_row = out.row_mut(y);

        for x in 1..w - 1 {
            let mag = mag_row[x];
            if mag <= 0.0 || mag < mag_floor {
                continue;
            }

            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();
            let same_sign = (gx >= 0.0 && gy >= 0.0) || (gx <= 0.0 && gy <= 0.0);

            // (previous, next) neighbour along the gradient.
            let (before, after) = if abs_gy <= abs_gx * TAN_22_5_DEG {
                (mag_row[x - 1], mag_row[x + 1])
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                (mag_prev[x], mag_next[x])
            } else if same_sign {
                (mag_prev[x - 1], mag_next[x + 1])
            } else {
                (mag_prev[x + 1], mag_next[x - 1])
            };

            if mag > before && mag >= after {
                out_row[x] = mag;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::grad::sobel_gradients;

    fn vertical_step(width: usize, height: usize, split_x: usize) -> ImageF32 {
        let mut img = ImageF32::new(width, height);
        for y in 0..height {
            for x in split_x..width {
                img.set(x, y, 255.0);
            }
        }
        img
    }

    #[test]
    fn step_edge_thins_to_one_column() {
        let img = vertical_step(12, 8, 6);
        let thin = suppress_non_maxima(&sobel_gradients(&img), 0.0);
        for y in 1..7 {
            let kept: Vec<usize> = (0..12).filter(|&x| thin.get(x, y) > 0.0).collect();
            assert_eq!(kept, vec![5], "row {y} kept {kept:?}");
        }
    }

    #[test]
    fn border_is_always_suppressed() {
        let img = vertical_step(8, 8, 1);
        let thin = suppress_non_maxima(&sobel_gradients(&img), 0.0);
        for y in 0..8 {
            assert_eq!(thin.get(0, y), 0.0);
        }
        for x in 0..8 {
            assert_eq!(thin.get(x, 0), 0.0);
            assert_eq!(thin.get(x, 7), 0.0);
        }
    }
}
