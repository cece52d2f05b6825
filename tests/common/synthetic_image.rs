use lane_overlay::RawFrame;

/// Column offsets (`x - y`) of the left edge of each diagonal stripe.
pub const STRIPE_OFFSETS: [i64; 2] = [200, 600];
/// Stripe width in pixels along a row.
pub const STRIPE_WIDTH: i64 = 4;

/// Distance (in `x - y` units) from pixel (x, y) to the nearest stripe, 0 on a stripe.
pub fn stripe_distance(x: i64, y: i64) -> i64 {
    STRIPE_OFFSETS
        .iter()
        .map(|&offset| {
            let d = x - y - offset;
            if d < 0 {
                -d
            } else if d >= STRIPE_WIDTH {
                d - STRIPE_WIDTH + 1
            } else {
                0
            }
        })
        .min()
        .unwrap_or(i64::MAX)
}

/// Luma plane with two parallel white 45° stripes on black.
pub fn diagonal_stripes_u8(width: usize, height: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            if stripe_distance(x as i64, y as i64) == 0 {
                img[y * width + x] = 255;
            }
        }
    }
    img
}

/// YUV420 frame of [`diagonal_stripes_u8`] with neutral chroma.
pub fn diagonal_stripes_frame(id: u64, width: usize, height: usize) -> RawFrame {
    RawFrame::from_luma(id, width, height, diagonal_stripes_u8(width, height))
}

pub fn black_frame(id: u64, width: usize, height: usize) -> RawFrame {
    RawFrame::from_luma(id, width, height, vec![0u8; width * height])
}
