//! Per-pixel interpolation kernels.
//!
//! Each kernel maps a fractional source coordinate `(src_x, src_y)` on one
//! band plane to a single output sample.

/// Borrowed view of one band plane.
#[derive(Clone, Copy)]
pub(super) struct Plane<'a> {
    pub data: &'a [u8],
    pub width: usize,
    pub height: usize,
}

impl Plane<'_> {
    #[inline]
    fn at(&self, x: usize, y: usize) -> f64 {
        self.data[y * self.width + x] as f64
    }
}

pub(super) type Kernel = fn(&Plane<'_>, f64, f64) -> u8;

/// Clamps to `[0, 255]` and truncates toward zero. NaN maps to 0.
#[inline]
pub fn clamp_to_byte(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// Cubic convolution weight (a = -0.5).
///
/// Even in `t`; `1` at 0, `0` at 1 and for `|t| >= 2`.
pub fn cubic_weight(t: f64) -> f64 {
    let t = t.abs();
    if t <= 1.0 {
        1.5 * t * t * t - 2.5 * t * t + 1.0
    } else if t < 2.0 {
        -0.5 * t * t * t + 2.5 * t * t - 4.0 * t + 2.0
    } else {
        0.0
    }
}

pub(super) fn nearest(plane: &Plane<'_>, src_x: f64, src_y: f64) -> u8 {
    let x = (src_x as usize).min(plane.width - 1);
    let y = (src_y as usize).min(plane.height - 1);
    plane.data[y * plane.width + x]
}

pub(super) fn bilinear(plane: &Plane<'_>, src_x: f64, src_y: f64) -> u8 {
    let x1 = (src_x as usize).min(plane.width - 1);
    let y1 = (src_y as usize).min(plane.height - 1);
    let x2 = (x1 + 1).min(plane.width - 1);
    let y2 = (y1 + 1).min(plane.height - 1);

    let dx = src_x - x1 as f64;
    let dy = src_y - y1 as f64;

    let value = plane.at(x1, y1) * (1.0 - dx) * (1.0 - dy)
        + plane.at(x2, y1) * dx * (1.0 - dy)
        + plane.at(x1, y2) * (1.0 - dx) * dy
        + plane.at(x2, y2) * dx * dy;

    clamp_to_byte(value)
}

pub(super) fn cubic(plane: &Plane<'_>, src_x: f64, src_y: f64) -> u8 {
    let x0 = src_x.floor() as i64;
    let y0 = src_y.floor() as i64;
    let max_x = plane.width as i64 - 1;
    let max_y = plane.height as i64 - 1;

    let mut sum = 0.0;
    let mut weight_sum = 0.0;

    for dy in -1..=2i64 {
        let iy = (y0 + dy).clamp(0, max_y) as usize;
        let wy = cubic_weight(src_y - (y0 + dy) as f64);
        for dx in -1..=2i64 {
            let ix = (x0 + dx).clamp(0, max_x) as usize;
            let weight = cubic_weight(src_x - (x0 + dx) as f64) * wy;
            sum += plane.at(ix, iy) * weight;
            weight_sum += weight;
        }
    }

    clamp_to_byte(sum / weight_sum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_to_byte_truncates() {
        assert_eq!(clamp_to_byte(-12.0), 0);
        assert_eq!(clamp_to_byte(12.99), 12);
        assert_eq!(clamp_to_byte(300.0), 255);
        assert_eq!(clamp_to_byte(f64::NAN), 0);
    }

    #[test]
    fn test_cubic_weight_partition_of_unity() {
        for step in 0..10 {
            let f = step as f64 / 10.0;
            let total: f64 = (-1..=2).map(|k| cubic_weight(f - k as f64)).sum();
            assert!((total - 1.0).abs() < 1e-12, "f={f}: {total}");
        }
    }

    #[test]
    fn test_bilinear_midpoint() {
        let data = [0, 100, 100, 200];
        let plane = Plane { data: &data, width: 2, height: 2 };
        assert_eq!(bilinear(&plane, 0.5, 0.5), 100);
        assert_eq!(bilinear(&plane, 0.0, 0.0), 0);
    }

    #[test]
    fn test_cubic_on_constant_plane() {
        let data = [77u8; 9];
        let plane = Plane { data: &data, width: 3, height: 3 };
        assert_eq!(cubic(&plane, 0.0, 0.0), 77);
        assert_eq!(cubic(&plane, 2.0, 2.0), 77);
        // normalisation may land a hair below the constant before truncation
        let value = cubic(&plane, 1.3, 0.7);
        assert!((76..=77).contains(&value), "{value}");
    }
}
