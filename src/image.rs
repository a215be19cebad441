// Copyright (c) 2026 Fourveil contributors
// SPDX-License-Identifier: GPL-3.0-only

//! In-memory RGB image with per-channel plane access.
//!
//! Pixel planes are stored row-major as `u8`; the codec works on `f64`
//! copies and rounds/clamps back on the way out. Coordinates at this
//! boundary are `(x, y)` = (column, row); everything downstream of the
//! transform uses `(row, col)`.

/// Number of color channels.
pub const CHANNELS: usize = 3;

/// RGB image, one row-major `u8` plane per channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    planes: [Vec<u8>; CHANNELS],
}

impl Image {
    /// Build an image from three row-major channel planes.
    ///
    /// # Panics
    /// Panics if `width` or `height` is zero or any plane's length is not
    /// `width * height`.
    pub fn from_planes(width: usize, height: usize, planes: [Vec<u8>; CHANNELS]) -> Self {
        assert!(width > 0 && height > 0, "image requires non-zero dimensions");
        for plane in &planes {
            assert_eq!(plane.len(), width * height, "plane length mismatch");
        }
        Image { width, height, planes }
    }

    /// Solid-color image, all three channels set to `value`.
    pub fn uniform(width: usize, height: usize, value: u8) -> Self {
        let plane = vec![value; width * height];
        Self::from_planes(width, height, [plane.clone(), plane.clone(), plane])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel value of `channel` at `(x, y)`.
    #[inline]
    pub fn get(&self, channel: usize, x: usize, y: usize) -> u8 {
        self.planes[channel][y * self.width + x]
    }

    /// Overwrite the pixel value of `channel` at `(x, y)`.
    #[inline]
    pub fn set(&mut self, channel: usize, x: usize, y: usize, value: u8) {
        self.planes[channel][y * self.width + x] = value;
    }

    /// Row-major `u8` plane of one channel.
    pub fn plane(&self, channel: usize) -> &[u8] {
        &self.planes[channel]
    }

    /// Row-major `f64` copy of one channel, ready for the transform.
    pub fn plane_f64(&self, channel: usize) -> Vec<f64> {
        self.planes[channel].iter().map(|&v| v as f64).collect()
    }

    /// Rebuild an image from three real-valued planes, rounding to the
    /// nearest integer and clamping to `0..=255`.
    ///
    /// # Panics
    /// Panics on zero dimensions or plane length mismatch.
    pub fn from_real_planes(width: usize, height: usize, planes: [Vec<f64>; CHANNELS]) -> Self {
        let quantized = planes.map(|plane| {
            plane
                .iter()
                .map(|&v| v.round().clamp(0.0, 255.0) as u8)
                .collect::<Vec<u8>>()
        });
        Self::from_planes(width, height, quantized)
    }

    /// Resize to `(new_width, new_height)` with bilinear interpolation.
    ///
    /// # Panics
    /// Panics if either target dimension is zero.
    pub fn scale(&self, new_width: usize, new_height: usize) -> Image {
        assert!(new_width > 0 && new_height > 0, "image requires non-zero dimensions");
        if new_width == self.width && new_height == self.height {
            return self.clone();
        }

        let x_ratio = self.width as f64 / new_width as f64;
        let y_ratio = self.height as f64 / new_height as f64;

        let planes = std::array::from_fn(|ch| {
            let mut plane = vec![0u8; new_width * new_height];
            for y in 0..new_height {
                for x in 0..new_width {
                    let sx = x as f64 * x_ratio;
                    let sy = y as f64 * y_ratio;

                    let x0 = sx.floor() as usize;
                    let y0 = sy.floor() as usize;
                    let x1 = (x0 + 1).min(self.width - 1);
                    let y1 = (y0 + 1).min(self.height - 1);

                    let fx = sx - x0 as f64;
                    let fy = sy - y0 as f64;

                    let v00 = self.get(ch, x0, y0) as f64;
                    let v10 = self.get(ch, x1, y0) as f64;
                    let v01 = self.get(ch, x0, y1) as f64;
                    let v11 = self.get(ch, x1, y1) as f64;

                    let v = v00 * (1.0 - fx) * (1.0 - fy)
                        + v10 * fx * (1.0 - fy)
                        + v01 * (1.0 - fx) * fy
                        + v11 * fx * fy;

                    plane[y * new_width + x] = v.round().clamp(0.0, 255.0) as u8;
                }
            }
            plane
        });

        Image {
            width: new_width,
            height: new_height,
            planes,
        }
    }

    /// Resize to `(new_width, new_height)` by nearest-neighbor sampling.
    ///
    /// Used when shrinking payloads: every output pixel is an exact copy of
    /// a source pixel, so sample values survive a later roundtrip intact.
    ///
    /// # Panics
    /// Panics if either target dimension is zero.
    pub fn downsample_nearest(&self, new_width: usize, new_height: usize) -> Image {
        assert!(new_width > 0 && new_height > 0, "image requires non-zero dimensions");
        if new_width == self.width && new_height == self.height {
            return self.clone();
        }

        let planes = std::array::from_fn(|ch| {
            let mut plane = vec![0u8; new_width * new_height];
            for y in 0..new_height {
                let sy = y * self.height / new_height;
                for x in 0..new_width {
                    let sx = x * self.width / new_width;
                    plane[y * new_width + x] = self.get(ch, sx, sy);
                }
            }
            plane
        });

        Image {
            width: new_width,
            height: new_height,
            planes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_roundtrip() {
        let plane: Vec<u8> = (0..12).map(|i| (i * 20) as u8).collect();
        let img = Image::from_planes(4, 3, [plane.clone(), plane.clone(), plane.clone()]);

        assert_eq!(img.get(0, 0, 0), 0);
        assert_eq!(img.get(1, 3, 0), 60);
        assert_eq!(img.get(2, 0, 2), 160);
        assert_eq!(img.plane(0), &plane[..]);
    }

    #[test]
    fn from_real_planes_rounds_and_clamps() {
        let plane = vec![-3.7, 0.4, 127.5, 254.6, 255.2, 300.0];
        let img = Image::from_real_planes(3, 2, [plane.clone(), plane.clone(), plane]);

        assert_eq!(img.plane(0), &[0, 0, 128, 255, 255, 255]);
    }

    #[test]
    fn scale_identity_is_clone() {
        let img = Image::uniform(5, 4, 77);
        let scaled = img.scale(5, 4);
        assert_eq!(img, scaled);
    }

    #[test]
    fn scale_uniform_stays_uniform() {
        let img = Image::uniform(8, 8, 200);
        let scaled = img.scale(13, 5);
        assert!(scaled.plane(1).iter().all(|&v| v == 200));
    }

    #[test]
    fn downsample_nearest_copies_source_pixels() {
        let plane: Vec<u8> = (0..16).map(|i| i as u8 * 10).collect();
        let img = Image::from_planes(4, 4, [plane.clone(), plane.clone(), plane]);

        let small = img.downsample_nearest(2, 2);
        assert_eq!(small.get(0, 0, 0), img.get(0, 0, 0));
        assert_eq!(small.get(0, 1, 0), img.get(0, 2, 0));
        assert_eq!(small.get(0, 0, 1), img.get(0, 0, 2));
        assert_eq!(small.get(0, 1, 1), img.get(0, 2, 2));
    }

    #[test]
    #[should_panic(expected = "non-zero dimensions")]
    fn zero_dimensions_rejected() {
        Image::from_planes(0, 3, [vec![], vec![], vec![]]);
    }

    #[test]
    #[should_panic(expected = "plane length mismatch")]
    fn short_plane_rejected() {
        Image::from_planes(2, 2, [vec![0; 4], vec![0; 3], vec![0; 4]]);
    }
}
