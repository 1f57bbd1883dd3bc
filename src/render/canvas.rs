//! CPU pixel canvas backing the on-screen background.
//!
//! Pixels are straight-alpha RGBA8 in sRGB, laid out row-major from the
//! top-left corner, which is the byte layout of an `Rgba8UnormSrgb` texture.

use bevy::color::Srgba;
use bytemuck::{Pod, Zeroable};

use super::surface::DrawSurface;
use crate::error::SurfaceError;
use crate::resources::SurfaceSize;

/// One canvas pixel.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0 };
}

/// Software rasterizer with anti-aliased disks and hairlines.
#[derive(Clone, Debug)]
pub struct PixelCanvas {
    size: SurfaceSize,
    pixels: Vec<Rgba8>,
}

impl PixelCanvas {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            pixels: vec![Rgba8::TRANSPARENT; size.area() as usize],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.pixels.get(self.index(x as usize, y as usize)).copied()
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Raw RGBA bytes, 4 per pixel.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Copy the canvas into `out`, which must be exactly as long as
    /// [`PixelCanvas::as_bytes`].
    pub fn write_rgba(&self, out: &mut [u8]) -> Result<(), SurfaceError> {
        let bytes = self.as_bytes();
        if out.len() != bytes.len() {
            return Err(SurfaceError::SizeMismatch {
                expected: bytes.len(),
                actual: out.len(),
            });
        }
        out.copy_from_slice(bytes);
        Ok(())
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.size.width as usize + x
    }

    /// Source-over blend of `color` scaled by `coverage` into one pixel.
    fn blend(&mut self, x: i64, y: i64, color: Srgba, coverage: f32) {
        if x < 0 || y < 0 || x >= self.size.width as i64 || y >= self.size.height as i64 {
            return;
        }
        let src_a = (color.alpha * coverage).clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return;
        }
        let index = self.index(x as usize, y as usize);
        let dst = self.pixels[index];
        let dst_a = dst.a as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);

        let mix = |src: f32, dst: u8| -> u8 {
            let dst = dst as f32 / 255.0;
            let value = (src * src_a + dst * dst_a * (1.0 - src_a)) / out_a;
            (value.clamp(0.0, 1.0) * 255.0).round() as u8
        };

        self.pixels[index] = Rgba8 {
            r: mix(color.red, dst.r),
            g: mix(color.green, dst.g),
            b: mix(color.blue, dst.b),
            a: (out_a * 255.0).round() as u8,
        };
    }
}

impl DrawSurface for PixelCanvas {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn set_size(&mut self, size: SurfaceSize) {
        self.size = size;
        self.pixels.clear();
        self.pixels.resize(size.area() as usize, Rgba8::TRANSPARENT);
    }

    fn clear(&mut self) {
        self.pixels.fill(Rgba8::TRANSPARENT);
    }

    fn fill_disk(&mut self, center: [f32; 2], radius: f32, color: Srgba) {
        if !(center[0].is_finite() && center[1].is_finite() && radius > 0.0) {
            return;
        }
        let reach = radius + 1.0;
        let min_x = ((center[0] - reach).floor() as i64).max(0);
        let max_x = ((center[0] + reach).ceil() as i64).min(self.size.width as i64 - 1);
        let min_y = ((center[1] - reach).floor() as i64).max(0);
        let max_y = ((center[1] + reach).ceil() as i64).min(self.size.height as i64 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 + 0.5 - center[0];
                let dy = y as f32 + 0.5 - center[1];
                // one pixel wide soft edge around the exact circle
                let coverage = (radius + 0.5 - (dx * dx + dy * dy).sqrt()).clamp(0.0, 1.0);
                self.blend(x, y, color, coverage);
            }
        }
    }

    fn stroke_line(&mut self, from: [f32; 2], to: [f32; 2], width: f32, color: Srgba) {
        if !(from.iter().chain(to.iter()).all(|v| v.is_finite()) && width > 0.0) {
            return;
        }
        let intensity = width.min(1.0);
        let steep = (to[1] - from[1]).abs() > (to[0] - from[0]).abs();

        // walk the major axis one pixel at a time, splitting coverage over
        // the two pixels straddling the line on the minor axis
        let (mut a, mut b) = if steep {
            ([from[1], from[0]], [to[1], to[0]])
        } else {
            (from, to)
        };
        if a[0] > b[0] {
            std::mem::swap(&mut a, &mut b);
        }
        let run = b[0] - a[0];
        let gradient = if run == 0.0 { 0.0 } else { (b[1] - a[1]) / run };

        let major_extent = (if steep { self.size.height } else { self.size.width }) as i64;
        let first = (a[0].floor() as i64).max(0);
        let last = (b[0].floor() as i64).min(major_extent - 1);

        for major in first..=last {
            let sample = (major as f32 + 0.5).clamp(a[0], b[0]);
            let minor = a[1] + gradient * (sample - a[0]) - 0.5;
            let row = minor.floor();
            let frac = minor - row;
            let row = row as i64;

            let (near, far) = ((1.0 - frac) * intensity, frac * intensity);
            if steep {
                self.blend(row, major, color, near);
                self.blend(row + 1, major, color, far);
            } else {
                self.blend(major, row, color, near);
                self.blend(major, row + 1, color, far);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: Srgba = Srgba::new(0.062_745_1, 0.725_490_2, 0.505_882_4, 1.0);

    #[test]
    fn new_canvas_is_transparent() {
        let canvas = PixelCanvas::new(SurfaceSize::new(4, 3));
        assert_eq!(canvas.pixels().len(), 12);
        assert_eq!(canvas.as_bytes().len(), 48);
        assert!(canvas.pixels().iter().all(|p| *p == Rgba8::TRANSPARENT));
    }

    #[test]
    fn disk_paints_its_center_and_leaves_far_pixels() {
        let mut canvas = PixelCanvas::new(SurfaceSize::new(20, 20));
        canvas.fill_disk([10.0, 10.0], 2.0, GREEN);
        let center = canvas.pixel(10, 10).unwrap();
        assert_eq!((center.r, center.g, center.b, center.a), (16, 185, 129, 255));
        assert_eq!(canvas.pixel(0, 0), Some(Rgba8::TRANSPARENT));
        assert_eq!(canvas.pixel(19, 10), Some(Rgba8::TRANSPARENT));
    }

    #[test]
    fn disk_alpha_is_straight_not_premultiplied() {
        let mut canvas = PixelCanvas::new(SurfaceSize::new(8, 8));
        canvas.fill_disk([4.0, 4.0], 2.0, Srgba { alpha: 0.5, ..GREEN });
        let p = canvas.pixel(4, 4).unwrap();
        assert_eq!((p.r, p.g, p.b), (16, 185, 129));
        assert_eq!(p.a, 128);
    }

    #[test]
    fn shapes_off_canvas_are_clipped() {
        let mut canvas = PixelCanvas::new(SurfaceSize::new(10, 10));
        canvas.fill_disk([-50.0, -50.0], 2.0, GREEN);
        canvas.stroke_line([-100.0, 5.0], [-20.0, 5.0], 1.0, GREEN);
        canvas.fill_disk([f32::NAN, 1.0], 2.0, GREEN);
        assert!(canvas.pixels().iter().all(|p| *p == Rgba8::TRANSPARENT));
    }

    #[test]
    fn horizontal_line_covers_its_row() {
        let mut canvas = PixelCanvas::new(SurfaceSize::new(10, 10));
        canvas.stroke_line([0.0, 4.5], [10.0, 4.5], 1.0, GREEN);
        for x in 0..10 {
            assert_eq!(canvas.pixel(x, 4).unwrap().a, 255, "x = {x}");
        }
        assert_eq!(canvas.pixel(5, 2), Some(Rgba8::TRANSPARENT));
    }

    #[test]
    fn steep_line_walks_rows() {
        let mut canvas = PixelCanvas::new(SurfaceSize::new(10, 10));
        canvas.stroke_line([3.5, 9.0], [3.5, 0.0], 1.0, GREEN);
        for y in 0..9 {
            assert!(canvas.pixel(3, y).unwrap().a > 0, "y = {y}");
        }
    }

    #[test]
    fn clear_and_resize_reset_pixels() {
        let mut canvas = PixelCanvas::new(SurfaceSize::new(6, 6));
        canvas.fill_disk([3.0, 3.0], 2.0, GREEN);
        canvas.clear();
        assert!(canvas.pixels().iter().all(|p| *p == Rgba8::TRANSPARENT));

        canvas.set_size(SurfaceSize::new(3, 2));
        assert_eq!(canvas.size(), SurfaceSize::new(3, 2));
        assert_eq!(canvas.pixels().len(), 6);
    }

    #[test]
    fn write_rgba_checks_length() {
        let canvas = PixelCanvas::new(SurfaceSize::new(2, 2));
        let mut out = vec![1u8; 16];
        assert!(canvas.write_rgba(&mut out).is_ok());
        assert!(out.iter().all(|b| *b == 0));

        let mut short = vec![0u8; 15];
        assert_eq!(
            canvas.write_rgba(&mut short),
            Err(SurfaceError::SizeMismatch { expected: 16, actual: 15 })
        );
    }
}
