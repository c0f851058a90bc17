//! Flat RGBA pixel buffer for debug output.

use rustc_hash::FxHashSet;

/// Row-major RGBA image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebugImage {
    pub width: u32,
    pub height: u32,
    /// `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

impl DebugImage {
    /// Creates a transparent black image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the image.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let idx = self.index(x, y);
        self.pixels[idx..idx + 4].copy_from_slice(&rgba);
    }

    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the image.
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = self.index(x, y);
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Distinct RGB colours, alpha ignored.
    pub fn unique_color_count(&self) -> usize {
        self.pixels
            .chunks_exact(4)
            .map(|p| (p[0], p[1], p[2]))
            .collect::<FxHashSet<_>>()
            .len()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) outside {}x{}", self.width, self.height);
        (y as usize * self.width as usize + x as usize) * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_image_is_zeroed() {
        let image = DebugImage::new(32, 8);
        assert_eq!(image.dimensions(), (32, 8));
        assert_eq!(image.pixels.len(), 32 * 8 * 4);
        assert!(image.pixels.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_set_pixel_writes_row_major() {
        let mut image = DebugImage::new(10, 10);
        image.set_pixel(3, 5, [200, 100, 50, 255]);
        let idx = (5 * 10 + 3) * 4;
        assert_eq!(&image.pixels[idx..idx + 4], &[200, 100, 50, 255]);
        assert_eq!(image.get_pixel(3, 5), [200, 100, 50, 255]);
    }

    #[test]
    fn test_unique_colors_ignore_alpha() {
        let mut image = DebugImage::new(3, 1);
        image.set_pixel(0, 0, [1, 2, 3, 255]);
        image.set_pixel(1, 0, [1, 2, 3, 10]);
        image.set_pixel(2, 0, [9, 9, 9, 255]);
        assert_eq!(image.unique_color_count(), 2);
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds_pixel_panics() {
        let mut image = DebugImage::new(4, 4);
        image.set_pixel(4, 0, [0; 4]);
    }
}
