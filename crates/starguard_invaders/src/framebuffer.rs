use starguard_common::color::Color;

use crate::render::{DrawSurface, ImageAsset};

/// Side of one font pixel, in surface pixels.
const FONT_CELL: i64 = 3;
const GLYPH_WIDTH: i64 = 4;
const GLYPH_HEIGHT: i64 = 5;

/// 4x5 hex-style digits, one row per byte, high nibble used.
const DIGITS: [[u8; 5]; 10] = [
    [0xF0, 0x90, 0x90, 0x90, 0xF0], // 0
    [0x20, 0x60, 0x20, 0x20, 0x70], // 1
    [0xF0, 0x10, 0xF0, 0x80, 0xF0], // 2
    [0xF0, 0x10, 0xF0, 0x10, 0xF0], // 3
    [0x90, 0x90, 0xF0, 0x10, 0x10], // 4
    [0xF0, 0x80, 0xF0, 0x10, 0xF0], // 5
    [0xF0, 0x80, 0xF0, 0x90, 0xF0], // 6
    [0xF0, 0x10, 0x20, 0x40, 0x40], // 7
    [0xF0, 0x90, 0xF0, 0x90, 0xF0], // 8
    [0xF0, 0x90, 0xF0, 0x10, 0xF0], // 9
];

/// Software `DrawSurface` over an RGB24 buffer, used by the desktop frontend.
///
/// Sprites are drawn as solid tinted boxes; text supports digits only.
pub struct FrameBuffer<'a> {
    pixels: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> FrameBuffer<'a> {
    pub const BACKGROUND: Color = Color::BLACK;
    pub const INK: Color = Color::WHITE;

    pub fn new(pixels: &'a mut [u8], width: usize, height: usize) -> Self {
        debug_assert_eq!(pixels.len(), width * height * 3);
        Self {
            pixels,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Color {
        let idx = (y * self.width + x) * 3;
        Color::new_rgb(self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2])
    }

    /// Fill a rectangle, clipped to the buffer. Edges round to the nearest
    /// pixel.
    pub fn fill(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        let (x0, x1) = clip_span(x, x + width, self.width);
        let (y0, y1) = clip_span(y, y + height, self.height);
        for row in y0..y1 {
            for col in x0..x1 {
                let idx = (row * self.width + col) * 3;
                self.pixels[idx] = color.r;
                self.pixels[idx + 1] = color.g;
                self.pixels[idx + 2] = color.b;
            }
        }
    }

    fn draw_digit(&mut self, digit: usize, left: i64, top: i64, color: Color) {
        for (row, bits) in DIGITS[digit].iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (0x80 >> col) == 0 {
                    continue;
                }
                self.fill(
                    (left + col * FONT_CELL) as f64,
                    (top + row as i64 * FONT_CELL) as f64,
                    FONT_CELL as f64,
                    FONT_CELL as f64,
                    color,
                );
            }
        }
    }
}

fn clip_span(start: f64, end: f64, limit: usize) -> (usize, usize) {
    let clip = |v: f64| v.round().clamp(0.0, limit as f64) as usize;
    (clip(start), clip(end))
}

fn tint(image: ImageAsset) -> Color {
    match image {
        ImageAsset::Player => Color::GREEN,
        ImageAsset::Invader => Color::WHITE,
    }
}

impl DrawSurface for FrameBuffer<'_> {
    fn clear(&mut self, width: f64, height: f64) {
        self.fill(0.0, 0.0, width, height, Self::BACKGROUND);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.fill(x, y, width, height, Self::INK);
    }

    fn draw_image(&mut self, image: ImageAsset, x: f64, y: f64, width: f64, height: f64) {
        self.fill(x, y, width, height, tint(image));
    }

    /// `y` is the text baseline, as on a 2D canvas.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, max_width: f64) {
        let advance = (GLYPH_WIDTH + 1) * FONT_CELL;
        let top = y.round() as i64 - GLYPH_HEIGHT * FONT_CELL;
        let mut left = x.round() as i64;
        let right = (x + max_width).round() as i64;

        for ch in text.chars() {
            if left + GLYPH_WIDTH * FONT_CELL > right {
                break;
            }
            if let Some(digit) = ch.to_digit(10) {
                self.draw_digit(digit as usize, left, top, Self::INK);
            }
            left += advance;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(width: usize, height: usize) -> Vec<u8> {
        vec![0x55; width * height * 3]
    }

    #[test]
    fn clear_paints_the_background() {
        let mut pixels = buffer(8, 4);
        let mut fb = FrameBuffer::new(&mut pixels, 8, 4);
        fb.clear(8.0, 4.0);
        assert!(pixels.iter().all(|&b| b == 0));
    }

    #[test]
    fn rects_are_clipped_to_the_buffer() {
        let mut pixels = buffer(10, 10);
        let mut fb = FrameBuffer::new(&mut pixels, 10, 10);
        fb.clear(10.0, 10.0);
        fb.fill_rect(-5.0, 8.0, 7.0, 50.0);

        assert_eq!(fb.pixel(0, 8), Color::WHITE);
        assert_eq!(fb.pixel(1, 9), Color::WHITE);
        assert_eq!(fb.pixel(2, 9), Color::BLACK);
        assert_eq!(fb.pixel(0, 7), Color::BLACK);
    }

    #[test]
    fn half_pixel_edges_round() {
        let mut pixels = buffer(10, 2);
        let mut fb = FrameBuffer::new(&mut pixels, 10, 2);
        fb.clear(10.0, 2.0);
        fb.fill_rect(2.5, 0.0, 3.0, 1.0);
        let lit: Vec<usize> = (0..10).filter(|&x| fb.pixel(x, 0) == Color::WHITE).collect();
        assert_eq!(lit, vec![3, 4, 5]);
    }

    #[test]
    fn images_are_tinted_boxes() {
        let mut pixels = buffer(4, 4);
        let mut fb = FrameBuffer::new(&mut pixels, 4, 4);
        fb.draw_image(ImageAsset::Player, 0.0, 0.0, 2.0, 2.0);
        assert_eq!(fb.pixel(1, 1), Color::GREEN);
        assert_ne!(fb.pixel(2, 2), Color::GREEN);
    }

    #[test]
    fn digits_sit_on_the_baseline() {
        let mut pixels = buffer(40, 30);
        let mut fb = FrameBuffer::new(&mut pixels, 40, 30);
        fb.clear(40.0, 30.0);
        fb.fill_text("1", 0.0, 25.0, 100.0);

        // Glyph spans rows 10..25; the "1" stem is column 2 of the glyph.
        assert_eq!(fb.pixel(7, 10), Color::WHITE);
        assert_eq!(fb.pixel(7, 24), Color::WHITE);
        assert_eq!(fb.pixel(7, 9), Color::BLACK);
        assert_eq!(fb.pixel(7, 25), Color::BLACK);
        assert_eq!(fb.pixel(0, 10), Color::BLACK);
    }

    #[test]
    fn text_stops_at_max_width() {
        let mut pixels = buffer(60, 20);
        let mut fb = FrameBuffer::new(&mut pixels, 60, 20);
        fb.clear(60.0, 20.0);
        fb.fill_text("88", 0.0, 15.0, 14.0);

        assert_eq!(fb.pixel(0, 0), Color::WHITE);
        assert!((15..60).all(|x| (0..20).all(|y| fb.pixel(x, y) == Color::BLACK)));
    }
}
