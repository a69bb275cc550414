use std::path::Path;

use image::{ColorType, ImageFormat};

use crate::ember::error::RenderError;

/// 최종 결과 이미지. 픽셀 하나는 (A << 24) | (B << 16) | (G << 8) | R 로 묶인 u32.
#[derive(Debug, Clone, Default)]
pub struct OutputImage {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl OutputImage {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        self.pixels[(y * self.width + x) as usize]
    }

    // 호스트 엔디안과 상관없이 언제나 [R, G, B, A] 순서
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|pixel| pixel.to_le_bytes()).collect()
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), RenderError> {
        image::save_buffer_with_format(
            path,
            &self.to_rgba8(),
            self.width,
            self.height,
            ColorType::Rgba8,
            ImageFormat::Png,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_rgba8_is_red_first() {
        let mut image = OutputImage::new(2, 1);
        image.pixels_mut()[0] = 0xFF33_2211;
        image.pixels_mut()[1] = 0x8000_00FF;

        assert_eq!(image.to_rgba8(), vec![0x11, 0x22, 0x33, 0xFF, 0xFF, 0x00, 0x00, 0x80]);
        assert_eq!(image.pixel(1, 0), 0x8000_00FF);
    }

    #[test]
    fn test_empty_image() {
        let image = OutputImage::new(0, 0);
        assert_eq!(image.pixel_count(), 0);
        assert!(image.to_rgba8().is_empty());
    }
}
