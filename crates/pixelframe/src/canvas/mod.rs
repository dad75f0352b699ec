mod font;

use std::io::Cursor;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{ImageError, ImageFormat, ImageReader, Rgb, RgbImage};

pub use self::font::{ESTIMATED_CHAR_WIDTH, Font, text_width};
use crate::error::{Error, Result};

pub type Color = Rgb<u8>;

pub const WHITE: Color = Rgb([255, 255, 255]);
pub const BLACK: Color = Rgb([0, 0, 0]);
pub const RED: Color = Rgb([255, 0, 0]);

/// Fixed-size RGB pixel buffer.
///
/// The diff and layout engines only go through these methods, so the
/// imaging library stays behind this one type. Every region-taking
/// operation is bounds-checked and fails with [`Error::OutOfBounds`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    img: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, color: Color) -> Self {
        Self {
            img: RgbImage::from_pixel(width, height, color),
        }
    }

    pub fn from_fn(width: u32, height: u32, f: impl FnMut(u32, u32) -> Color) -> Self {
        Self {
            img: RgbImage::from_fn(width, height, f),
        }
    }

    /// Decode an image file. Alpha, if any, is dropped.
    ///
    /// The file handle lives only for the duration of this call.
    pub fn load(path: &Path) -> Result<Self> {
        let not_found = |source| Error::ImageNotFound {
            path: path.to_path_buf(),
            source,
        };
        let reader = ImageReader::open(path)
            .map_err(not_found)?
            .with_guessed_format()
            .map_err(not_found)?;
        let decoded = reader.decode().map_err(|source| Error::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            img: decoded.to_rgb8(),
        })
    }

    /// Write as a 24-bit RGB PNG, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        let encode_err = |source| Error::Encode {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| encode_err(ImageError::IoError(e)))?;
        }
        self.img
            .save_with_format(path, ImageFormat::Png)
            .map_err(encode_err)
    }

    /// Encode to PNG in memory.
    pub fn to_png(&self) -> Result<Vec<u8>, ImageError> {
        let mut buf = Vec::new();
        self.img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
        Ok(buf)
    }

    pub fn width(&self) -> u32 {
        self.img.width()
    }

    pub fn height(&self) -> u32 {
        self.img.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.img.dimensions()
    }

    /// Panics if `(x, y)` is outside the canvas, like `RgbImage::get_pixel`.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        *self.img.get_pixel(x, y)
    }

    pub fn pixels(&self) -> impl Iterator<Item = &Color> {
        self.img.pixels()
    }

    /// Resample to exactly `width x height` with Lanczos3.
    pub fn resize(&self, width: u32, height: u32) -> Canvas {
        Canvas {
            img: imageops::resize(
                &self.img,
                width.max(1),
                height.max(1),
                FilterType::Lanczos3,
            ),
        }
    }

    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Result<Canvas> {
        self.check_region(x, y, width, height)?;
        Ok(Canvas {
            img: imageops::crop_imm(&self.img, x, y, width, height).to_image(),
        })
    }

    /// Overwrite the region at `(x, y)` with `src`. No blending.
    pub fn paste(&mut self, src: &Canvas, x: u32, y: u32) -> Result<()> {
        self.check_region(x, y, src.width(), src.height())?;
        imageops::replace(&mut self.img, &src.img, i64::from(x), i64::from(y));
        Ok(())
    }

    pub fn fill_rect(
        &mut self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        color: Color,
    ) -> Result<()> {
        self.check_region(x, y, width, height)?;
        for py in y..y + height {
            for px in x..x + width {
                self.img.put_pixel(px, py, color);
            }
        }
        Ok(())
    }

    /// 1px outline just inside the given rectangle.
    pub fn draw_border(
        &mut self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        color: Color,
    ) -> Result<()> {
        self.check_region(x, y, width, height)?;
        if width == 0 || height == 0 {
            return Ok(());
        }
        let (right, bottom) = (x + width - 1, y + height - 1);
        for px in x..=right {
            self.img.put_pixel(px, y, color);
            self.img.put_pixel(px, bottom, color);
        }
        for py in y..=bottom {
            self.img.put_pixel(x, py, color);
            self.img.put_pixel(right, py, color);
        }
        Ok(())
    }

    /// Blend the whole row `y` toward `color` by `alpha` (0.0 keeps the row,
    /// 1.0 replaces it).
    pub fn draw_gradient_line(&mut self, y: u32, color: Color, alpha: f32) -> Result<()> {
        self.check_region(0, y, self.width(), 1)?;
        let alpha = alpha.clamp(0.0, 1.0);
        for x in 0..self.width() {
            let px = self.img.get_pixel_mut(x, y);
            for c in 0..3 {
                let base = f32::from(px[c]);
                px[c] = (base + (f32::from(color[c]) - base) * alpha).round() as u8;
            }
        }
        Ok(())
    }

    /// Draw `text` with its top-left corner at `(x, y)`.
    ///
    /// The full text box (`font.measure(text)` wide, `font.height()` tall)
    /// must fit on the canvas.
    pub fn draw_text(
        &mut self,
        x: u32,
        y: u32,
        text: &str,
        font: &Font,
        color: Color,
    ) -> Result<()> {
        self.check_region(x, y, font.measure(text), font.height())?;
        let scale = font.scale();
        for (i, ch) in text.chars().enumerate() {
            let origin_x = x + i as u32 * font.advance();
            for (row, &bits) in font.glyph(ch).iter().enumerate() {
                for col in 0..font::GLYPH_SIZE {
                    if (bits >> col) & 1 == 0 {
                        continue;
                    }
                    let gx = origin_x + col * scale;
                    let gy = y + row as u32 * scale;
                    for dy in 0..scale {
                        for dx in 0..scale {
                            self.img.put_pixel(gx + dx, gy + dy, color);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn check_region(&self, x: u32, y: u32, w: u32, h: u32) -> Result<()> {
        let fits = |start: u32, len: u32, limit: u32| {
            start.checked_add(len).is_some_and(|end| end <= limit)
        };
        if fits(x, w, self.width()) && fits(y, h, self.height()) {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                x,
                y,
                w,
                h,
                canvas_w: self.width(),
                canvas_h: self.height(),
            })
        }
    }
}
