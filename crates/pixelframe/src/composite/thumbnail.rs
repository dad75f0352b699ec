use image::Rgb;

use super::LayoutConfig;
use crate::canvas::{Canvas, Color};
use crate::error::Result;

/// Scale `src` to `thumb_width`, keeping aspect ratio.
///
/// Returns the thumbnail and whether it was cut down to `max_thumb_height`.
/// A cut thumbnail fades into the card background over its last
/// `fade_height` rows.
pub fn thumbnail(src: &Canvas, config: &LayoutConfig) -> Result<(Canvas, bool)> {
    let width = config.thumb_width;
    let height = scaled_height(src.width(), src.height(), width);

    if height <= config.max_thumb_height {
        return Ok((src.resize(width, height), false));
    }

    // Only the top of a tall source survives the crop; resample just that.
    let rows = source_rows(src.width(), config.max_thumb_height, width).min(src.height());
    let top = src.crop(0, 0, src.width(), rows)?;
    let resized = top.resize(width, scaled_height(top.width(), rows, width));
    let mut cropped = resized.crop(0, 0, width, config.max_thumb_height)?;
    fade_bottom(&mut cropped, config.fade_height, Rgb(config.card_background))?;
    Ok((cropped, true))
}

/// `height * target_width / width`, rounded down, at least 1.
fn scaled_height(width: u32, height: u32, target_width: u32) -> u32 {
    let scaled = u64::from(height) * u64::from(target_width) / u64::from(width.max(1));
    u32::try_from(scaled).unwrap_or(u32::MAX).max(1)
}

/// Source rows covering `target_height` output rows, plus room for the
/// Lanczos3 window at the cut.
fn source_rows(width: u32, target_height: u32, target_width: u32) -> u32 {
    let (w, tw) = (u64::from(width.max(1)), u64::from(target_width.max(1)));
    let needed = (u64::from(target_height) * w).div_ceil(tw);
    let margin = 3 * w.div_ceil(tw) + 1;
    u32::try_from(needed + margin).unwrap_or(u32::MAX)
}

/// Linear ramp toward `color`, fully opaque on the last row.
fn fade_bottom(canvas: &mut Canvas, fade_height: u32, color: Color) -> Result<()> {
    let rows = fade_height.min(canvas.height());
    let start = canvas.height() - rows;
    for i in 0..rows {
        let alpha = (i + 1) as f32 / rows as f32;
        canvas.draw_gradient_line(start + i, color, alpha)?;
    }
    Ok(())
}
