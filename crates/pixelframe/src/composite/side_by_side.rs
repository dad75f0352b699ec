use image::Rgb;

use super::render::fit_label;
use crate::canvas::{BLACK, Canvas, Color, Font};
use crate::error::{Error, Result};

/// Title used for the diff panel.
pub const DIFF_TITLE: &str = "Diff Overlay";

const PADDING: u32 = 20;
const TITLE_Y: u32 = 20;
const PANEL_Y: u32 = 50;
/// Room above the panels for titles plus a bottom margin.
const EXTRA_HEIGHT: u32 = 60;
const BACKGROUND: Color = Rgb([245, 245, 245]);

/// Lay titled panels out left to right, top-aligned, at native size.
pub fn side_by_side(panels: &[(&Canvas, &str)]) -> Result<Canvas> {
    if panels.is_empty() {
        return Err(Error::EmptyInput);
    }

    let max_h = panels.iter().map(|(img, _)| img.height()).max().unwrap_or(0);
    let total_w = panels.iter().map(|(img, _)| img.width()).sum::<u32>()
        + PADDING * (panels.len() as u32 + 1);
    let mut canvas = Canvas::new(total_w, max_h + EXTRA_HEIGHT, BACKGROUND);
    let font = Font::resolve(1, PANEL_Y - TITLE_Y);

    let mut x = PADDING;
    for (img, title) in panels {
        if let Some(font) = &font {
            let title = fit_label(title, Some(font), total_w - x);
            canvas.draw_text(x, TITLE_Y, &title, font, BLACK)?;
        }
        canvas.paste(img, x, PANEL_Y)?;
        x += img.width() + PADDING;
    }

    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{RED, WHITE};

    #[test]
    fn three_panels() {
        let a = Canvas::new(100, 80, RED);
        let b = Canvas::new(120, 90, WHITE);
        let d = Canvas::new(120, 90, BLACK);
        let out = side_by_side(&[(&a, "baseline"), (&b, "current"), (&d, DIFF_TITLE)]).unwrap();

        assert_eq!(out.dimensions(), (340 + 4 * PADDING, 90 + EXTRA_HEIGHT));
        assert_eq!(out.pixel(PADDING, PANEL_Y), RED);
        assert_eq!(out.pixel(PADDING + 100 + PADDING, PANEL_Y + 89), WHITE);
        assert_eq!(out.pixel(PADDING + 50, PANEL_Y + 85), BACKGROUND);
        assert_eq!(out.pixel(out.width() - 1, PANEL_Y + 10), BACKGROUND);
    }

    #[test]
    fn titles_are_clipped_to_canvas() {
        let tiny = Canvas::new(2, 2, RED);
        let out = side_by_side(&[(&tiny, "a very long title that overflows")]).unwrap();
        assert_eq!(out.width(), 2 + 2 * PADDING);
    }

    #[test]
    fn empty_is_error() {
        assert!(matches!(side_by_side(&[]), Err(Error::EmptyInput)));
    }
}
