use image::Rgb;
use tracing::debug;

use super::{Card, GridLayout, LayoutConfig};
use crate::canvas::{Canvas, Color, ESTIMATED_CHAR_WIDTH, Font, text_width};
use crate::error::Result;

const ELLIPSIS: &str = "...";

/// Rasterize a computed layout.
///
/// `cards` must be the list the layout was computed from.
pub fn render(cards: &[Card], layout: &GridLayout, config: &LayoutConfig) -> Result<Canvas> {
    let mut canvas = Canvas::new(layout.width, layout.height, Rgb(config.background));
    let font = Font::resolve(config.font_scale, config.label_height);
    if font.is_none() {
        debug!(
            label_height = config.label_height,
            "label strip too short for text, captions skipped"
        );
    }

    for (placement, card) in layout.placements.iter().zip(cards) {
        let (x, y) = (placement.x, placement.y);
        canvas.fill_rect(x, y, layout.card_width, card.height, Rgb(config.card_background))?;
        canvas.draw_border(x, y, layout.card_width, card.height, Rgb(config.border))?;

        let thumb_x = x + layout.card_width.saturating_sub(card.thumbnail.width()) / 2;
        canvas.paste(&card.thumbnail, thumb_x, y + config.inner_padding)?;

        let strip_y = y + config.inner_padding + card.thumbnail.height();
        draw_caption(
            &mut canvas,
            font.as_ref(),
            &card.label,
            Caption {
                x,
                y: strip_y,
                width: layout.card_width,
                height: config.label_height,
                padding: config.inner_padding,
                color: Rgb(config.text),
            },
        )?;
    }

    Ok(canvas)
}

/// Box a caption is centered in.
pub(crate) struct Caption {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub padding: u32,
    pub color: Color,
}

pub(crate) fn draw_caption(
    canvas: &mut Canvas,
    font: Option<&Font>,
    label: &str,
    caption: Caption,
) -> Result<()> {
    let available = caption.width.saturating_sub(2 * caption.padding);
    let text = fit_label(label, font, available);
    let text_x = caption.x + caption.width.saturating_sub(text_width(font, &text)) / 2;
    match font {
        Some(font) => {
            let text_y = caption.y + caption.height.saturating_sub(font.height()) / 2;
            canvas.draw_text(text_x, text_y, &text, font, caption.color)
        }
        None => Ok(()),
    }
}

/// Shorten `label` with a trailing `...` until it fits `max_width`.
pub(crate) fn fit_label(label: &str, font: Option<&Font>, max_width: u32) -> String {
    if text_width(font, label) <= max_width {
        return label.to_string();
    }
    let char_width = font.map_or(ESTIMATED_CHAR_WIDTH, |f| f.advance()).max(1);
    let max_chars = (max_width / char_width) as usize;
    let ellipsis_len = ELLIPSIS.len();
    if max_chars <= ellipsis_len {
        return label.chars().take(max_chars).collect();
    }
    let mut fitted: String = label.chars().take(max_chars - ellipsis_len).collect();
    fitted.push_str(ELLIPSIS);
    fitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composite::compute_layout;

    #[test]
    fn short_labels_are_kept() {
        assert_eq!(fit_label("mobile", None, 48), "mobile");
    }

    #[test]
    fn long_labels_get_ellipsis() {
        let font = Font::resolve(2, 16).unwrap();
        // 16px per char, room for 5.
        assert_eq!(fit_label("desktop (1920x1080)", Some(&font), 80), "de...");
        assert_eq!(fit_label("desktop", None, 24), "des");
        assert_eq!(fit_label("desktop", None, 0), "");
    }

    #[test]
    fn draws_card_frame_and_caption() {
        let config = LayoutConfig {
            thumb_width: 40,
            label_height: 16,
            inner_padding: 4,
            outer_padding: 6,
            font_scale: 1,
            ..LayoutConfig::default()
        };
        let card = Card {
            thumbnail: Canvas::new(40, 20, Rgb([0, 0, 255])),
            label: "Hi".to_string(),
            height: 20 + 16 + 8,
            truncated: false,
        };
        let layout = compute_layout(&[card.height], &config).unwrap();
        let canvas = render(&[card], &layout, &config).unwrap();

        assert_eq!(canvas.dimensions(), (48 + 12, 44 + 12));
        assert_eq!(canvas.pixel(0, 0), Rgb(config.background));
        assert_eq!(canvas.pixel(6, 6), Rgb(config.border));
        assert_eq!(canvas.pixel(7, 7), Rgb(config.card_background));
        assert_eq!(canvas.pixel(30, 20), Rgb([0, 0, 255]));

        // Caption ink lies within the label strip, centered around x = 30.
        let strip = 6 + 4 + 20..6 + 4 + 20 + 16;
        let ink: Vec<(u32, u32)> = strip
            .flat_map(|y| (0..canvas.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y) == Rgb(config.text))
            .collect();
        assert!(!ink.is_empty());
        assert!(ink.iter().all(|&(x, _)| (14..46).contains(&x)));
    }
}
