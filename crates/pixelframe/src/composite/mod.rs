pub mod layout;
pub mod render;
pub mod side_by_side;
pub mod thumbnail;

use std::fmt;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use self::layout::{GridLayout, Placement, column_count, compute_layout};
use crate::canvas::Canvas;
use crate::error::{Error, Result};

/// Composite grid settings. All sizes are in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub thumb_width: u32,
    /// Taller thumbnails are cropped and faded out at the bottom.
    pub max_thumb_height: u32,
    pub label_height: u32,
    pub inner_padding: u32,
    pub outer_padding: u32,
    pub fade_height: u32,
    pub font_scale: u32,
    pub background: [u8; 3],
    pub card_background: [u8; 3],
    pub border: [u8; 3],
    pub text: [u8; 3],
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            thumb_width: 600,
            max_thumb_height: 1600,
            label_height: 36,
            inner_padding: 12,
            outer_padding: 40,
            fade_height: 60,
            font_scale: 2,
            background: [245, 245, 245],
            card_background: [255, 255, 255],
            border: [210, 210, 210],
            text: [33, 33, 33],
        }
    }
}

/// Caption for a screenshot taken at a named viewport.
///
/// Purely descriptive: it does not constrain the image it labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakpointLabel {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for BreakpointLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}x{})", self.name, self.width, self.height)
    }
}

/// One grid cell before placement.
#[derive(Debug, Clone)]
pub struct Card {
    pub thumbnail: Canvas,
    pub label: String,
    /// Thumbnail + label strip + inner padding.
    pub height: u32,
    /// The thumbnail was cropped to `max_thumb_height`.
    pub truncated: bool,
}

/// Pair every image with a caption, generating `View N` for missing ones.
pub fn fill_labels(count: usize, labels: &[String]) -> Vec<String> {
    (0..count)
        .map(|i| {
            labels
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("View {}", i + 1))
        })
        .collect()
}

/// Thumbnail every image into a card, in input order.
pub fn build_cards(
    images: &[Canvas],
    labels: &[String],
    config: &LayoutConfig,
) -> Result<Vec<Card>> {
    if images.is_empty() {
        return Err(Error::EmptyInput);
    }
    let labels = fill_labels(images.len(), labels);
    images
        .par_iter()
        .zip(labels.into_par_iter())
        .map(|(image, label)| -> Result<Card> {
            let (thumbnail, truncated) = thumbnail::thumbnail(image, config)?;
            Ok(Card {
                height: layout::card_height(thumbnail.height(), config),
                thumbnail,
                label,
                truncated,
            })
        })
        .collect()
}

/// Lay out and rasterize a labeled grid of `images`.
pub fn compose(images: &[Canvas], labels: &[String], config: &LayoutConfig) -> Result<Canvas> {
    let cards = build_cards(images, labels, config)?;
    let heights: Vec<u32> = cards.iter().map(|c| c.height).collect();
    let grid = compute_layout(&heights, config)?;
    debug!(
        cards = cards.len(),
        truncated = cards.iter().filter(|c| c.truncated).count(),
        columns = grid.columns,
        rows = grid.rows,
        width = grid.width,
        height = grid.height,
        "computed grid layout"
    );
    render::render(&cards, &grid, config)
}

/// Load `paths`, compose them, and write the result to `output`.
///
/// Any image that cannot be loaded fails the whole composite.
pub fn compose_files(
    paths: &[PathBuf],
    labels: &[String],
    output: &Path,
    config: &LayoutConfig,
) -> Result<Canvas> {
    let images = paths
        .iter()
        .map(|p| Canvas::load(p))
        .collect::<Result<Vec<_>>>()?;
    let composite = compose(&images, labels, config)?;
    composite.save(output)?;
    info!(
        images = images.len(),
        output = %output.display(),
        "wrote composite"
    );
    Ok(composite)
}
