use std::path::Path;

use image::Rgb;
use tracing::debug;

use super::normalize::normalize;
use crate::canvas::{Canvas, Color, RED, WHITE};
use crate::error::Result;

/// Similarity (percent) a pair must reach to pass when no threshold is given.
pub const DEFAULT_THRESHOLD: f64 = 95.0;

/// Gain applied to the grayscale delta around its mean level.
const CONTRAST_FACTOR: f32 = 5.0;

/// How far image B is pushed toward white to form the diff backdrop.
const BACKDROP_FADE: f32 = 0.7;

#[derive(Debug, Clone)]
pub struct DiffResult {
    /// Percentage of exactly matching pixels, rounded to 2 decimals.
    pub similarity: f64,
    /// `similarity >= threshold`.
    pub passed: bool,
    /// Highlighted diff, same size as the normalized inputs.
    pub diff_image: Canvas,
    /// `Some((a_w, a_h, b_w, b_h))` when the inputs had different dimensions.
    pub dimension_mismatch: Option<(u32, u32, u32, u32)>,
}

/// Pixel diff of two images.
///
/// 1. Pad both to the same size (white, top-left anchored)
/// 2. Per-channel absolute difference; all zero means identical
/// 3. Grayscale + contrast boost of the difference
/// 4. Red highlight over a faded copy of `current`
///
/// Similarity counts pixels whose boosted gray level is exactly zero. Small
/// differences that the boost pushes below zero count as matches; larger ones
/// count as fully different regardless of magnitude.
pub fn diff(reference: &Canvas, current: &Canvas, threshold: f64) -> Result<DiffResult> {
    let dimension_mismatch = if reference.dimensions() != current.dimensions() {
        Some((
            reference.width(),
            reference.height(),
            current.width(),
            current.height(),
        ))
    } else {
        None
    };

    let (a, b) = normalize(reference, current)?;
    let (width, height) = a.dimensions();

    let delta = Canvas::from_fn(width, height, |x, y| {
        let (pa, pb) = (a.pixel(x, y), b.pixel(x, y));
        Rgb([
            pa[0].abs_diff(pb[0]),
            pa[1].abs_diff(pb[1]),
            pa[2].abs_diff(pb[2]),
        ])
    });

    // Fast path: nothing differs anywhere.
    if delta.pixels().all(|p| p.0 == [0, 0, 0]) {
        return Ok(DiffResult {
            similarity: 100.0,
            passed: 100.0 >= threshold,
            diff_image: b,
            dimension_mismatch,
        });
    }

    let gray: Vec<u8> = delta.pixels().map(|p| luma(*p)).collect();
    let mask = boost_contrast(&gray, CONTRAST_FACTOR);

    let diff_image = Canvas::from_fn(width, height, |x, y| {
        let m = mask[(y as usize) * (width as usize) + x as usize];
        let backdrop = blend(b.pixel(x, y), WHITE, BACKDROP_FADE);
        composite(RED, backdrop, m)
    });

    let identical = mask.iter().filter(|&&v| v == 0).count();
    let total = mask.len();
    let similarity = round2(identical as f64 / total as f64 * 100.0);
    debug!(identical, total, similarity, "pixel diff");

    Ok(DiffResult {
        similarity,
        passed: similarity >= threshold,
        diff_image,
        dimension_mismatch,
    })
}

/// Load two images, diff them, and write the visualization to `output`.
pub fn diff_files(
    reference: &Path,
    current: &Path,
    output: &Path,
    threshold: f64,
) -> Result<DiffResult> {
    let reference_img = Canvas::load(reference)?;
    let current_img = Canvas::load(current)?;
    let result = diff(&reference_img, &current_img, threshold)?;
    result.diff_image.save(output)?;
    debug!(
        output = %output.display(),
        similarity = result.similarity,
        passed = result.passed,
        "wrote diff image"
    );
    Ok(result)
}

/// ITU-R 601-2 luma in 16-bit fixed point.
fn luma(p: Color) -> u8 {
    let [r, g, b] = p.0.map(u32::from);
    ((r * 19595 + g * 38470 + b * 7471 + 0x8000) >> 16) as u8
}

/// Stretch each level away from the rounded mean level by `factor`,
/// clamping to `0..=255`.
fn boost_contrast(gray: &[u8], factor: f32) -> Vec<u8> {
    if gray.is_empty() {
        return Vec::new();
    }
    let sum: u64 = gray.iter().map(|&v| u64::from(v)).sum();
    let mean = (sum as f64 / gray.len() as f64 + 0.5).floor() as f32;
    gray.iter()
        .map(|&v| (mean + factor * (f32::from(v) - mean)).clamp(0.0, 255.0) as u8)
        .collect()
}

/// Linear interpolation from `from` toward `to`, truncating.
fn blend(from: Color, to: Color, alpha: f32) -> Color {
    let mix = |a: u8, b: u8| (f32::from(a) + alpha * (f32::from(b) - f32::from(a))) as u8;
    Rgb([
        mix(from[0], to[0]),
        mix(from[1], to[1]),
        mix(from[2], to[2]),
    ])
}

/// `over` on top of `base` with an 8-bit coverage mask, rounded.
fn composite(over: Color, base: Color, mask: u8) -> Color {
    let m = u32::from(mask);
    let mix = |o: u8, b: u8| {
        let v = u32::from(b) * (255 - m) + u32::from(o) * m + 128;
        ((v + (v >> 8)) >> 8) as u8
    };
    Rgb([
        mix(over[0], base[0]),
        mix(over[1], base[1]),
        mix(over[2], base[2]),
    ])
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
