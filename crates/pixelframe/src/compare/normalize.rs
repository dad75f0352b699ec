use crate::canvas::{Canvas, WHITE};
use crate::error::Result;

/// Bring two images to the same size without scaling.
///
/// The target is the bounding box of both inputs. A smaller image is pasted at
/// the top-left corner of a white canvas, so everything outside its original
/// area reads as white.
pub fn normalize(left: &Canvas, right: &Canvas) -> Result<(Canvas, Canvas)> {
    let width = left.width().max(right.width());
    let height = left.height().max(right.height());
    Ok((pad_to(left, width, height)?, pad_to(right, width, height)?))
}

fn pad_to(src: &Canvas, width: u32, height: u32) -> Result<Canvas> {
    if src.dimensions() == (width, height) {
        return Ok(src.clone());
    }
    let mut canvas = Canvas::new(width, height, WHITE);
    canvas.paste(src, 0, 0)?;
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn pads_to_bounding_box() {
        let wide = Canvas::new(100, 100, Rgb([10, 10, 10]));
        let tall = Canvas::from_fn(50, 200, |x, y| Rgb([x as u8, (y % 256) as u8, 3]));

        let (a, b) = normalize(&wide, &tall).unwrap();
        assert_eq!(a.dimensions(), (100, 200));
        assert_eq!(b.dimensions(), (100, 200));

        // Original region unmodified.
        for y in 0..200 {
            for x in 0..50 {
                assert_eq!(b.pixel(x, y), tall.pixel(x, y));
            }
        }
        // Padding is white.
        for y in 0..200 {
            for x in 50..100 {
                assert_eq!(b.pixel(x, y), WHITE);
            }
        }
        for y in 100..200 {
            assert_eq!(a.pixel(0, y), WHITE);
        }
        assert_eq!(a.pixel(99, 99), Rgb([10, 10, 10]));
    }

    #[test]
    fn equal_sizes_pass_through() {
        let a = Canvas::new(8, 8, Rgb([1, 2, 3]));
        let b = Canvas::new(8, 8, Rgb([4, 5, 6]));
        let (na, nb) = normalize(&a, &b).unwrap();
        assert_eq!(na, a);
        assert_eq!(nb, b);
    }
}
