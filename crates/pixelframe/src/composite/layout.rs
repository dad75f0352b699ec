use super::LayoutConfig;
use crate::error::{Error, Result};

/// Where one card goes on the composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Index into the card list (input order).
    pub card: usize,
    pub x: u32,
    pub y: u32,
}

/// Grid geometry, computed without touching any pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: u32,
    pub rows: u32,
    pub card_width: u32,
    pub row_heights: Vec<u32>,
    pub width: u32,
    pub height: u32,
    pub placements: Vec<Placement>,
}

/// Fixed column table keyed on image count.
pub fn column_count(n: usize) -> usize {
    match n {
        0..=2 => n,
        3..=4 => 2,
        5..=9 => 3,
        _ => 4,
    }
}

/// Height of a card holding a thumbnail of `thumb_height`.
pub fn card_height(thumb_height: u32, config: &LayoutConfig) -> u32 {
    thumb_height + config.label_height + 2 * config.inner_padding
}

/// Place cards row-major in input order.
///
/// Each row is as tall as its tallest card; cards are never reordered.
pub fn compute_layout(card_heights: &[u32], config: &LayoutConfig) -> Result<GridLayout> {
    if card_heights.is_empty() {
        return Err(Error::EmptyInput);
    }

    let columns = column_count(card_heights.len());
    let rows = card_heights.len().div_ceil(columns);
    let card_width = config.thumb_width + 2 * config.inner_padding;
    let outer = config.outer_padding;

    let row_heights: Vec<u32> = card_heights
        .chunks(columns)
        .map(|row| row.iter().copied().max().unwrap_or(0))
        .collect();

    let mut placements = Vec::with_capacity(card_heights.len());
    let mut y = outer;
    for (row, row_height) in row_heights.iter().enumerate() {
        let mut x = outer;
        for card in (row * columns..(row + 1) * columns).take_while(|&i| i < card_heights.len()) {
            placements.push(Placement { card, x, y });
            x += card_width + outer;
        }
        y += row_height + outer;
    }

    let (columns, rows) = (columns as u32, rows as u32);
    Ok(GridLayout {
        columns,
        rows,
        card_width,
        width: columns * card_width + (columns + 1) * outer,
        height: row_heights.iter().sum::<u32>() + (rows + 1) * outer,
        row_heights,
        placements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_table() {
        for (n, cols) in [
            (1, 1),
            (2, 2),
            (3, 2),
            (4, 2),
            (5, 3),
            (9, 3),
            (10, 4),
            (16, 4),
            (40, 4),
        ] {
            assert_eq!(column_count(n), cols, "n = {n}");
        }
    }

    #[test]
    fn empty_is_error() {
        let err = compute_layout(&[], &LayoutConfig::default()).unwrap_err();
        assert!(matches!(err, Error::EmptyInput));
    }

    #[test]
    fn single_card() {
        let config = LayoutConfig::default();
        let layout = compute_layout(&[300], &config).unwrap();
        assert_eq!((layout.columns, layout.rows), (1, 1));
        assert_eq!(layout.card_width, 624);
        assert_eq!(layout.width, 624 + 2 * 40);
        assert_eq!(layout.height, 300 + 2 * 40);
        assert_eq!(layout.placements, vec![Placement { card: 0, x: 40, y: 40 }]);
    }

    #[test]
    fn rows_take_tallest_card() {
        let config = LayoutConfig {
            thumb_width: 100,
            inner_padding: 5,
            outer_padding: 10,
            ..LayoutConfig::default()
        };
        // 5 cards -> 3 columns, 2 rows.
        let layout = compute_layout(&[50, 80, 60, 200, 20], &config).unwrap();
        assert_eq!((layout.columns, layout.rows), (3, 2));
        assert_eq!(layout.row_heights, vec![80, 200]);
        assert_eq!(layout.width, 3 * 110 + 4 * 10);
        assert_eq!(layout.height, 280 + 3 * 10);

        let coords: Vec<(usize, u32, u32)> =
            layout.placements.iter().map(|p| (p.card, p.x, p.y)).collect();
        assert_eq!(
            coords,
            vec![
                (0, 10, 10),
                (1, 130, 10),
                (2, 250, 10),
                (3, 10, 100),
                (4, 130, 100),
            ]
        );
    }

    #[test]
    fn never_drops_cards() {
        let config = LayoutConfig::default();
        for n in 1..=23 {
            let heights = vec![100; n];
            let layout = compute_layout(&heights, &config).unwrap();
            let order: Vec<usize> = layout.placements.iter().map(|p| p.card).collect();
            assert_eq!(order, (0..n).collect::<Vec<_>>());
            assert_eq!(layout.rows as usize, n.div_ceil(column_count(n)));
        }
    }
}
