use tracing::debug;

use super::frequencies::WeightedWord;
use crate::config::CloudOptions;

/// Side of one occupancy cell in pixels.
const CELL: u32 = 4;
/// Slack added to the summed advances, since viewers substitute their own
/// sans-serif face.
const ADVANCE_SLACK: f64 = 1.1;

const VIRIDIS: [(u8, u8, u8); 8] = [
    (68, 1, 84),
    (70, 50, 126),
    (54, 92, 141),
    (39, 127, 142),
    (31, 161, 135),
    (74, 193, 109),
    (159, 218, 58),
    (253, 231, 37),
];

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub font_size: u32,
    /// Top-left corner of the word's box in pixels.
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub color: (u8, u8, u8),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CloudLayout {
    pub width: u32,
    pub height: u32,
    pub words: Vec<PlacedWord>,
}

impl CloudLayout {
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Place words largest-first at the free position nearest the canvas centre.
///
/// Font sizes follow `size = round((rs * w / w_prev + (1 - rs)) * size)`
/// starting from the maximum size, where `rs` is the relative scaling and
/// `w` the word weight. A word that does not fit is retried `font_step`
/// pixels smaller; once the size drops below the minimum, layout stops.
pub fn layout_cloud(words: &[WeightedWord], options: &CloudOptions) -> CloudLayout {
    let mut grid = OccupancyGrid::new(options.width, options.height);
    let candidates = grid.candidates_by_distance();
    let min_font = options.min_font_size.max(1) as i64;
    let rs = options.relative_scaling;

    let mut placed = Vec::new();
    let mut font_size = options.effective_max_font_size() as i64;
    let mut last_weight = 1.0;

    for word in words {
        if word.weight <= 0.0 {
            continue;
        }
        if rs != 0.0 {
            font_size = ((rs * (word.weight / last_weight) + (1.0 - rs)) * font_size as f64).round()
                as i64;
        }

        let mut position = None;
        while font_size >= min_font {
            let (width, height) = text_extent(&word.word, font_size as u32);
            if let Some(cell) = grid.find_free(width, height, &candidates) {
                position = Some((cell, width, height));
                break;
            }
            font_size -= options.font_step.max(1) as i64;
        }

        let Some(((col, row), width, height)) = position else {
            debug!(word = %word.word, "no room left in word cloud");
            break;
        };

        grid.occupy(col, row, width, height);
        placed.push(PlacedWord {
            text: word.word.clone(),
            font_size: font_size as u32,
            x: (col * CELL) as i32,
            y: (row * CELL) as i32,
            width,
            height,
            color: color_for(word.weight),
        });
        last_weight = word.weight;
    }

    CloudLayout {
        width: options.width,
        height: options.height,
        words: placed,
    }
}

/// Box of `text` drawn at `font_size`, from Helvetica advance widths.
pub(crate) fn text_extent(text: &str, font_size: u32) -> (u32, u32) {
    let advance: f64 = text.chars().map(glyph_advance).sum();
    let width = (advance * font_size as f64 * ADVANCE_SLACK).ceil() as u32;
    (width.max(1), font_size.max(1))
}

/// Advance width of one glyph in ems (Helvetica AFM metrics).
fn glyph_advance(glyph: char) -> f64 {
    match glyph {
        'i' | 'j' | 'l' => 0.222,
        'f' | 't' => 0.278,
        'r' => 0.333,
        'c' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' => 0.5,
        'w' => 0.722,
        'm' => 0.833,
        '@' => 1.015,
        'a'..='z' | '0'..='9' => 0.556,
        _ => 1.0,
    }
}

fn color_for(weight: f64) -> (u8, u8, u8) {
    let clamped = weight.clamp(0.0, 1.0);
    let idx = ((1.0 - clamped) * (VIRIDIS.len() - 1) as f64).round() as usize;
    VIRIDIS[idx.min(VIRIDIS.len() - 1)]
}

/// Coarse occupancy map with a summed-area table for O(1) box queries.
struct OccupancyGrid {
    cols: u32,
    rows: u32,
    occupied: Vec<bool>,
    sums: Vec<u32>,
}

impl OccupancyGrid {
    fn new(width: u32, height: u32) -> Self {
        let cols = (width / CELL).max(1);
        let rows = (height / CELL).max(1);
        let mut grid = Self {
            cols,
            rows,
            occupied: vec![false; (cols * rows) as usize],
            sums: Vec::new(),
        };
        grid.rebuild_sums();
        grid
    }

    fn candidates_by_distance(&self) -> Vec<(u32, u32)> {
        let cx = self.cols as f64 / 2.0;
        let cy = self.rows as f64 / 2.0;
        let mut cells: Vec<(u32, u32)> = (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| (col, row)))
            .collect();
        cells.sort_by(|a, b| {
            let da = (a.0 as f64 + 0.5 - cx).powi(2) + (a.1 as f64 + 0.5 - cy).powi(2);
            let db = (b.0 as f64 + 0.5 - cx).powi(2) + (b.1 as f64 + 0.5 - cy).powi(2);
            da.total_cmp(&db)
        });
        cells
    }

    /// First candidate centre whose box of `width`×`height` pixels is free;
    /// returns the box's top-left cell.
    fn find_free(&self, width: u32, height: u32, candidates: &[(u32, u32)]) -> Option<(u32, u32)> {
        let w = width.div_ceil(CELL);
        let h = height.div_ceil(CELL);
        if w > self.cols || h > self.rows {
            return None;
        }
        candidates.iter().find_map(|&(cx, cy)| {
            let col = cx.checked_sub(w / 2)?;
            let row = cy.checked_sub(h / 2)?;
            if col + w > self.cols || row + h > self.rows {
                return None;
            }
            (self.box_sum(col, row, w, h) == 0).then_some((col, row))
        })
    }

    fn occupy(&mut self, col: u32, row: u32, width: u32, height: u32) {
        let w = width.div_ceil(CELL);
        let h = height.div_ceil(CELL);
        for r in row..(row + h).min(self.rows) {
            for c in col..(col + w).min(self.cols) {
                self.occupied[(r * self.cols + c) as usize] = true;
            }
        }
        self.rebuild_sums();
    }

    fn rebuild_sums(&mut self) {
        let stride = (self.cols + 1) as usize;
        let mut sums = vec![0u32; stride * (self.rows + 1) as usize];
        for r in 0..self.rows as usize {
            let mut row_sum = 0u32;
            for c in 0..self.cols as usize {
                row_sum += self.occupied[r * self.cols as usize + c] as u32;
                sums[(r + 1) * stride + c + 1] = sums[r * stride + c + 1] + row_sum;
            }
        }
        self.sums = sums;
    }

    fn box_sum(&self, col: u32, row: u32, w: u32, h: u32) -> u32 {
        let stride = (self.cols + 1) as usize;
        let (x0, y0) = (col as usize, row as usize);
        let (x1, y1) = ((col + w) as usize, (row + h) as usize);
        self.sums[y1 * stride + x1] + self.sums[y0 * stride + x0]
            - self.sums[y0 * stride + x1]
            - self.sums[y1 * stride + x0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weighted(pairs: &[(&str, f64)]) -> Vec<WeightedWord> {
        pairs
            .iter()
            .map(|(word, weight)| WeightedWord {
                word: word.to_string(),
                count: (weight * 10.0) as u64,
                weight: *weight,
            })
            .collect()
    }

    fn overlaps(a: &PlacedWord, b: &PlacedWord) -> bool {
        let (ax1, ay1) = (a.x + a.width as i32, a.y + a.height as i32);
        let (bx1, by1) = (b.x + b.width as i32, b.y + b.height as i32);
        a.x < bx1 && b.x < ax1 && a.y < by1 && b.y < ay1
    }

    #[test]
    fn top_word_gets_max_size_near_centre() {
        let options = CloudOptions {
            width: 400,
            height: 200,
            max_font_size: Some(40),
            ..CloudOptions::default()
        };
        let layout = layout_cloud(&weighted(&[("murder", 1.0)]), &options);
        let word = &layout.words[0];
        assert_eq!(word.font_size, 40);
        let centre_x = word.x + word.width as i32 / 2;
        let centre_y = word.y + word.height as i32 / 2;
        assert!((centre_x - 200).abs() <= 8);
        assert!((centre_y - 100).abs() <= 8);
    }

    #[test]
    fn relative_scaling_shrinks_lighter_words() {
        let options = CloudOptions {
            width: 600,
            height: 400,
            max_font_size: Some(40),
            relative_scaling: 0.5,
            ..CloudOptions::default()
        };
        let layout = layout_cloud(&weighted(&[("love", 1.0), ("war", 0.5)]), &options);
        assert_eq!(layout.words[0].font_size, 40);
        assert_eq!(layout.words[1].font_size, 30);
    }

    #[test]
    fn placed_words_never_overlap_and_stay_on_canvas() {
        let options = CloudOptions {
            width: 300,
            height: 200,
            max_font_size: Some(30),
            ..CloudOptions::default()
        };
        let words = weighted(&[
            ("night", 1.0),
            ("dragon", 0.9),
            ("secret", 0.8),
            ("garden", 0.7),
            ("silent", 0.6),
            ("winter", 0.5),
            ("kill", 0.4),
            ("moon", 0.3),
        ]);
        let layout = layout_cloud(&words, &options);
        assert!(!layout.is_empty());
        for (i, a) in layout.words.iter().enumerate() {
            assert!(a.x >= 0 && a.y >= 0);
            assert!(a.x as u32 + a.width <= 300 + CELL);
            assert!(a.y as u32 + a.height <= 200 + CELL);
            for b in &layout.words[i + 1..] {
                assert!(!overlaps(a, b), "{} overlaps {}", a.text, b.text);
            }
        }
    }

    #[test]
    fn wide_glyphs_get_wider_boxes() {
        let (wide, height) = text_extent("mmmm", 20);
        let (narrow, _) = text_extent("illi", 20);
        assert_eq!(height, 20);
        assert!(wide as f64 >= 4.0 * 20.0 * 0.833);
        assert!(narrow < wide / 2);
        assert!(text_extent("@@", 10).0 >= 20);
    }

    #[test]
    fn layout_stops_when_canvas_is_full() {
        let options = CloudOptions {
            width: 40,
            height: 20,
            max_font_size: Some(16),
            min_font_size: 8,
            relative_scaling: 0.0,
            ..CloudOptions::default()
        };
        let layout = layout_cloud(&weighted(&[("ab", 1.0), ("cd", 1.0), ("ef", 1.0), ("gh", 1.0)]), &options);
        assert!(layout.words.len() < 4);
    }
}
