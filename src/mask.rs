//! Boolean region masks and their run-length text encoding.
//!
//! A mask covers a region's bounding box in row-major scanline order. The
//! encoded form is a comma-joined list of alternating runs `"<0|1>:<count>"`,
//! e.g. `"0:3,1:5,0:1"`. An empty grid encodes to the empty string.

use std::fmt::Write as _;

/// A `width × height` grid of painted/unpainted cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskGrid {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl MaskGrid {
    /// Creates an all-false grid.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        }
    }

    /// Builds a grid from rows of cells. Short rows are padded with `false`.
    pub fn from_rows(rows: &[Vec<bool>]) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0) as u32;
        let mut grid = Self::new(width, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                grid.set(x as u32, y as u32, value);
            }
        }
        grid
    }

    /// Marks absolute pixel positions relative to a bounding-box origin.
    ///
    /// Pixels outside `origin..origin + size` are ignored.
    pub fn from_pixels(
        pixels: &[(u32, u32)],
        origin_x: u32,
        origin_y: u32,
        width: u32,
        height: u32,
    ) -> Self {
        let mut grid = Self::new(width, height);
        for &(x, y) in pixels {
            if let (Some(rel_x), Some(rel_y)) = (x.checked_sub(origin_x), y.checked_sub(origin_y)) {
                grid.set(rel_x, rel_y, true);
            }
        }
        grid
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the cell value; out-of-range reads are `false`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Sets a cell; out-of-range writes are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.cells[y as usize * self.width as usize + x as usize] = value;
    }

    /// Number of `true` cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Horizontal runs of `true` cells as `(x, y, length)`.
    pub fn filled_spans(&self) -> impl Iterator<Item = (u32, u32, u32)> + '_ {
        let width = self.width as usize;
        self.cells
            .chunks(width.max(1))
            .enumerate()
            .flat_map(move |(y, row)| {
                let mut spans = Vec::new();
                let mut start = None;
                for (x, &cell) in row.iter().chain(std::iter::once(&false)).enumerate() {
                    match (cell, start) {
                        (true, None) => start = Some(x),
                        (false, Some(s)) => {
                            spans.push((s as u32, y as u32, (x - s) as u32));
                            start = None;
                        }
                        _ => {}
                    }
                }
                spans
            })
    }
}

/// Run-length encodes a mask in scanline order.
pub fn encode(mask: &MaskGrid) -> String {
    let mut encoded = String::new();
    let mut cells = mask.cells.iter().copied();
    let Some(mut current) = cells.next() else {
        return encoded;
    };
    let mut count = 1usize;

    for cell in cells {
        if cell == current {
            count += 1;
        } else {
            push_run(&mut encoded, current, count);
            current = cell;
            count = 1;
        }
    }
    push_run(&mut encoded, current, count);

    encoded
}

fn push_run(out: &mut String, value: bool, count: usize) {
    if !out.is_empty() {
        out.push(',');
    }
    // Writing into a String cannot fail.
    let _ = write!(out, "{}:{}", u8::from(value), count);
}

/// Decodes a run-length mask into a `width × height` grid.
///
/// Decoding never fails. Runs that overflow the grid are clipped, cells not
/// covered by any run stay `false`, and decoding stops at the first
/// malformed segment, keeping everything decoded before it.
pub fn decode(rle: &str, width: u32, height: u32) -> MaskGrid {
    let mut grid = MaskGrid::new(width, height);
    let total = grid.cells.len();
    let mut index = 0usize;

    for segment in rle.split(',').filter(|s| !s.trim().is_empty()) {
        let Some((value, count)) = parse_run(segment) else {
            log::debug!("Stopping mask decode at malformed run {:?}", segment);
            break;
        };

        let end = index.saturating_add(count).min(total);
        grid.cells[index..end].fill(value);
        index = end;

        if index >= total {
            break;
        }
    }

    grid
}

fn parse_run(segment: &str) -> Option<(bool, usize)> {
    let (value, count) = segment.trim().split_once(':')?;
    let value = match value.trim() {
        "1" => true,
        "0" => false,
        _ => return None,
    };
    Some((value, count.trim().parse().ok()?))
}
