// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

pub const UNICODE_BOX_HORIZONTAL: char = '─';
pub const UNICODE_BOX_VERTICAL: char = '│';
pub const UNICODE_BOX_TOP_LEFT: char = '┌';
pub const UNICODE_BOX_TOP_RIGHT: char = '┐';
pub const UNICODE_BOX_BOTTOM_LEFT: char = '└';
pub const UNICODE_BOX_BOTTOM_RIGHT: char = '┘';
pub const UNICODE_BOX_TEE_RIGHT: char = '├';
pub const UNICODE_BOX_TEE_LEFT: char = '┤';
pub const UNICODE_BOX_TEE_DOWN: char = '┬';
pub const UNICODE_BOX_TEE_UP: char = '┴';
pub const UNICODE_BOX_CROSS: char = '┼';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BoxEdges(u8);

impl BoxEdges {
    const NONE: Self = Self(0);
    const LEFT: Self = Self(1 << 0);
    const RIGHT: Self = Self(1 << 1);
    const UP: Self = Self(1 << 2);
    const DOWN: Self = Self(1 << 3);

    fn is_empty(self) -> bool {
        self.0 == 0
    }

    fn contains(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

fn box_edges_from_char(ch: char) -> Option<BoxEdges> {
    let (h, v) = (BoxEdges::LEFT.union(BoxEdges::RIGHT), BoxEdges::UP.union(BoxEdges::DOWN));
    match ch {
        UNICODE_BOX_HORIZONTAL => Some(h),
        UNICODE_BOX_VERTICAL => Some(v),
        UNICODE_BOX_TOP_LEFT => Some(BoxEdges::RIGHT.union(BoxEdges::DOWN)),
        UNICODE_BOX_TOP_RIGHT => Some(BoxEdges::LEFT.union(BoxEdges::DOWN)),
        UNICODE_BOX_BOTTOM_LEFT => Some(BoxEdges::RIGHT.union(BoxEdges::UP)),
        UNICODE_BOX_BOTTOM_RIGHT => Some(BoxEdges::LEFT.union(BoxEdges::UP)),
        UNICODE_BOX_TEE_RIGHT => Some(v.union(BoxEdges::RIGHT)),
        UNICODE_BOX_TEE_LEFT => Some(v.union(BoxEdges::LEFT)),
        UNICODE_BOX_TEE_DOWN => Some(h.union(BoxEdges::DOWN)),
        UNICODE_BOX_TEE_UP => Some(h.union(BoxEdges::UP)),
        UNICODE_BOX_CROSS => Some(h.union(v)),
        _ => None,
    }
}

fn box_char_from_edges(edges: BoxEdges) -> char {
    match edges.0 {
        0 => ' ',
        1..=3 => UNICODE_BOX_HORIZONTAL,
        4 | 8 | 12 => UNICODE_BOX_VERTICAL,
        10 => UNICODE_BOX_TOP_LEFT,
        9 => UNICODE_BOX_TOP_RIGHT,
        6 => UNICODE_BOX_BOTTOM_LEFT,
        5 => UNICODE_BOX_BOTTOM_RIGHT,
        14 => UNICODE_BOX_TEE_RIGHT,
        13 => UNICODE_BOX_TEE_LEFT,
        11 => UNICODE_BOX_TEE_DOWN,
        7 => UNICODE_BOX_TEE_UP,
        _ => UNICODE_BOX_CROSS,
    }
}

/// A fixed-size character grid addressed with signed coordinates.
///
/// Drawing is clipped: anything outside the grid is silently dropped, because nodes regularly
/// sit partly off screen after a pan. Box-drawing characters merge into junctions instead of
/// overwriting; any other character overwrites and clears the box-drawing state of its cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
    box_edges: Vec<BoxEdges>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Result<Self, CanvasError> {
        let len = width.checked_mul(height).ok_or(CanvasError::AreaOverflow { width, height })?;
        Ok(Self { width, height, cells: vec![' '; len], box_edges: vec![BoxEdges::NONE; len] })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The rendered character at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Result<char, CanvasError> {
        if x >= self.width || y >= self.height {
            return Err(CanvasError::OutOfBounds { x, y, width: self.width, height: self.height });
        }
        Ok(self.render_at(x, y))
    }

    fn index_of(&self, x: i64, y: i64) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Returns `false` if the cell was clipped.
    pub fn set(&mut self, x: i64, y: i64, ch: char) -> bool {
        let Some(idx) = self.index_of(x, y) else {
            return false;
        };
        if let Some(edges) = box_edges_from_char(ch) {
            self.box_edges[idx] = self.box_edges[idx].union(edges);
        } else {
            self.cells[idx] = ch;
            self.box_edges[idx] = BoxEdges::NONE;
        }
        true
    }

    pub fn write_str(&mut self, x: i64, y: i64, text: &str) {
        for (offset, ch) in (0..).zip(text.chars()) {
            self.set(x + offset, y, ch);
        }
    }

    /// Overwrites the rectangle with `ch` (use `' '` to erase lines behind a box).
    pub fn fill_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, ch: char) {
        let (min_x, max_x) = (x0.min(x1).max(0), x0.max(x1).min(self.width as i64 - 1));
        let (min_y, max_y) = (y0.min(y1).max(0), y0.max(y1).min(self.height as i64 - 1));
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                self.set(x, y, ch);
            }
        }
    }

    pub fn draw_hline(&mut self, x0: i64, x1: i64, y: i64) {
        let (min_x, max_x) = (x0.min(x1).max(-1), x0.max(x1).min(self.width as i64));
        for x in min_x..=max_x {
            self.set(x, y, UNICODE_BOX_HORIZONTAL);
        }
    }

    pub fn draw_vline(&mut self, x: i64, y0: i64, y1: i64) {
        let (min_y, max_y) = (y0.min(y1).max(-1), y0.max(y1).min(self.height as i64));
        for y in min_y..=max_y {
            self.set(x, y, UNICODE_BOX_VERTICAL);
        }
    }

    /// Single-line box with corners at `(x0, y0)` and `(x1, y1)`.
    pub fn draw_box(&mut self, x0: i64, y0: i64, x1: i64, y1: i64) {
        let (min_x, max_x) = (x0.min(x1), x0.max(x1));
        let (min_y, max_y) = (y0.min(y1), y0.max(y1));
        if min_y == max_y {
            return self.draw_hline(min_x, max_x, min_y);
        }
        if min_x == max_x {
            return self.draw_vline(min_x, min_y, max_y);
        }

        self.draw_hline(min_x + 1, max_x - 1, min_y);
        self.draw_hline(min_x + 1, max_x - 1, max_y);
        self.draw_vline(min_x, min_y + 1, max_y - 1);
        self.draw_vline(max_x, min_y + 1, max_y - 1);
        self.set(min_x, min_y, UNICODE_BOX_TOP_LEFT);
        self.set(max_x, min_y, UNICODE_BOX_TOP_RIGHT);
        self.set(min_x, max_y, UNICODE_BOX_BOTTOM_LEFT);
        self.set(max_x, max_y, UNICODE_BOX_BOTTOM_RIGHT);
    }

    fn render_at(&self, x: usize, y: usize) -> char {
        let idx = y * self.width + x;
        let edges = self.box_edges[idx];
        if edges.is_empty() {
            return self.cells[idx];
        }
        let connected = self.connected_box_edges(x, y, edges);
        box_char_from_edges(if connected.is_empty() { edges } else { connected })
    }

    /// Keeps only the edges that meet a matching edge in the neighbouring cell.
    fn connected_box_edges(&self, x: usize, y: usize, edges: BoxEdges) -> BoxEdges {
        let neighbour = |nx: usize, ny: usize| self.box_edges[ny * self.width + nx];
        let mut connected = BoxEdges::NONE;
        if edges.contains(BoxEdges::LEFT) && x > 0 && neighbour(x - 1, y).contains(BoxEdges::RIGHT) {
            connected = connected.union(BoxEdges::LEFT);
        }
        if edges.contains(BoxEdges::RIGHT) && x + 1 < self.width && neighbour(x + 1, y).contains(BoxEdges::LEFT) {
            connected = connected.union(BoxEdges::RIGHT);
        }
        if edges.contains(BoxEdges::UP) && y > 0 && neighbour(x, y - 1).contains(BoxEdges::DOWN) {
            connected = connected.union(BoxEdges::UP);
        }
        if edges.contains(BoxEdges::DOWN) && y + 1 < self.height && neighbour(x, y + 1).contains(BoxEdges::UP) {
            connected = connected.union(BoxEdges::DOWN);
        }
        connected
    }

    /// One string per row, trailing spaces trimmed.
    pub fn lines(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                let line = (0..self.width).map(|x| self.render_at(x, y)).collect::<String>();
                line.trim_end_matches(' ').to_owned()
            })
            .collect()
    }

    /// Like `to_string`, with trailing spaces and trailing empty rows removed.
    pub fn to_string_trimmed(&self) -> String {
        let mut lines = self.lines();
        while matches!(lines.last(), Some(line) if line.is_empty()) {
            lines.pop();
        }
        lines.join("\n")
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        for y in 0..self.height {
            for x in 0..self.width {
                f.write_char(self.render_at(x, y))?;
            }
            if y + 1 < self.height {
                f.write_char('\n')?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    AreaOverflow { width: usize, height: usize },
    OutOfBounds { x: usize, y: usize, width: usize, height: usize },
}

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AreaOverflow { width, height } => write!(f, "canvas area overflow: {width}*{height}"),
            Self::OutOfBounds { x, y, width, height } => {
                write!(f, "out of bounds: ({x},{y}) for {width}x{height} canvas")
            }
        }
    }
}

impl std::error::Error for CanvasError {}
