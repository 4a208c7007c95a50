//! Display surface boundary
//!
//! Effects never own a terminal. They write glyphs into anything implementing
//! [`Surface`]; placements outside the addressable grid are silently dropped because
//! particles spend much of their life just off-screen.

use crate::core_types::Colour;

/// A character grid that accepts coloured glyphs
///
/// Dimensions may change between frames (terminal resize), so callers re-read
/// `width()`/`height()` every frame instead of caching them.
pub trait Surface {
    /// Grid width in cells
    fn width(&self) -> u16;

    /// Grid height in cells
    fn height(&self) -> u16;

    /// Put `glyph` at `(x, y)`. Out-of-range coordinates are a no-op.
    fn place(&mut self, x: i32, y: i32, glyph: char, colour: Colour);

    /// Blank every cell and set the background colour
    fn clear(&mut self, background: Colour);

    /// Whether `(x, y)` is addressable
    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < i32::from(self.width()) && y < i32::from(self.height())
    }

    /// Write a string left to right starting at `(x, y)`, clipping at the edges
    fn print(&mut self, x: i32, y: i32, text: &str, colour: Colour) {
        for (offset, glyph) in (0_i32..).zip(text.chars()) {
            self.place(x + offset, y, glyph, colour);
        }
    }
}

/// One character cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub colour: Colour,
}

impl Cell {
    /// Empty cell
    pub const BLANK: Cell = Cell {
        glyph: ' ',
        colour: Colour::White,
    };
}

impl Default for Cell {
    fn default() -> Self {
        Cell::BLANK
    }
}

/// In-memory surface
///
/// Used as the back buffer of the terminal front-end, by the headless renderer
/// and by tests that inspect what an effect drew.
#[derive(Debug, Clone)]
pub struct GridBuffer {
    width: u16,
    height: u16,
    background: Colour,
    cells: Vec<Cell>,
}

impl GridBuffer {
    /// Create a blank buffer
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            background: Colour::Black,
            cells: vec![Cell::BLANK; usize::from(width) * usize::from(height)],
        }
    }

    /// Change dimensions, discarding the current contents
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize(usize::from(width) * usize::from(height), Cell::BLANK);
    }

    /// Background colour set by the last `clear`
    pub fn background(&self) -> Colour {
        self.background
    }

    /// Cell at `(x, y)`, `None` when out of range
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Row `y` as a slice of cells
    pub fn row(&self, y: u16) -> &[Cell] {
        let start = usize::from(y) * usize::from(self.width);
        let end = (start + usize::from(self.width)).min(self.cells.len());
        &self.cells[start.min(end)..end]
    }

    /// Number of cells currently showing `glyph`
    pub fn count(&self, glyph: char) -> usize {
        self.cells.iter().filter(|c| c.glyph == glyph).count()
    }

    /// Plain-text snapshot, one line per row
    pub fn to_text(&self) -> String {
        (0..self.height)
            .map(|y| self.row(y).iter().map(|c| c.glyph).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.contains(x, y) {
            Some(y as usize * usize::from(self.width) + x as usize)
        } else {
            None
        }
    }
}

impl Surface for GridBuffer {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn place(&mut self, x: i32, y: i32, glyph: char, colour: Colour) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Cell { glyph, colour };
        }
    }

    fn clear(&mut self, background: Colour) {
        self.background = background;
        self.cells.fill(Cell::BLANK);
    }
}
