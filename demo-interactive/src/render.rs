//! Bridges the effect grid onto a ratatui buffer

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Widget};
use weather_fx_core::{Colour, GridBuffer, Surface};

pub fn colour(colour: Colour) -> Color {
    match colour {
        Colour::Black => Color::Black,
        Colour::Red => Color::Red,
        Colour::Green => Color::Green,
        Colour::Yellow => Color::Yellow,
        Colour::Blue => Color::Blue,
        Colour::Magenta => Color::Magenta,
        Colour::Cyan => Color::Cyan,
        Colour::White => Color::White,
    }
}

/// Draws a [`GridBuffer`] cell for cell, clipped to the target area
pub struct GridView<'a> {
    grid: &'a GridBuffer,
}

impl<'a> GridView<'a> {
    pub fn new(grid: &'a GridBuffer) -> Self {
        Self { grid }
    }
}

impl Widget for GridView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let background = colour(self.grid.background());
        let rows = area.height.min(self.grid.height());
        let columns = usize::from(area.width.min(self.grid.width()));
        for y in 0..rows {
            for (x, cell) in (0_u16..).zip(self.grid.row(y).iter().take(columns)) {
                buf[(area.x + x, area.y + y)]
                    .set_char(cell.glyph)
                    .set_fg(colour(cell.colour))
                    .set_bg(background);
            }
        }
    }
}

/// One-line bar drawn over the top row of the animation
pub fn status_bar(text: &str, hints: &str) -> Paragraph<'static> {
    Paragraph::new(Line::from(format!("{text}│ {hints}")))
        .style(Style::new().fg(Color::Black).bg(Color::Cyan))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_copied_with_background() {
        let mut grid = GridBuffer::new(4, 2);
        grid.clear(Colour::White);
        grid.place(1, 1, '*', Colour::Yellow);

        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        GridView::new(&grid).render(area, &mut buf);

        let cell = &buf[(1, 1)];
        assert_eq!(cell.symbol(), "*");
        assert_eq!(cell.fg, Color::Yellow);
        assert_eq!(cell.bg, Color::White);
        assert_eq!(buf[(0, 0)].bg, Color::White);
    }

    #[test]
    fn test_grid_clipped_to_area() {
        let mut grid = GridBuffer::new(10, 5);
        grid.place(2, 1, '#', Colour::Red);
        grid.place(9, 4, '#', Colour::Red);

        let area = Rect::new(0, 0, 3, 2);
        let mut buf = Buffer::empty(area);
        GridView::new(&grid).render(area, &mut buf);
        assert_eq!(buf[(2, 1)].symbol(), "#");
        assert_eq!(buf.content().iter().filter(|c| c.symbol() == "#").count(), 1);
    }
}
