use std::io::{self, ErrorKind, Write};

use crossterm::style::Print;
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, queue};

use crate::board::Board;
use crate::config::{Glyphs, BLANK_CHAR};
use crate::{Coords, TermInt};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlushStatus {
    Drained,
    Backpressure,
}

/// Returns the terminal size as `(rows, columns)`.
pub fn terminal_size() -> io::Result<(TermInt, TermInt)> {
    let (columns, rows) = terminal::size()?;
    Ok((rows, columns))
}

pub fn enter_raw_mode() -> io::Result<()> {
    terminal::enable_raw_mode()
}

pub fn leave_raw_mode() -> io::Result<()> {
    terminal::disable_raw_mode()
}

/// Draws the game onto any byte sink with cursor-addressing escapes.
///
/// Positions are one-based `(row, column)` and converted to the zero-based
/// addressing crossterm expects right before they are written.
pub struct Renderer<W: Write> {
    out: W,
    board: Board,
    glyphs: Glyphs,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, board: Board, glyphs: Glyphs) -> Self {
        Renderer { out, board, glyphs }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Hides the cursor and wipes the screen.
    pub fn prepare(&mut self) -> io::Result<()> {
        queue!(self.out, cursor::Hide, terminal::Clear(ClearType::All))
    }

    pub fn draw_border(&mut self) -> io::Result<()> {
        let rows = self.board.rows() as i32;
        let columns = self.board.columns() as i32;
        let inner = (columns - 2) as usize;
        let g = &self.glyphs;

        let top = format!("{}{}{}", g.top_left, g.horizontal.to_string().repeat(inner), g.top_right);
        let bottom = format!("{}{}{}", g.bottom_left, g.horizontal.to_string().repeat(inner), g.bottom_right);
        let vertical = g.vertical;

        self.move_to((1, 1))?;
        queue!(self.out, Print(top))?;

        for row in 2..rows {
            self.move_to((row, columns))?;
            queue!(self.out, Print(vertical))?;
        }

        self.move_to((rows, 1))?;
        queue!(self.out, Print(bottom))?;

        for row in (2..rows).rev() {
            self.move_to((row, 1))?;
            queue!(self.out, Print(vertical))?;
        }

        Ok(())
    }

    /// Prints `ch` at `pos`, clamped into the area inside the border.
    pub fn fill_point(&mut self, pos: Coords, ch: char) -> io::Result<()> {
        let pos = self.board.clamp(pos);
        self.move_to(pos)?;
        queue!(self.out, Print(ch))
    }

    pub fn fill_points<'a>(&mut self, points: impl IntoIterator<Item = &'a Coords>, ch: char) -> io::Result<()> {
        for pos in points {
            self.fill_point(*pos, ch)?;
        }
        Ok(())
    }

    pub fn clear_points<'a>(&mut self, points: impl IntoIterator<Item = &'a Coords>) -> io::Result<()> {
        self.fill_points(points, BLANK_CHAR)
    }

    pub fn draw_snake<'a>(&mut self, body: impl IntoIterator<Item = &'a Coords>) -> io::Result<()> {
        let ch = self.glyphs.snake;
        self.fill_points(body, ch)
    }

    pub fn draw_food(&mut self, pos: Coords) -> io::Result<()> {
        let ch = self.glyphs.food;
        self.fill_point(pos, ch)
    }

    /// Pushes queued output to the terminal. A writer that cannot take more
    /// data right now reports backpressure instead of an error.
    pub fn flush(&mut self) -> io::Result<FlushStatus> {
        match self.out.flush() {
            Ok(()) => Ok(FlushStatus::Drained),
            Err(err) if err.kind() == ErrorKind::WouldBlock => Ok(FlushStatus::Backpressure),
            Err(err) => Err(err),
        }
    }

    /// Makes the cursor visible again without touching the screen.
    pub fn restore(&mut self) -> io::Result<()> {
        queue!(self.out, cursor::Show)?;
        self.out.flush()
    }

    /// Gives the screen back: cursor visible, screen cleared, `message` on
    /// the first line.
    pub fn farewell(&mut self, message: &str) -> io::Result<()> {
        queue!(self.out, cursor::Show)?;
        self.move_to((1, 1))?;
        queue!(self.out, terminal::Clear(ClearType::All), Print(message), Print('\n'))?;
        self.out.flush()
    }

    fn move_to(&mut self, (row, col): Coords) -> io::Result<()> {
        let row = (row - 1).max(0) as u16;
        let col = (col - 1).max(0) as u16;
        queue!(self.out, cursor::MoveTo(col, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer(rows: TermInt, columns: TermInt) -> Renderer<Vec<u8>> {
        Renderer::new(Vec::new(), Board::new(rows, columns).unwrap(), Glyphs::default())
    }

    fn output(renderer: Renderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn test_prepare_hides_cursor_and_clears() {
        let mut r = renderer(10, 20);

        r.prepare().unwrap();

        assert_eq!(output(r), "\x1b[?25l\x1b[2J");
    }

    #[test]
    fn test_fill_point_uses_one_based_cursor_position() {
        let mut r = renderer(10, 20);

        r.fill_point((4, 6), '*').unwrap();

        assert_eq!(output(r), "\x1b[4;6H*");
    }

    #[test]
    fn test_fill_point_clamps_into_interior() {
        let mut r = renderer(10, 20);

        r.fill_point((1, 1), '*').unwrap();
        r.fill_point((10, 25), '$').unwrap();

        assert_eq!(output(r), "\x1b[2;2H*\x1b[9;19H$");
    }

    #[test]
    fn test_clear_points_writes_blanks() {
        let mut r = renderer(10, 20);

        r.clear_points(&[(2, 4), (2, 2)]).unwrap();

        assert_eq!(output(r), "\x1b[2;4H \x1b[2;2H ");
    }

    #[test]
    fn test_draw_snake_and_food_use_glyphs() {
        let mut r = renderer(10, 20);

        r.draw_snake(&[(2, 6), (2, 4)]).unwrap();
        r.draw_food((4, 8)).unwrap();

        assert_eq!(output(r), "\x1b[2;6H*\x1b[2;4H*\x1b[4;8H$");
    }

    #[test]
    fn test_border_frames_the_board() {
        let mut r = renderer(4, 8);

        r.draw_border().unwrap();

        let expected = concat!(
            "\x1b[1;1H┌──────┐",
            "\x1b[2;8H│\x1b[3;8H│",
            "\x1b[4;1H└──────┘",
            "\x1b[3;1H│\x1b[2;1H│",
        );
        assert_eq!(output(r), expected);
    }

    #[test]
    fn test_farewell_restores_screen() {
        let mut r = renderer(10, 20);

        r.farewell("See you soon again :)").unwrap();

        assert_eq!(output(r), "\x1b[?25h\x1b[1;1H\x1b[2JSee you soon again :)\n");
    }

    #[test]
    fn test_restore_only_shows_cursor() {
        let mut r = renderer(10, 20);

        r.restore().unwrap();

        assert_eq!(output(r), "\x1b[?25h");
    }

    struct StalledWriter;

    impl Write for StalledWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(ErrorKind::WouldBlock, "terminal is busy"))
        }
    }

    #[test]
    fn test_would_block_flush_reports_backpressure() {
        let mut r = Renderer::new(StalledWriter, Board::new(10, 20).unwrap(), Glyphs::default());

        assert_eq!(r.flush().unwrap(), FlushStatus::Backpressure);
    }

    #[test]
    fn test_plain_flush_is_drained() {
        let mut r = renderer(10, 20);

        assert_eq!(r.flush().unwrap(), FlushStatus::Drained);
    }
}
