//! Human input adapter: reads moves as text lines

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use anyhow::{bail, Result};
use hex_core::{Board, Move, Player, Side};

/// Prompts on `output` and blocks on `input` until a parsable cell arrives.
///
/// Accepted forms, both 1-based: `row column` (e.g. `3 5`) or
/// column letter followed by row number (e.g. `e3`).
pub struct HumanPlayer<R, W> {
    name: String,
    side: Side,
    input: R,
    output: W,
    /// Raw bytes of the last line; decoded lossily so stray bytes re-prompt
    line: Vec<u8>,
}

impl HumanPlayer<BufReader<Stdin>, Stdout> {
    pub fn stdio(side: Side) -> Self {
        Self::new(side, BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(side: Side, input: R, output: W) -> Self {
        Self {
            name: format!("human-{}", side).to_lowercase(),
            side,
            input,
            output,
            line: Vec::new(),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Player for HumanPlayer<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn side(&self) -> Side {
        self.side
    }

    fn request_move(&mut self, board: &Board) -> Result<Move> {
        loop {
            write!(self.output, "{} to move (row column, or e.g. c5): ", self.side)?;
            self.output.flush()?;

            self.line.clear();
            if self.input.read_until(b'\n', &mut self.line)? == 0 {
                bail!("input closed");
            }

            let text = String::from_utf8_lossy(&self.line);
            match parse_cell(text.trim(), board.dimension()) {
                Some((row, column)) => return Ok(Move::new(row, column, self.side)),
                None => writeln!(
                    self.output,
                    "Could not read '{}' as a cell on a {n}x{n} board",
                    text.trim(),
                    n = board.dimension()
                )?,
            }
        }
    }
}

/// Parse a 1-based cell description into 0-based (row, column).
///
/// Only syntax and range are checked here; ownership is the board's job.
pub fn parse_cell(text: &str, dimension: usize) -> Option<(usize, usize)> {
    let text = text.trim();
    let mut parts = text.split(|c: char| c.is_whitespace() || c == ',').filter(|p| !p.is_empty());

    let (row, column) = match (parts.next(), parts.next(), parts.next()) {
        (Some(r), Some(c), None) => (r.parse::<usize>().ok()?, c.parse::<usize>().ok()?),
        (Some(single), None, None) => {
            let mut chars = single.chars();
            let letter = chars.next()?.to_ascii_lowercase();
            if !letter.is_ascii_lowercase() {
                return None;
            }
            let column = (letter as u8 - b'a') as usize + 1;
            let row = chars.as_str().parse::<usize>().ok()?;
            (row, column)
        }
        _ => return None,
    };

    if row == 0 || column == 0 || row > dimension || column > dimension {
        return None;
    }
    Some((row - 1, column - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_pairs() {
        assert_eq!(parse_cell("1 1", 9), Some((0, 0)));
        assert_eq!(parse_cell(" 3,5 ", 9), Some((2, 4)));
        assert_eq!(parse_cell("9 9", 9), Some((8, 8)));
        assert_eq!(parse_cell("10 1", 9), None);
        assert_eq!(parse_cell("0 4", 9), None);
        assert_eq!(parse_cell("1 2 3", 9), None);
    }

    #[test]
    fn test_parse_letter_number() {
        assert_eq!(parse_cell("a1", 9), Some((0, 0)));
        assert_eq!(parse_cell("C5", 11), Some((4, 2)));
        assert_eq!(parse_cell("k11", 11), Some((10, 10)));
        assert_eq!(parse_cell("j1", 9), None);
        assert_eq!(parse_cell("a", 9), None);
        assert_eq!(parse_cell("?3", 9), None);
        assert_eq!(parse_cell("", 9), None);
    }

    #[test]
    fn test_human_retries_until_parsable() {
        let board = Board::new(9, 9).unwrap();
        let input = Cursor::new("nonsense\n2 3\n");
        let mut player = HumanPlayer::new(Side::Blue, input, Vec::new());

        let mv = player.request_move(&board).unwrap();
        assert_eq!(mv, Move::new(1, 2, Side::Blue));

        let out = String::from_utf8(player.into_output()).unwrap();
        assert!(out.contains("Could not read 'nonsense'"));
        assert_eq!(out.matches("Blue to move").count(), 2);
    }

    #[test]
    fn test_human_retries_after_invalid_utf8() {
        let board = Board::new(9, 9).unwrap();
        let input = Cursor::new(b"\xff\xfe\n2 3\n".to_vec());
        let mut player = HumanPlayer::new(Side::Blue, input, Vec::new());

        let mv = player.request_move(&board).unwrap();
        assert_eq!(mv, Move::new(1, 2, Side::Blue));

        let out = String::from_utf8(player.into_output()).unwrap();
        assert_eq!(out.matches("Could not read").count(), 1);
        assert_eq!(out.matches("Blue to move").count(), 2);
    }

    #[test]
    fn test_human_closed_input() {
        let board = Board::new(9, 9).unwrap();
        let mut player = HumanPlayer::new(Side::Red, Cursor::new(""), Vec::new());
        assert!(player.request_move(&board).is_err());
    }
}
