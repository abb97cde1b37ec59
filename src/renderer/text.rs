//! Plain-text renderer for terminals and logs

use std::fmt::Write as _;
use std::io::Write;

use super::{Frame, Renderer};
use crate::sim::{Occupant, SessionStatus};

/// Renders the board as text rows, odd rows indented by one column.
///
/// Only frames where something changed (shot count or status) are written out.
pub struct TextRenderer<W: Write> {
    out: W,
    last_drawn: Option<(u32, SessionStatus)>,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_drawn: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TextRenderer<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

/// Board text for one frame
pub fn render_board(frame: &Frame<'_>) -> String {
    let playfield = frame.playfield;
    let bullet_slot = frame.flying.then(|| playfield.key_of(frame.bullet.pos));

    let mut text = String::new();
    for row in 0..playfield.height as i32 {
        if row % 2 == 1 {
            text.push(' ');
        }
        for col in 0..playfield.width as i32 {
            let key = playfield.slot_key(row, col);
            let glyph = if bullet_slot == Some(key) {
                '*'
            } else {
                match frame.grid.get(key) {
                    Some(Occupant::Bubble(color)) => color.glyph(),
                    _ => '.',
                }
            };
            text.push(glyph);
            text.push(' ');
        }
        text.push('\n');
    }

    let status = match frame.status {
        SessionStatus::Playing => "playing",
        SessionStatus::Won => "YOU WON!",
        SessionStatus::Lost => "board jammed",
    };
    let _ = writeln!(
        text,
        "next: {}  aim: {:.0} deg  score: {}  shots: {}  [{}]",
        frame.bullet.color.glyph(),
        frame.gun.y.atan2(frame.gun.x).to_degrees(),
        frame.score,
        frame.shots,
        status
    );
    text
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn draw(&mut self, frame: &Frame<'_>) {
        let marker = (frame.shots, frame.status);
        if self.last_drawn == Some(marker) {
            return;
        }
        self.last_drawn = Some(marker);

        if let Err(err) = writeln!(self.out, "{}", render_board(frame)) {
            log::warn!("Failed to write frame: {}", err);
        }
    }
}
