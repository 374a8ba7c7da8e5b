//! Soroban rendering.
//!
//! One rod per digit. Above the beam sits a heaven bead worth 5, below it
//! four earth beads worth 1 each; a bead counts when it touches the beam.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

/// Rows of one rod: two heaven rows, the beam, five earth rows.
pub const ROD_HEIGHT: usize = 8;
const BEAM_ROW: usize = 2;
const ROD_WIDTH: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RodCell {
    Bead,
    Rod,
    Beam,
}

/// Cells of one rod, top to bottom, for `digit` (0..=9).
pub fn rod_cells(digit: u8) -> [RodCell; ROD_HEIGHT] {
    let digit = digit.min(9);
    let mut cells = [RodCell::Rod; ROD_HEIGHT];

    // heaven bead rests at the top unless it counts
    cells[if digit >= 5 { 1 } else { 0 }] = RodCell::Bead;
    cells[BEAM_ROW] = RodCell::Beam;

    // earth beads: the counted ones touch the beam, one gap, then the rest
    let lower = usize::from(digit % 5);
    for i in 0..5 {
        if i != lower {
            cells[BEAM_ROW + 1 + i] = RodCell::Bead;
        }
    }
    cells
}

/// Read a rod back: `5 * U + L`.
pub fn rod_value(cells: &[RodCell; ROD_HEIGHT]) -> u8 {
    let upper = u8::from(cells[1] == RodCell::Bead);
    let lower = cells[BEAM_ROW + 1..]
        .iter()
        .take_while(|c| **c == RodCell::Bead)
        .count() as u8;
    5 * upper + lower
}

/// Decimal digits of `value`, left-padded with zeros to at least `rods`.
pub fn rod_digits(value: u32, rods: usize) -> Vec<u8> {
    let digits: Vec<u8> = value.to_string().bytes().map(|b| b - b'0').collect();
    let padding = rods.saturating_sub(digits.len());
    std::iter::repeat(0).take(padding).chain(digits).collect()
}

/// Abacus widget. With no value every rod is at rest.
#[derive(Debug, Clone, Copy)]
pub struct Soroban {
    pub value: Option<u32>,
    pub rods: usize,
}

impl Soroban {
    pub fn width(&self) -> u16 {
        let rods = self.value.map_or(self.rods, |v| rod_digits(v, self.rods).len());
        rods as u16 * ROD_WIDTH + 2
    }

    pub fn height() -> u16 {
        ROD_HEIGHT as u16 + 2
    }
}

impl Widget for Soroban {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let digits = rod_digits(self.value.unwrap_or(0), self.rods);
        let frame_style = Style::default().fg(Color::Rgb(139, 90, 43));
        let bead_style = if self.value.is_some() {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let rod_style = Style::default().add_modifier(Modifier::DIM);

        let width = self.width().min(area.width);
        let height = Self::height().min(area.height);
        let x0 = area.x + area.width.saturating_sub(width) / 2;
        let y0 = area.y + area.height.saturating_sub(height) / 2;
        let inside = |x: u16, y: u16| x < x0 + width && y < y0 + height;

        for x in x0..x0 + width {
            buf.set_string(x, y0, "━", frame_style);
            if inside(x, y0 + height - 1) {
                buf.set_string(x, y0 + height - 1, "━", frame_style);
            }
        }

        for (rod, digit) in digits.iter().enumerate() {
            let x = x0 + 1 + rod as u16 * ROD_WIDTH + 1;
            for (row, cell) in rod_cells(*digit).iter().enumerate() {
                let y = y0 + 1 + row as u16;
                if !inside(x, y) || y >= y0 + height - 1 {
                    continue;
                }
                match cell {
                    RodCell::Bead => buf.set_string(x, y, "●", bead_style),
                    RodCell::Rod => buf.set_string(x, y, "│", rod_style),
                    RodCell::Beam => {
                        buf.set_string(x - 1, y, "━╋━", frame_style);
                    }
                };
            }
        }
    }
}
