//! Terminal chart backend
//!
//! Rasterizes the chart instructions into a character grid and writes it out
//! when the chart is shown. Time runs left to right at `columns_per_unit`
//! columns per unit; values run bottom to top at two rows per unit, so the
//! half-unit label offsets get their own rows.

use std::io::Write;
use waveify_core::{ChartBackend, DrawInstruction, Result, WaveifyError};

const ROWS_PER_UNIT: f64 = 2.0;

const GUIDE: char = '·';
const FLAT: char = '─';
const EDGE: char = '│';
const RISE_BOTTOM: char = '┘';
const RISE_TOP: char = '┌';
const FALL_TOP: char = '┐';
const FALL_BOTTOM: char = '└';

/// Chart backend that draws into a terminal (or any writer)
pub struct TerminalChart<W: Write> {
    out: W,
    columns_per_unit: usize,
    instructions: Vec<DrawInstruction>,
    bounds: Option<(f64, f64)>,
}

impl<W: Write> TerminalChart<W> {
    pub fn new(out: W, columns_per_unit: usize) -> Self {
        Self {
            out,
            columns_per_unit,
            instructions: Vec::new(),
            bounds: None,
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn has_steps(&self) -> bool {
        self.instructions
            .iter()
            .any(|i| matches!(i, DrawInstruction::StepLine { .. }))
    }

    /// Rasterize all buffered instructions into text rows
    fn rasterize(&self) -> Vec<String> {
        let (min, max) = self.bounds.unwrap_or((-1.0, 0.0));
        let mut grid = Grid::new(min, max, self.columns_per_unit as f64);

        // Guide lines span the full time range of the chart
        let width = self
            .instructions
            .iter()
            .filter_map(|i| match i {
                DrawInstruction::StepLine { xs, .. } => Some(grid.col(step_end(xs))),
                _ => None,
            })
            .max()
            .unwrap_or(0);

        for inst in &self.instructions {
            match inst {
                DrawInstruction::GuideLine { y } => {
                    if let Some(row) = grid.row(*y) {
                        for col in 0..width {
                            grid.put(row, col, GUIDE);
                        }
                    }
                }
                DrawInstruction::StepLine { xs, ys } => grid.step(xs, ys),
                DrawInstruction::Label { x, y, text } => {
                    if let Some(row) = grid.row(*y) {
                        // One column right of the anchor, so an edge at x stays visible
                        let start = grid.col(*x) + 1;
                        for (offset, c) in text.chars().enumerate() {
                            grid.put(row, start + offset, c);
                        }
                    }
                }
                DrawInstruction::VerticalBounds { .. } => {}
            }
        }

        grid.into_lines()
    }
}

impl<W: Write> ChartBackend for TerminalChart<W> {
    fn draw_guide_line(&mut self, y: f64) -> Result<()> {
        self.instructions.push(DrawInstruction::GuideLine { y });
        Ok(())
    }

    fn draw_step_line(&mut self, xs: &[f64], ys: &[f64]) -> Result<()> {
        if xs.len() != ys.len() {
            return Err(WaveifyError::Render(format!(
                "step line has {} x values but {} y values",
                xs.len(),
                ys.len()
            )));
        }
        self.instructions.push(DrawInstruction::StepLine {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
        });
        Ok(())
    }

    fn place_label(&mut self, x: f64, y: f64, text: &str) -> Result<()> {
        self.instructions.push(DrawInstruction::Label {
            x,
            y,
            text: text.to_string(),
        });
        Ok(())
    }

    fn set_vertical_bounds(&mut self, min: f64, max: f64) -> Result<()> {
        if min > max {
            return Err(WaveifyError::Render(format!(
                "invalid vertical bounds [{}, {}]",
                min, max
            )));
        }
        self.bounds = Some((min, max));
        Ok(())
    }

    fn show(&mut self) -> Result<()> {
        if !self.has_steps() {
            writeln!(self.out, "no events to display")?;
            self.out.flush()?;
            return Ok(());
        }

        let lines = self.rasterize();
        log::debug!("Rendering {} rows", lines.len());
        for line in lines {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// x where the last sample of a step line stops holding
fn step_end(xs: &[f64]) -> f64 {
    match xs {
        [] => 0.0,
        [only] => only + 0.5,
        [.., prev, last] => last + (last - prev),
    }
}

/// Character canvas with chart-space coordinate mapping
struct Grid {
    cells: Vec<Vec<char>>,
    max: f64,
    columns_per_unit: f64,
}

impl Grid {
    fn new(min: f64, max: f64, columns_per_unit: f64) -> Self {
        let rows = ((max - min) * ROWS_PER_UNIT).round() as usize + 1;
        Self {
            cells: vec![Vec::new(); rows],
            max,
            columns_per_unit,
        }
    }

    /// Row for value `y`, or `None` when outside the vertical bounds
    fn row(&self, y: f64) -> Option<usize> {
        let row = ((self.max - y) * ROWS_PER_UNIT).round();
        if row < 0.0 || row as usize >= self.cells.len() {
            None
        } else {
            Some(row as usize)
        }
    }

    fn col(&self, x: f64) -> usize {
        (x * self.columns_per_unit).round().max(0.0) as usize
    }

    fn put(&mut self, row: usize, col: usize, c: char) {
        let line = &mut self.cells[row];
        if line.len() <= col {
            line.resize(col + 1, ' ');
        }
        line[col] = c;
    }

    fn put_at(&mut self, row: Option<usize>, col: usize, c: char) {
        if let Some(row) = row {
            self.put(row, col, c);
        }
    }

    /// Draw a step-after curve: flat runs, with an edge at each level change
    fn step(&mut self, xs: &[f64], ys: &[f64]) {
        let end = self.col(step_end(xs));
        let mut skip_first = false;

        for k in 0..xs.len() {
            let row = self.row(ys[k]);
            let from = self.col(xs[k]) + usize::from(skip_first);
            let to = match xs.get(k + 1) {
                Some(&next) => self.col(next),
                None => end,
            };
            for col in from..to {
                self.put_at(row, col, FLAT);
            }

            skip_first = false;
            let Some(&next_y) = ys.get(k + 1) else {
                continue;
            };
            if next_y == ys[k] {
                continue;
            }

            let next_row = self.row(next_y);
            let rising = next_y > ys[k];
            let (old_corner, new_corner) = if rising {
                (RISE_BOTTOM, RISE_TOP)
            } else {
                (FALL_TOP, FALL_BOTTOM)
            };
            self.put_at(row, to, old_corner);
            self.put_at(next_row, to, new_corner);

            // Fill the edge between the two levels
            let (top, bottom) = if rising { (next_y, ys[k]) } else { (ys[k], next_y) };
            let mut y = top - 1.0 / ROWS_PER_UNIT;
            while y > bottom {
                let r = self.row(y);
                self.put_at(r, to, EDGE);
                y -= 1.0 / ROWS_PER_UNIT;
            }
            skip_first = true;
        }
    }

    fn into_lines(self) -> Vec<String> {
        self.cells
            .into_iter()
            .map(|line| line.into_iter().collect::<String>().trim_end().to_string())
            .collect()
    }
}
