//! Chart instructions and the backend interface
//!
//! The synthesizer never draws anything itself. It produces a list of
//! [`DrawInstruction`]s which are replayed against a [`ChartBackend`]. This
//! keeps the waveform logic independent of any rendering technology.

use crate::types::Result;

/// A single drawing instruction
#[derive(Debug, Clone, PartialEq)]
pub enum DrawInstruction {
    /// Horizontal guide line at height `y` (rendering aid, not data)
    GuideLine { y: f64 },

    /// Step curve drawn "step after": each value holds until the next x
    StepLine { xs: Vec<f64>, ys: Vec<f64> },

    /// Text anchored at (x, y)
    Label { x: f64, y: f64, text: String },

    /// Vertical extent of the whole chart
    VerticalBounds { min: f64, max: f64 },
}

/// The charting collaborator
///
/// Implementations receive instructions in order and display the result when
/// [`ChartBackend::show`] is called.
pub trait ChartBackend {
    fn draw_guide_line(&mut self, y: f64) -> Result<()>;

    /// `xs` and `ys` have equal length; the curve holds `ys[k]` from `xs[k]`
    /// until `xs[k + 1]`.
    fn draw_step_line(&mut self, xs: &[f64], ys: &[f64]) -> Result<()>;

    fn place_label(&mut self, x: f64, y: f64, text: &str) -> Result<()>;

    fn set_vertical_bounds(&mut self, min: f64, max: f64) -> Result<()>;

    /// Display the chart. Called exactly once, after all instructions.
    fn show(&mut self) -> Result<()>;
}

impl DrawInstruction {
    /// Forward this instruction to a backend
    pub fn apply(&self, backend: &mut dyn ChartBackend) -> Result<()> {
        match self {
            DrawInstruction::GuideLine { y } => backend.draw_guide_line(*y),
            DrawInstruction::StepLine { xs, ys } => backend.draw_step_line(xs, ys),
            DrawInstruction::Label { x, y, text } => backend.place_label(*x, *y, text),
            DrawInstruction::VerticalBounds { min, max } => backend.set_vertical_bounds(*min, *max),
        }
    }
}

/// Backend that stores every instruction it receives
///
/// Useful for tests and for callers that want to inspect the payload instead
/// of drawing it.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    pub instructions: Vec<DrawInstruction>,
    pub shown: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// All labels as (x, y, text)
    pub fn labels(&self) -> Vec<(f64, f64, &str)> {
        self.instructions
            .iter()
            .filter_map(|i| match i {
                DrawInstruction::Label { x, y, text } => Some((*x, *y, text.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Number of step curves received
    pub fn step_lines(&self) -> usize {
        self.instructions
            .iter()
            .filter(|i| matches!(i, DrawInstruction::StepLine { .. }))
            .count()
    }
}

impl ChartBackend for RecordingBackend {
    fn draw_guide_line(&mut self, y: f64) -> Result<()> {
        self.instructions.push(DrawInstruction::GuideLine { y });
        Ok(())
    }

    fn draw_step_line(&mut self, xs: &[f64], ys: &[f64]) -> Result<()> {
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
        self.instructions.push(DrawInstruction::VerticalBounds { min, max });
        Ok(())
    }

    fn show(&mut self) -> Result<()> {
        self.shown = true;
        Ok(())
    }
}
