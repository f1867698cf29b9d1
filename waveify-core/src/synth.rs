//! Waveform synthesizer
//!
//! Turns the sparse event list of each category into a dense 0/1 step
//! waveform on a shared time axis, and produces the drawing instructions for
//! the whole chart.
//!
//! For a category at stacking position `i`:
//! 1. `samples[t]` is 1 if the category has an event at time `t`, else 0
//!    (length `max_time + 1`)
//! 2. every sample is repeated twice, so a step-after curve draws a square
//!    pulse (length `2 * (max_time + 1)`)
//! 3. the time axis advances 0.5 per doubled sample, so edges land exactly on
//!    integer times
//! 4. the trace is lifted by a baseline of `2 * i`

use crate::chart::{ChartBackend, DrawInstruction};
use crate::database::EventDatabase;
use crate::parser::ParseOutcome;
use crate::types::{Result, Time, WaveifyError};

/// Largest max time a plot can be synthesized for
pub const MAX_SUPPORTED_TIME: Time = 10_000_000;

/// Vertical distance between two stacked traces
pub const BASELINE_SPACING: f64 = 2.0;

/// Synthesized waveform for one category
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub category: String,
    /// Stacking position (first-seen order)
    pub index: usize,
    pub baseline: f64,
    /// One sample per integer time in `0..=max_time`
    pub samples: Vec<u8>,
    /// Every sample repeated twice
    pub doubled: Vec<u8>,
    /// `axis[k] = 0.5 * k`, same length as `doubled`
    pub axis: Vec<f64>,
}

impl Trace {
    /// True if the category has at least one event at `time`
    pub fn is_high(&self, time: Time) -> bool {
        usize::try_from(time)
            .ok()
            .and_then(|t| self.samples.get(t))
            .is_some_and(|&s| s == 1)
    }

    /// Doubled samples lifted by the baseline
    pub fn levels(&self) -> Vec<f64> {
        self.doubled
            .iter()
            .map(|&s| f64::from(s) + self.baseline)
            .collect()
    }
}

/// Everything the charting collaborator needs for one render pass
#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    pub traces: Vec<Trace>,
    pub instructions: Vec<DrawInstruction>,
    /// `(-1, 2 * category_count)`
    pub vertical_bounds: (f64, f64),
}

impl Plot {
    /// Replay the instructions against a backend, then show the chart
    pub fn render(&self, backend: &mut dyn ChartBackend) -> Result<()> {
        for inst in &self.instructions {
            inst.apply(backend)?;
        }
        backend.show()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }
}

/// Synthesize the plot for a finished parser run
pub fn synthesize_outcome(outcome: &ParseOutcome) -> Result<Plot> {
    synthesize(&outcome.database, outcome.max_time)
}

/// Synthesize one trace per category, stacked in first-seen order
pub fn synthesize(database: &EventDatabase, max_time: Time) -> Result<Plot> {
    if max_time > MAX_SUPPORTED_TIME {
        return Err(WaveifyError::TimeOutOfRange {
            max_time,
            limit: MAX_SUPPORTED_TIME,
        });
    }
    // Bounded above, so the cast cannot truncate
    let width = max_time as usize + 1;

    let mut traces = Vec::with_capacity(database.len());
    let mut instructions = Vec::new();

    for (index, category) in database.categories().iter().enumerate() {
        let mut samples = vec![0u8; width];
        for event in &category.events {
            match samples.get_mut(event.time as usize) {
                Some(sample) => *sample = 1,
                None => log::warn!(
                    "Event at {} in {} lies beyond max time {}",
                    event.time,
                    category.name,
                    max_time
                ),
            }
        }

        let doubled: Vec<u8> = samples.iter().flat_map(|&s| [s, s]).collect();
        let axis: Vec<f64> = (0..doubled.len()).map(|k| 0.5 * k as f64).collect();
        let baseline = BASELINE_SPACING * index as f64;

        let trace = Trace {
            category: category.name.clone(),
            index,
            baseline,
            samples,
            doubled,
            axis,
        };

        instructions.push(DrawInstruction::GuideLine { y: baseline });
        instructions.push(DrawInstruction::StepLine {
            xs: trace.axis.clone(),
            ys: trace.levels(),
        });
        instructions.push(DrawInstruction::Label {
            x: 0.0,
            y: baseline - 0.5,
            text: category.name.clone(),
        });
        for event in category.events.iter().filter(|e| e.has_label()) {
            instructions.push(DrawInstruction::Label {
                x: event.time as f64,
                y: baseline + 0.5,
                text: event.label.clone(),
            });
        }

        log::debug!(
            "Trace #{} {}: {} events, baseline {}",
            index,
            category.name,
            category.events.len(),
            baseline
        );
        traces.push(trace);
    }

    let vertical_bounds = (-1.0, BASELINE_SPACING * database.len() as f64);
    instructions.push(DrawInstruction::VerticalBounds {
        min: vertical_bounds.0,
        max: vertical_bounds.1,
    });

    Ok(Plot {
        traces,
        instructions,
        vertical_bounds,
    })
}
