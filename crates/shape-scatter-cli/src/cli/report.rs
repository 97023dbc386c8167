//! Run report: timing, counts, and optionally every placement as JSON.

use chrono::{DateTime, Local};
use serde::Serialize;

use shape_scatter::{FillSummary, PlacedSet};

/// One placement in JSON output.
#[derive(Debug, Serialize)]
pub struct JsonPlacement {
    shape: String,
    color: String,
    x: f64,
    y: f64,
    sx: f64,
    sy: f64,
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub label: String,
    pub started_at: String,
    pub ended_at: String,
    /// Wall-clock seconds, two decimals
    pub elapsed_secs: f64,
    pub count: usize,
    pub abandoned: usize,
    pub samples: usize,
    pub seed: u64,
    pub stretch: u32,
    pub duration_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placements: Option<Vec<JsonPlacement>>,
}

impl RunReport {
    pub fn new(
        label: &str,
        started: DateTime<Local>,
        ended: DateTime<Local>,
        summary: &FillSummary,
        seed: u64,
        stretch: u32,
        duration_secs: u64,
    ) -> Self {
        let elapsed = (ended - started).num_milliseconds() as f64 / 1000.0;
        Self {
            label: label.to_string(),
            started_at: time_str(started),
            ended_at: time_str(ended),
            elapsed_secs: (elapsed * 100.0).round() / 100.0,
            count: summary.placed,
            abandoned: summary.abandoned,
            samples: summary.samples,
            seed,
            stretch,
            duration_secs,
            placements: None,
        }
    }

    pub fn with_placements(mut self, placed: &PlacedSet) -> Self {
        self.placements = Some(
            placed
                .iter()
                .map(|s| JsonPlacement {
                    shape: s.template().name().to_string(),
                    color: s.color().to_string(),
                    x: s.position().x,
                    y: s.position().y,
                    sx: s.scale().sx,
                    sy: s.scale().sy,
                })
                .collect(),
        );
        self
    }

    /// `<label> HH:MM:SS - HH:MM:SS - <secs> - <count>`
    pub fn title(&self) -> String {
        format!(
            "{} {} - {} - {} - {}",
            self.label, self.started_at, self.ended_at, self.elapsed_secs, self.count
        )
    }

    /// Machine-readable last line: `<label>,<count>`.
    pub fn summary_line(&self) -> String {
        format!("{},{}", self.label, self.count)
    }
}

fn time_str(t: DateTime<Local>) -> String {
    t.format("%H:%M:%S").to_string()
}
