//! Data models for the running log.

use serde::Serialize;

/// A single day's run: the day number and the distance covered in km
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    pub day: i64,
    pub distance: f64,
}

impl Entry {
    pub fn new(day: i64, distance: f64) -> Self {
        Entry { day, distance }
    }
}

/// Descriptive statistics over a sequence of distances.
///
/// Always derived from the current data, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Stats {
    pub total: f64,
    pub mean: f64,
    pub median: f64,
    pub stdev: f64,
}

impl Stats {
    /// Full summary shown under the chart
    pub fn summary_line(&self) -> String {
        format!(
            "Total: {:.2} km | Mean: {:.2} km | Median: {:.2} km | Stdev: {:.2}",
            self.total, self.mean, self.median, self.stdev
        )
    }

    /// Short form for the status bar
    pub fn short_line(&self) -> String {
        format!("Total: {:.2} km, mean: {:.2} km", self.total, self.mean)
    }
}
