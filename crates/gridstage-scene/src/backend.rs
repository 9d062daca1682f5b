#![forbid(unsafe_code)]

//! Analysis backend seam.
//!
//! The lifecycle manager is agnostic to how results are produced as
//! long as it receives an [`AnalysisReport`]. The real system would
//! put statistics behind this trait; here a deterministic mock
//! synthesizes plausible titles, summaries, and plot series.

use serde::{Deserialize, Serialize};

use crate::artifact::{Category, PlotData, PlotKind};

/// Default number of plots when the request leaves it unspecified.
const DEFAULT_PANELS: usize = 2;

/// Upper bound on plots per artifact.
const MAX_PANELS: usize = 6;

/// Samples per synthesized plot.
const SAMPLES_PER_PLOT: usize = 12;

/// A request to run one analysis, as raised by the grid surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    /// Named analysis type, e.g. `"trend"`.
    pub algorithm: String,
    /// Requested plot count; clamped to [1, 6] when present.
    pub panels: Option<usize>,
}

impl RunRequest {
    #[must_use]
    pub fn new(algorithm: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            panels: None,
        }
    }

    #[must_use]
    pub fn with_panels(mut self, panels: usize) -> Self {
        self.panels = Some(panels);
        self
    }
}

/// Everything a backend produces for one run. The lifecycle manager
/// turns this into an [`Artifact`](crate::Artifact), assigning the id.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub title: String,
    pub summary: String,
    pub category: Option<Category>,
    pub plots: Vec<PlotData>,
}

/// Produces an [`AnalysisReport`] for a named algorithm.
pub trait AnalysisBackend {
    fn run(&mut self, request: &RunRequest) -> AnalysisReport;
}

/// Deterministic synthetic backend.
///
/// Titles number runs per backend instance; samples come from a small
/// linear congruential generator seeded by the run counter, so every
/// test sees the same data for the same call sequence.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    runs: u64,
}

impl MockBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn category_for(algorithm: &str) -> Option<Category> {
    let lower = algorithm.to_ascii_lowercase();
    if lower.contains("trend") || lower.contains("forecast") {
        Some(Category::Trend)
    } else if lower.contains("distribution") || lower.contains("histogram") {
        Some(Category::Distribution)
    } else if lower.contains("correlation") || lower.contains("regression") {
        Some(Category::Relationship)
    } else if lower.contains("composition") || lower.contains("breakdown") {
        Some(Category::Composition)
    } else {
        None
    }
}

fn title_case(algorithm: &str) -> String {
    let mut chars = algorithm.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::from("Analysis"),
    }
}

impl AnalysisBackend for MockBackend {
    fn run(&mut self, request: &RunRequest) -> AnalysisReport {
        self.runs += 1;
        let panels = request
            .panels
            .unwrap_or(DEFAULT_PANELS)
            .clamp(1, MAX_PANELS);

        let mut state = self.runs.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1;
        let mut next = move || {
            // Numerical Recipes LCG constants.
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            ((state >> 33) as f32 / (u32::MAX >> 1) as f32) * 10.0
        };

        let plots = (0..panels)
            .map(|i| PlotData {
                id: i as u32,
                title: format!("{} series {}", title_case(&request.algorithm), i + 1),
                kind: if i % 2 == 0 {
                    PlotKind::Bar
                } else {
                    PlotKind::Scatter
                },
                samples: (0..SAMPLES_PER_PLOT).map(|_| next()).collect(),
            })
            .collect();

        AnalysisReport {
            title: format!("{} #{}", title_case(&request.algorithm), self.runs),
            summary: format!(
                "Synthetic {} over {} series of {} samples.",
                request.algorithm, panels, SAMPLES_PER_PLOT
            ),
            category: category_for(&request.algorithm),
            plots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_is_deterministic_per_sequence() {
        let report_a = MockBackend::new().run(&RunRequest::new("trend"));
        let report_b = MockBackend::new().run(&RunRequest::new("trend"));
        assert_eq!(report_a, report_b);
    }

    #[test]
    fn successive_runs_differ() {
        let mut backend = MockBackend::new();
        let first = backend.run(&RunRequest::new("trend"));
        let second = backend.run(&RunRequest::new("trend"));
        assert_ne!(first.title, second.title);
        assert_ne!(first.plots[0].samples, second.plots[0].samples);
    }

    #[test]
    fn panels_default_and_clamp() {
        let mut backend = MockBackend::new();
        assert_eq!(backend.run(&RunRequest::new("trend")).plots.len(), 2);
        assert_eq!(
            backend
                .run(&RunRequest::new("trend").with_panels(40))
                .plots
                .len(),
            6
        );
        assert_eq!(
            backend
                .run(&RunRequest::new("trend").with_panels(0))
                .plots
                .len(),
            1
        );
    }

    #[test]
    fn plot_kinds_alternate() {
        let report = MockBackend::new().run(&RunRequest::new("trend").with_panels(3));
        assert_eq!(report.plots[0].kind, PlotKind::Bar);
        assert_eq!(report.plots[1].kind, PlotKind::Scatter);
        assert_eq!(report.plots[2].kind, PlotKind::Bar);
    }

    #[test]
    fn algorithm_name_maps_to_category() {
        let mut backend = MockBackend::new();
        assert_eq!(
            backend.run(&RunRequest::new("trend")).category,
            Some(Category::Trend)
        );
        assert_eq!(
            backend.run(&RunRequest::new("Correlation scan")).category,
            Some(Category::Relationship)
        );
        assert_eq!(backend.run(&RunRequest::new("mystery")).category, None);
    }

    #[test]
    fn samples_are_plausible() {
        let report = MockBackend::new().run(&RunRequest::new("distribution"));
        for plot in &report.plots {
            assert_eq!(plot.samples.len(), 12);
            assert!(plot.samples.iter().all(|s| (0.0..=10.0).contains(s)));
        }
    }
}
