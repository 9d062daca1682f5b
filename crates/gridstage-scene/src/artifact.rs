#![forbid(unsafe_code)]

//! Artifact and plot data types.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Opaque unique identifier for an artifact. Assigned at creation by
/// the lifecycle manager, immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtifactId(pub u64);

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "artifact-{}", self.0)
    }
}

/// The closed set of plot renderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlotKind {
    Bar,
    Scatter,
}

/// One visualizable series within an artifact. Immutable once
/// attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotData {
    pub id: u32,
    pub title: String,
    pub kind: PlotKind,
    pub samples: Vec<f32>,
}

impl PlotData {
    /// Largest sample, floored at 1.0 so an empty or all-tiny series
    /// never produces a degenerate normalization divisor.
    #[must_use]
    pub fn max_sample(&self) -> f32 {
        self.samples.iter().copied().fold(0.0f32, f32::max).max(1.0)
    }
}

/// Explicit visual category for the grouping layout.
///
/// Supplied by the analysis backend; the legacy title-substring match
/// in the grouping strategy is only a fallback for artifacts that
/// carry none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Trend,
    Distribution,
    Relationship,
    Composition,
    Uncategorized,
}

impl Category {
    /// Grouping bucket slot, if the category maps to one.
    /// `Uncategorized` has no slot and falls through to the rank-based
    /// fallback.
    #[must_use]
    pub const fn bucket(self) -> Option<usize> {
        match self {
            Category::Trend => Some(0),
            Category::Distribution => Some(1),
            Category::Relationship => Some(2),
            Category::Composition => Some(3),
            Category::Uncategorized => None,
        }
    }
}

/// Lifecycle status. Monotonic: `Pending` may only become `Complete`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ArtifactStatus {
    /// In flight, with a non-decreasing progress fraction in [0, 1].
    Pending { progress: f32 },
    /// Finished; progress is no longer tracked.
    Complete,
}

impl ArtifactStatus {
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, ArtifactStatus::Pending { .. })
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self, ArtifactStatus::Complete)
    }
}

/// One completed or in-flight analysis result.
///
/// Exclusively owned by the lifecycle manager's ordered collection;
/// every other component reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub id: ArtifactId,
    pub title: String,
    /// The only field allowed to be empty pre-completion.
    pub summary: String,
    pub category: Option<Category>,
    /// Empty while pending.
    pub plots: Vec<PlotData>,
    pub status: ArtifactStatus,
    /// Simulated-clock timestamp; default ordering only.
    pub created_at: Duration,
}

impl Artifact {
    /// A pending shell: title known, summary empty, no plots.
    #[must_use]
    pub fn pending(id: ArtifactId, title: impl Into<String>, created_at: Duration) -> Self {
        Self {
            id,
            title: title.into(),
            summary: String::new(),
            category: None,
            plots: Vec::new(),
            status: ArtifactStatus::Pending { progress: 0.0 },
            created_at,
        }
    }

    /// Progress fraction: the pending value, or 1.0 once complete.
    #[must_use]
    pub fn progress(&self) -> f32 {
        match self.status {
            ArtifactStatus::Pending { progress } => progress,
            ArtifactStatus::Complete => 1.0,
        }
    }

    /// Raise pending progress, clamped to [current, 1.0]. A complete
    /// artifact ignores the call; progress never decreases.
    pub fn raise_progress(&mut self, to: f32) {
        if let ArtifactStatus::Pending { progress } = &mut self.status {
            *progress = to.clamp(*progress, 1.0);
        }
    }
}
