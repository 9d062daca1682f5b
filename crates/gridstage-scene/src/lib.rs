#![forbid(unsafe_code)]

//! Scene model: artifacts, their lifecycle, and plot panel state.
//!
//! # Role in GridStage
//! `gridstage-scene` owns the ordered artifact collection and every
//! state machine attached to it: the pending → complete lifecycle with
//! its three reveal policies, the derived inactive ranks, and the
//! per-artifact plot panel (focus, expansion, pagination).
//!
//! # Primary responsibilities
//! - **Artifact / PlotData**: the result bundle one analysis run
//!   produces, immutable once complete.
//! - **LifecycleManager**: single owner of the collection and the
//!   active-artifact identity; drives timers on a simulated clock.
//! - **AnalysisBackend**: the narrow seam to whatever produces results
//!   (a deterministic mock in this scope).
//! - **PlotPanel**: focus/expansion/pagination per artifact.
//!
//! # How it fits in the system
//! The runtime calls `LifecycleManager::poll` once per tick before
//! placement recomputes, and treats the collection as read-only for
//! the rest of the tick. Placement and animation never mutate
//! artifacts.

pub mod artifact;
pub mod backend;
pub mod lifecycle;
pub mod plot_panel;

pub use artifact::{Artifact, ArtifactId, ArtifactStatus, Category, PlotData, PlotKind};
pub use backend::{AnalysisBackend, AnalysisReport, MockBackend, RunRequest};
pub use lifecycle::{LifecycleEvent, LifecycleManager};
pub use plot_panel::PlotPanel;
