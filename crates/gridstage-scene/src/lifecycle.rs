#![forbid(unsafe_code)]

//! Artifact lifecycle state machine.
//!
//! The manager is the single owner of the ordered artifact collection
//! and the active-artifact identity. Three reveal policies drive the
//! pending → complete transition:
//!
//! - **Immediate**: creation yields a complete artifact at once.
//! - **Fixed delay**: nothing is visible until a one-shot timer fires,
//!   then the complete artifact is inserted.
//! - **Streaming**: a pending artifact appears immediately at progress
//!   0; a recurring timer raises progress in fixed steps until it
//!   reaches exactly 1.0, at which point the entry is completed in
//!   place under the same id.
//!
//! Timers run on a simulated clock: [`LifecycleManager::poll`] fires
//! everything due at the supplied instant, in due order. No threads,
//! no blocking.
//!
//! # Invariants
//!
//! 1. At most one artifact is active; none when the collection is
//!    empty.
//! 2. Inactive ranks are a gap-free permutation of `0..n-1` over the
//!    non-active set, derived from collection order on every query and
//!    never persisted.
//! 3. Status is monotonic and progress non-decreasing per artifact.
//! 4. Completing a streaming artifact preserves its id; it is the only
//!    transition that mutates an existing entry.
//! 5. At most one timer exists per artifact id, by construction:
//!    timers are created once at submission and retire on completion.
//!
//! Serializing runs is not this component's job: the grid surface's
//! processing flag gates new submissions while [`has_inflight`] holds.
//!
//! [`has_inflight`]: LifecycleManager::has_inflight

use std::time::Duration;

use tracing::debug;

use gridstage_core::config::ProgressMode;

use crate::artifact::{Artifact, ArtifactId, ArtifactStatus};
use crate::backend::AnalysisReport;

/// Simulated delay before a fixed-delay run materializes.
pub const RUN_DELAY: Duration = Duration::from_millis(1200);

/// Interval between streaming progress increments.
pub const STREAM_INTERVAL: Duration = Duration::from_millis(250);

/// Progress added per streaming increment.
pub const STREAM_STEP: f32 = 0.1;

/// What happened during a poll, in firing order.
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent {
    /// An artifact entered the collection (pending or complete).
    Inserted(ArtifactId),
    /// A streaming artifact's progress rose.
    Progressed { id: ArtifactId, progress: f32 },
    /// An artifact reached `Complete`.
    Completed(ArtifactId),
}

#[derive(Debug, Clone)]
enum TimerKind {
    /// Fixed-delay: insert the finished artifact when due.
    Materialize { report: AnalysisReport },
    /// Streaming: raise progress each interval; complete at 1.0.
    Stream { report: AnalysisReport },
}

#[derive(Debug, Clone)]
struct RunTimer {
    id: ArtifactId,
    due: Duration,
    kind: TimerKind,
}

/// Owner of the artifact collection and its lifecycle timers.
#[derive(Debug, Default)]
pub struct LifecycleManager {
    artifacts: Vec<Artifact>,
    active: Option<ArtifactId>,
    timers: Vec<RunTimer>,
    next_id: u64,
}

impl LifecycleManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> ArtifactId {
        let id = ArtifactId(self.next_id);
        self.next_id += 1;
        id
    }

    fn build_complete(id: ArtifactId, report: AnalysisReport, now: Duration) -> Artifact {
        Artifact {
            id,
            title: report.title,
            summary: report.summary,
            category: report.category,
            plots: report.plots,
            status: ArtifactStatus::Complete,
            created_at: now,
        }
    }

    /// Insert an artifact at the front of the collection without
    /// activating it. Creation flows compose this with [`activate`];
    /// inserting without activating is a legal state on its own.
    ///
    /// [`activate`]: LifecycleManager::activate
    pub fn insert(&mut self, artifact: Artifact) -> ArtifactId {
        let id = artifact.id;
        debug!(artifact = %id, title = %artifact.title, "insert");
        self.artifacts.insert(0, artifact);
        id
    }

    /// Make an existing artifact the active one. The underlying
    /// collection order is untouched; rank is a derived view.
    ///
    /// Returns false when the id is unknown.
    pub fn activate(&mut self, id: ArtifactId) -> bool {
        if self.artifacts.iter().any(|a| a.id == id) {
            debug!(artifact = %id, "activate");
            self.active = Some(id);
            true
        } else {
            false
        }
    }

    /// Admit a finished report as a complete artifact at the front,
    /// without activating it.
    pub fn admit(&mut self, report: AnalysisReport, now: Duration) -> ArtifactId {
        let id = self.allocate_id();
        let artifact = Self::build_complete(id, report, now);
        self.insert(artifact);
        id
    }

    /// Start a run under the given reveal policy. Returns the id the
    /// eventual artifact will carry (for fixed delay, it is not yet in
    /// the collection).
    pub fn submit(
        &mut self,
        report: AnalysisReport,
        mode: ProgressMode,
        now: Duration,
    ) -> ArtifactId {
        match mode {
            ProgressMode::Immediate => {
                let id = self.admit(report, now);
                self.activate(id);
                id
            }
            ProgressMode::FixedDelay => {
                let id = self.allocate_id();
                debug!(artifact = %id, delay = ?RUN_DELAY, "scheduled fixed-delay run");
                self.timers.push(RunTimer {
                    id,
                    due: now + RUN_DELAY,
                    kind: TimerKind::Materialize { report },
                });
                id
            }
            ProgressMode::Streaming => {
                let id = self.allocate_id();
                let pending = Artifact::pending(id, report.title.clone(), now);
                self.insert(pending);
                self.activate(id);
                self.timers.push(RunTimer {
                    id,
                    due: now + STREAM_INTERVAL,
                    kind: TimerKind::Stream { report },
                });
                id
            }
        }
    }

    /// Fire every timer due at `now`, in due order. Returns the
    /// transitions that occurred so the runtime can react (e.g.
    /// register plot panels on completion).
    pub fn poll(&mut self, now: Duration) -> Vec<LifecycleEvent> {
        let mut events = Vec::new();
        loop {
            // Earliest due timer at or before `now`.
            let next = self
                .timers
                .iter()
                .enumerate()
                .filter(|(_, t)| t.due <= now)
                .min_by_key(|(_, t)| t.due)
                .map(|(i, _)| i);
            let Some(index) = next else { break };
            let timer = self.timers.swap_remove(index);
            match timer.kind {
                TimerKind::Materialize { report } => {
                    let artifact = Self::build_complete(timer.id, report, now);
                    self.insert(artifact);
                    self.activate(timer.id);
                    events.push(LifecycleEvent::Inserted(timer.id));
                    events.push(LifecycleEvent::Completed(timer.id));
                }
                TimerKind::Stream { report } => {
                    let progress = self
                        .get(timer.id)
                        .map(|a| a.progress() + STREAM_STEP)
                        .unwrap_or(1.0)
                        .min(1.0);
                    if progress >= 1.0 {
                        self.complete_in_place(timer.id, report, progress, &mut events);
                    } else {
                        if let Some(artifact) =
                            self.artifacts.iter_mut().find(|a| a.id == timer.id)
                        {
                            artifact.raise_progress(progress);
                        }
                        events.push(LifecycleEvent::Progressed {
                            id: timer.id,
                            progress,
                        });
                        self.timers.push(RunTimer {
                            id: timer.id,
                            due: timer.due + STREAM_INTERVAL,
                            kind: TimerKind::Stream { report },
                        });
                    }
                }
            }
        }
        events
    }

    /// Replace a pending entry with its complete form, same id. The
    /// only transition that mutates an existing entry.
    fn complete_in_place(
        &mut self,
        id: ArtifactId,
        report: AnalysisReport,
        final_progress: f32,
        events: &mut Vec<LifecycleEvent>,
    ) {
        let Some(artifact) = self.artifacts.iter_mut().find(|a| a.id == id) else {
            return;
        };
        if artifact.status.is_complete() {
            return;
        }
        artifact.raise_progress(final_progress);
        artifact.title = report.title;
        artifact.summary = report.summary;
        artifact.category = report.category;
        artifact.plots = report.plots;
        artifact.status = ArtifactStatus::Complete;
        debug!(artifact = %id, "completed in place");
        events.push(LifecycleEvent::Progressed { id, progress: 1.0 });
        events.push(LifecycleEvent::Completed(id));
    }

    /// Whether any run is in flight (pending entry or armed timer).
    #[must_use]
    pub fn has_inflight(&self) -> bool {
        !self.timers.is_empty() || self.artifacts.iter().any(|a| a.status.is_pending())
    }

    /// The active artifact's id, if any.
    #[must_use]
    pub fn active(&self) -> Option<ArtifactId> {
        self.active
    }

    /// The ordered collection, newest first.
    #[must_use]
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    #[must_use]
    pub fn get(&self, id: ArtifactId) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.id == id)
    }

    /// Rank among inactive artifacts: filter the collection to
    /// non-active entries and take the index. `None` for the active
    /// artifact or an unknown id.
    #[must_use]
    pub fn inactive_rank(&self, id: ArtifactId) -> Option<usize> {
        if self.active == Some(id) {
            return None;
        }
        self.artifacts
            .iter()
            .filter(|a| Some(a.id) != self.active)
            .position(|a| a.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}
