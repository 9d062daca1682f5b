#![forbid(unsafe_code)]

//! The workspace: single owner of all mutable state, ticked once per
//! frame.
//!
//! Per-tick ordering, guaranteed within one tick and deliberately not
//! across ticks: lifecycle timers fire first, then viewport
//! partitioning (memoized on the input tuple), then placement
//! recomputes every target pose, then the animation arena converges
//! one step. A strategy switch may therefore render one tick against a
//! stale target; convergence absorbs it within a few frames.
//!
//! Scheduling is single-threaded and cooperative: nothing blocks, all
//! transitions are synchronous mutations observed on the next tick.

use std::time::Duration;

use rustc_hash::FxHashMap;
use tracing::debug;
use web_time::Instant;

use gridstage_core::config::{
    GridEditMode, InteractionMode, PlacementMode, ProgressMode, WorkspaceConfig,
};
use gridstage_core::geometry::Ray;
use gridstage_core::pose::{Pose, PoseArena, PoseTween};
use gridstage_layout::partition::{Partitioner, Regions, ViewportInput};
use gridstage_layout::placement::{PlacementContext, target_pose};
use gridstage_scene::artifact::{Artifact, ArtifactId};
use gridstage_scene::backend::{AnalysisBackend, MockBackend, RunRequest};
use gridstage_scene::lifecycle::LifecycleManager;
use gridstage_scene::plot_panel::PlotPanel;

use crate::surface::GridSurface;

/// Wall-clock frame timer for real render loops. Tests drive
/// [`Workspace::tick`] with fixed durations instead.
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Elapsed time since the previous call.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let dt = now - self.last;
        self.last = now;
        dt
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// The 3D spreadsheet workspace.
#[derive(Debug)]
pub struct Workspace<B = MockBackend> {
    config: WorkspaceConfig,
    viewport: ViewportInput,
    backend: B,
    lifecycle: LifecycleManager,
    partitioner: Partitioner,
    regions: Regions,
    arena: PoseArena<ArtifactId>,
    surface: GridSurface,
    panels: FxHashMap<ArtifactId, PlotPanel>,
    hovered: Option<ArtifactId>,
    /// Expansion sub-state of the currently active artifact; cleared
    /// whenever activation changes.
    expanded: bool,
    clock: Duration,
}

impl Workspace<MockBackend> {
    /// Workspace backed by the deterministic mock backend.
    #[must_use]
    pub fn with_mock(viewport: ViewportInput, config: WorkspaceConfig) -> Self {
        Self::new(viewport, config, MockBackend::new())
    }
}

impl<B: AnalysisBackend> Workspace<B> {
    #[must_use]
    pub fn new(viewport: ViewportInput, config: WorkspaceConfig, backend: B) -> Self {
        let mut partitioner = Partitioner::new();
        let regions = partitioner.regions(viewport);
        let mut surface = GridSurface::new();
        surface.set_base(regions.grid.center());
        surface.set_edit_mode(config.grid_edit);
        Self {
            config,
            viewport,
            backend,
            lifecycle: LifecycleManager::new(),
            partitioner,
            regions,
            arena: PoseArena::new(),
            surface,
            panels: FxHashMap::default(),
            hovered: None,
            expanded: false,
            clock: Duration::ZERO,
        }
    }

    /// Advance the workspace one frame.
    pub fn tick(&mut self, dt: Duration) {
        self.clock += dt;

        // 1. Lifecycle timers.
        let events = self.lifecycle.poll(self.clock);
        if !events.is_empty() {
            debug!(count = events.len(), "lifecycle events");
        }
        self.register_panels();

        // 2. Viewport partitioning (memoized).
        self.regions = self.partitioner.regions(self.viewport);
        self.surface.set_base(self.regions.grid.center());

        // 3. Placement: recompute every target pose.
        self.retarget_all();

        // 4. Animation convergence.
        self.arena.advance_all(dt);

        // Processing mirrors in-flight state for the whole creation.
        self.surface.set_processing(self.lifecycle.has_inflight());
    }

    fn register_panels(&mut self) {
        for artifact in self.lifecycle.artifacts() {
            if artifact.status.is_complete() && !self.panels.contains_key(&artifact.id) {
                self.panels.insert(artifact.id, PlotPanel::new());
            }
        }
    }

    fn retarget_all(&mut self) {
        let active = self.lifecycle.active();
        let stage = self.regions.stage;
        let grid = self.regions.grid;
        for artifact in self.lifecycle.artifacts() {
            let is_active = active == Some(artifact.id);
            let rank = self.lifecycle.inactive_rank(artifact.id).unwrap_or(0);
            let ctx = PlacementContext {
                title: &artifact.title,
                category_slot: artifact.category.and_then(|c| c.bucket()),
                is_active,
                inactive_rank: rank,
                expanded: is_active && self.expanded,
                hovered: self.hovered == Some(artifact.id),
                stage,
                grid,
            };
            let target = target_pose(self.config.placement, &ctx);
            self.arena.retarget(artifact.id, target);
        }
        let live: Vec<ArtifactId> = self.lifecycle.artifacts().iter().map(|a| a.id).collect();
        self.arena.retain(|id| live.contains(id));
    }

    /// Request a new analysis run. Ignored while a creation is in
    /// flight; serializing runs is this gate's whole job.
    pub fn submit_run(&mut self, request: RunRequest) -> Option<ArtifactId> {
        if self.surface.is_processing() {
            debug!(algorithm = %request.algorithm, "run ignored: processing");
            return None;
        }
        let report = self.backend.run(&request);
        let id = self.lifecycle.submit(report, self.config.progress, self.clock);
        self.expanded = false;
        self.register_panels();
        self.surface.set_processing(self.lifecycle.has_inflight());
        debug!(artifact = %id, mode = %self.config.progress, "run submitted");
        Some(id)
    }

    /// Activate an existing artifact. Clears the expansion sub-state.
    pub fn activate(&mut self, id: ArtifactId) -> bool {
        if self.lifecycle.activate(id) {
            self.expanded = false;
            true
        } else {
            false
        }
    }

    /// Toggle the active artifact's expansion. No-op with no active
    /// artifact.
    pub fn toggle_expanded(&mut self) -> bool {
        if self.lifecycle.active().is_none() {
            return false;
        }
        self.expanded = !self.expanded;
        true
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn set_hovered(&mut self, id: Option<ArtifactId>) {
        self.hovered = id;
    }

    pub fn set_viewport(&mut self, viewport: ViewportInput) {
        self.viewport = viewport;
    }

    pub fn set_placement(&mut self, mode: PlacementMode) {
        if self.config.placement != mode {
            debug!(from = %self.config.placement, to = %mode, "placement switched");
            self.config.placement = mode;
        }
    }

    pub fn set_interaction(&mut self, mode: InteractionMode) {
        self.config.interaction = mode;
    }

    pub fn set_progress_mode(&mut self, mode: ProgressMode) {
        self.config.progress = mode;
    }

    pub fn set_grid_edit(&mut self, mode: GridEditMode) {
        self.config.grid_edit = mode;
        self.surface.set_edit_mode(mode);
    }

    /// Open the context menu at the pointer's world intersection.
    /// Gated on the contextual-menu interaction mode.
    pub fn open_context_menu(&mut self, ray: &Ray) -> bool {
        if self.config.interaction != InteractionMode::ContextMenu {
            return false;
        }
        self.surface.open_menu(ray)
    }

    /// Select a context-menu entry: closes the menu and submits the
    /// run it names.
    pub fn select_context_entry(&mut self, index: usize) -> Option<ArtifactId> {
        let request = self.surface.select_menu(index)?;
        self.submit_run(request)
    }

    // ── Read access ─────────────────────────────────────────────────

    #[must_use]
    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    #[must_use]
    pub fn clock(&self) -> Duration {
        self.clock
    }

    #[must_use]
    pub fn regions(&self) -> &Regions {
        &self.regions
    }

    #[must_use]
    pub fn artifacts(&self) -> &[Artifact] {
        self.lifecycle.artifacts()
    }

    #[must_use]
    pub fn artifact(&self, id: ArtifactId) -> Option<&Artifact> {
        self.lifecycle.get(id)
    }

    #[must_use]
    pub fn active(&self) -> Option<ArtifactId> {
        self.lifecycle.active()
    }

    #[must_use]
    pub fn inactive_rank(&self, id: ArtifactId) -> Option<usize> {
        self.lifecycle.inactive_rank(id)
    }

    /// Animated pose for an artifact, if it is visible.
    #[must_use]
    pub fn pose(&self, id: ArtifactId) -> Option<Pose> {
        self.arena.current(&id)
    }

    /// Current/target pair for an artifact.
    #[must_use]
    pub fn tween(&self, id: ArtifactId) -> Option<&PoseTween> {
        self.arena.get(&id)
    }

    #[must_use]
    pub fn surface(&self) -> &GridSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut GridSurface {
        &mut self.surface
    }

    #[must_use]
    pub fn panel(&self, id: ArtifactId) -> Option<&PlotPanel> {
        self.panels.get(&id)
    }

    pub fn panel_mut(&mut self, id: ArtifactId) -> Option<&mut PlotPanel> {
        self.panels.get_mut(&id)
    }

    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.surface.is_processing()
    }

    #[must_use]
    pub fn hovered(&self) -> Option<ArtifactId> {
        self.hovered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridstage_core::geometry::Vec3 as V;
    use gridstage_scene::lifecycle::{RUN_DELAY, STREAM_INTERVAL};

    const MS_16: Duration = Duration::from_millis(16);

    fn viewport() -> ViewportInput {
        ViewportInput {
            world_width: 20.0,
            world_height: 12.0,
            pixel_width: 1280.0,
            panel_pixels: 240.0,
        }
    }

    fn workspace() -> Workspace {
        Workspace::with_mock(viewport(), WorkspaceConfig::default())
    }

    fn settle(ws: &mut Workspace, frames: usize) {
        for _ in 0..frames {
            ws.tick(MS_16);
        }
    }

    #[test]
    fn immediate_run_is_active_and_posed() {
        let mut ws = workspace();
        let id = ws.submit_run(RunRequest::new("trend")).unwrap();
        ws.tick(MS_16);
        assert_eq!(ws.active(), Some(id));
        assert!(ws.pose(id).is_some());
        assert!(ws.panel(id).is_some());
        assert!(!ws.is_processing());
    }

    #[test]
    fn fixed_delay_gates_submissions_until_done() {
        let mut ws = workspace();
        ws.set_progress_mode(ProgressMode::FixedDelay);
        let id = ws.submit_run(RunRequest::new("trend")).unwrap();
        assert!(ws.is_processing());
        assert!(ws.submit_run(RunRequest::new("trend")).is_none());

        // RUN_DELAY elapses across ticks.
        let mut elapsed = Duration::ZERO;
        while elapsed < RUN_DELAY {
            ws.tick(MS_16);
            elapsed += MS_16;
        }
        assert_eq!(ws.active(), Some(id));
        assert!(!ws.is_processing());
        assert!(ws.artifact(id).unwrap().status.is_complete());
    }

    #[test]
    fn streaming_run_converges_to_complete() {
        let mut ws = workspace();
        ws.set_progress_mode(ProgressMode::Streaming);
        let id = ws.submit_run(RunRequest::new("distribution")).unwrap();
        assert!(ws.artifact(id).unwrap().status.is_pending());

        // 10 intervals at 0.1 per step.
        for _ in 0..10 {
            ws.tick(STREAM_INTERVAL);
        }
        let artifact = ws.artifact(id).unwrap();
        assert!(artifact.status.is_complete());
        assert!(!artifact.plots.is_empty());
        assert!(!ws.is_processing());
    }

    #[test]
    fn poses_converge_to_targets() {
        let mut ws = workspace();
        let id = ws.submit_run(RunRequest::new("trend")).unwrap();
        settle(&mut ws, 200);
        let tween = ws.tween(id).unwrap();
        assert!(tween.converged(1e-2));
        // Active target centers on the stage box.
        let stage = ws.regions().stage;
        assert!((tween.target.position.x - stage.cx).abs() < 1e-5);
    }

    #[test]
    fn activation_clears_expansion() {
        let mut ws = workspace();
        let first = ws.submit_run(RunRequest::new("trend")).unwrap();
        ws.submit_run(RunRequest::new("trend")).unwrap();
        assert!(ws.toggle_expanded());
        assert!(ws.is_expanded());
        ws.activate(first);
        assert!(!ws.is_expanded());
    }

    #[test]
    fn expansion_needs_an_active_artifact() {
        let mut ws = workspace();
        assert!(!ws.toggle_expanded());
    }

    #[test]
    fn strategy_switch_resolves_over_ticks() {
        let mut ws = workspace();
        let first = ws.submit_run(RunRequest::new("trend")).unwrap();
        ws.submit_run(RunRequest::new("trend")).unwrap();
        settle(&mut ws, 100);
        let sidebar_target = ws.tween(first).unwrap().target;

        ws.set_placement(PlacementMode::Gallery);
        settle(&mut ws, 200);
        let gallery = ws.tween(first).unwrap();
        assert_ne!(gallery.target, sidebar_target);
        assert!(gallery.converged(1e-2));
    }

    #[test]
    fn viewport_change_moves_regions_next_tick() {
        let mut ws = workspace();
        let before = *ws.regions();
        ws.set_viewport(ViewportInput {
            world_width: 30.0,
            ..viewport()
        });
        ws.tick(MS_16);
        assert_ne!(*ws.regions(), before);
        // Surface base follows the grid region.
        let grid = ws.regions().grid;
        let base_follow = ws.surface().position() - ws.surface().offset();
        assert!((base_follow.x - grid.cx).abs() < 1e-5);
    }

    #[test]
    fn hover_feeds_placement() {
        let mut ws = workspace();
        let first = ws.submit_run(RunRequest::new("trend")).unwrap();
        ws.submit_run(RunRequest::new("trend")).unwrap();
        ws.tick(MS_16);
        let plain = ws.tween(first).unwrap().target.opacity;
        ws.set_hovered(Some(first));
        ws.tick(MS_16);
        let hovered = ws.tween(first).unwrap().target.opacity;
        assert!(hovered > plain);
    }

    #[test]
    fn context_menu_gated_on_interaction_mode() {
        let mut ws = workspace();
        let ray = Ray::new(V::new(0.0, 10.0, 0.0), V::new(0.0, -1.0, 0.0));
        assert!(!ws.open_context_menu(&ray));

        ws.set_interaction(InteractionMode::ContextMenu);
        assert!(ws.open_context_menu(&ray));
        let id = ws.select_context_entry(0).unwrap();
        assert!(ws.artifact(id).unwrap().category.is_some());
        assert!(ws.surface().menu().is_none());
    }

    #[test]
    fn stale_arena_entries_are_dropped() {
        // Poses exist only for artifacts in the collection.
        let mut ws = workspace();
        let id = ws.submit_run(RunRequest::new("trend")).unwrap();
        ws.tick(MS_16);
        assert!(ws.pose(id).is_some());
        assert!(ws.pose(gridstage_scene::artifact::ArtifactId(999)).is_none());
    }

    #[test]
    fn frame_clock_yields_nonnegative_dt() {
        let mut clock = FrameClock::new();
        let dt = clock.tick();
        assert!(dt >= Duration::ZERO);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        /// One external stimulus the workspace can receive.
        fn apply(ws: &mut Workspace, action: u8) {
            match action % 4 {
                0 => {
                    let _ = ws.submit_run(RunRequest::new("trend"));
                }
                1 => {
                    let oldest = ws.artifacts().last().map(|a| a.id);
                    if let Some(id) = oldest {
                        ws.activate(id);
                    }
                }
                2 => {
                    let _ = ws.toggle_expanded();
                }
                _ => ws.tick(MS_16),
            }
        }

        proptest! {
            #[test]
            fn inactive_ranks_stay_a_permutation(actions in proptest::collection::vec(any::<u8>(), 1..60)) {
                let mut ws = workspace();
                for action in actions {
                    apply(&mut ws, action);
                    let mut ranks: Vec<usize> = ws
                        .artifacts()
                        .iter()
                        .filter(|a| ws.active() != Some(a.id))
                        .map(|a| ws.inactive_rank(a.id).unwrap())
                        .collect();
                    ranks.sort_unstable();
                    let expected: Vec<usize> = (0..ranks.len()).collect();
                    prop_assert_eq!(ranks, expected);
                }
            }

            #[test]
            fn every_artifact_converges_after_any_sequence(actions in proptest::collection::vec(any::<u8>(), 1..40)) {
                let mut ws = workspace();
                for action in actions {
                    apply(&mut ws, action);
                }
                settle(&mut ws, 600);
                for artifact in ws.artifacts().to_vec() {
                    let tween = ws.tween(artifact.id).unwrap();
                    prop_assert!(tween.converged(1e-2), "{} still moving", artifact.id);
                }
            }
        }
    }
}
