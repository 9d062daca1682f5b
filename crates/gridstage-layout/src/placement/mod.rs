#![forbid(unsafe_code)]

//! Placement strategies.
//!
//! Four interchangeable variants map an artifact's activation state
//! and inactive rank to a target pose; the dispatch is a closed match
//! on [`PlacementMode`], so adding a layout means adding a variant
//! module satisfying the shared contract, never touching call sites.
//!
//! Shared contract, all variants:
//!
//! - The active artifact centers in the stage box at full opacity,
//!   identity yaw, scale derived from the stage dimensions (the
//!   expanded sub-state grows toward a maximum bounded by the stage
//!   box and holds the top edge).
//! - Inactive opacity and scale never exceed the active values; that
//!   is enforced by construction here, not by an external check.
//! - Poses are deterministic functions of the context. Recomputing
//!   with identical inputs yields bit-identical poses.

mod active;
mod gallery;
mod grouping;
mod sidebar;
mod tabs;

pub use grouping::bucket_for;

use gridstage_core::config::PlacementMode;
use gridstage_core::geometry::LayoutBox;
use gridstage_core::pose::Pose;

/// Everything a variant may read when posing one artifact.
#[derive(Debug, Clone, Copy)]
pub struct PlacementContext<'a> {
    /// Artifact title; the grouping variant's legacy fallback matches
    /// substrings against it.
    pub title: &'a str,
    /// Explicit grouping bucket supplied by the backend, when any.
    pub category_slot: Option<usize>,
    pub is_active: bool,
    /// Rank among inactive artifacts; meaningless when `is_active`.
    pub inactive_rank: usize,
    /// Active-only expansion sub-state.
    pub expanded: bool,
    pub hovered: bool,
    pub stage: LayoutBox,
    pub grid: LayoutBox,
}

impl<'a> PlacementContext<'a> {
    /// Context for the active artifact.
    #[must_use]
    pub fn active(title: &'a str, stage: LayoutBox, grid: LayoutBox) -> Self {
        Self {
            title,
            category_slot: None,
            is_active: true,
            inactive_rank: 0,
            expanded: false,
            hovered: false,
            stage,
            grid,
        }
    }

    /// Context for an inactive artifact at `rank`.
    #[must_use]
    pub fn inactive(title: &'a str, rank: usize, stage: LayoutBox, grid: LayoutBox) -> Self {
        Self {
            title,
            category_slot: None,
            is_active: false,
            inactive_rank: rank,
            expanded: false,
            hovered: false,
            stage,
            grid,
        }
    }

    #[must_use]
    pub fn hovered(mut self, hovered: bool) -> Self {
        self.hovered = hovered;
        self
    }

    #[must_use]
    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    #[must_use]
    pub fn with_category_slot(mut self, slot: Option<usize>) -> Self {
        self.category_slot = slot;
        self
    }
}

/// Target pose for one artifact under `mode`.
#[must_use]
pub fn target_pose(mode: PlacementMode, ctx: &PlacementContext) -> Pose {
    if ctx.is_active {
        return active::active_pose(ctx);
    }
    match mode {
        PlacementMode::Sidebar => sidebar::pose(ctx),
        PlacementMode::Tabs => tabs::pose(ctx),
        PlacementMode::Grouping => grouping::pose(ctx),
        PlacementMode::Gallery => gallery::pose(ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxes() -> (LayoutBox, LayoutBox) {
        let grid = LayoutBox::new(-4.0, 1.0, 6.0, 5.0);
        let stage = LayoutBox::new(3.0, 1.0, 6.0, 5.0);
        (stage, grid)
    }

    #[test]
    fn active_pose_is_shared_across_variants() {
        let (stage, grid) = boxes();
        let ctx = PlacementContext::active("Trend #1", stage, grid);
        let reference = target_pose(PlacementMode::Sidebar, &ctx);
        for mode in PlacementMode::ALL {
            assert_eq!(target_pose(*mode, &ctx), reference, "{mode}");
        }
    }

    #[test]
    fn placement_is_idempotent_bit_identical() {
        let (stage, grid) = boxes();
        for mode in PlacementMode::ALL {
            for rank in 0..12 {
                let ctx = PlacementContext::inactive("Trend #1", rank, stage, grid);
                assert_eq!(target_pose(*mode, &ctx), target_pose(*mode, &ctx));
            }
        }
    }

    #[test]
    fn inactive_never_exceeds_active_opacity_or_scale() {
        let (stage, grid) = boxes();
        let active = target_pose(
            PlacementMode::Sidebar,
            &PlacementContext::active("a", stage, grid),
        );
        for mode in PlacementMode::ALL {
            for rank in 0..16 {
                for hovered in [false, true] {
                    let ctx =
                        PlacementContext::inactive("a", rank, stage, grid).hovered(hovered);
                    let pose = target_pose(*mode, &ctx);
                    assert!(pose.opacity <= active.opacity + 1e-6, "{mode} rank {rank}");
                    assert!(pose.scale.x <= active.scale.x + 1e-6, "{mode} rank {rank}");
                    assert!(pose.scale.y <= active.scale.y + 1e-6, "{mode} rank {rank}");
                }
            }
        }
    }

    #[test]
    fn consecutive_ranks_stay_bounded() {
        // No discontinuity blow-ups: successive ranks move by less
        // than the whole stage width.
        let (stage, grid) = boxes();
        for mode in PlacementMode::ALL {
            for rank in 0..20 {
                let a = target_pose(
                    *mode,
                    &PlacementContext::inactive("a", rank, stage, grid),
                );
                let b = target_pose(
                    *mode,
                    &PlacementContext::inactive("a", rank + 1, stage, grid),
                );
                let dx = (a.position.x - b.position.x).abs();
                let dy = (a.position.y - b.position.y).abs();
                let dz = (a.position.z - b.position.z).abs();
                assert!(dx.max(dy).max(dz) < stage.width * 2.0, "{mode} rank {rank}");
                assert!(b.position.x.is_finite() && b.position.y.is_finite());
            }
        }
    }

    #[test]
    fn hover_raises_opacity_everywhere() {
        let (stage, grid) = boxes();
        for mode in PlacementMode::ALL {
            let plain = target_pose(
                *mode,
                &PlacementContext::inactive("a", 1, stage, grid),
            );
            let hovered = target_pose(
                *mode,
                &PlacementContext::inactive("a", 1, stage, grid).hovered(true),
            );
            assert!(hovered.opacity > plain.opacity, "{mode}");
        }
    }
}
