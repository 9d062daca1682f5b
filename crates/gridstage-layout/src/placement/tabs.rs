#![forbid(unsafe_code)]

//! Tabs variant: thin strips stacked above the data grid.
//!
//! Rank 0 (most recently deactivated) takes the highest slot of a
//! fixed stack; later ranks descend toward the grid's top edge and
//! ranks past the stack depth rest together on the lowest slot, still
//! above the grid. Slot height is fixed, so the pose is a pure
//! function of rank with no dependence on the collection size.

use gridstage_core::geometry::Vec3;
use gridstage_core::pose::Pose;

use super::PlacementContext;

/// Slots in the stack between the grid top and the top of the pile.
const STACK_SLOTS: usize = 8;

/// Strip width as a fraction of the grid width.
const STRIP_WIDTH: f32 = 0.55;

/// Strip height as a fraction of the grid height.
const STRIP_HEIGHT: f32 = 0.10;

/// Vertical slot pitch, fraction of grid height.
const SLOT_PITCH: f32 = 0.14;

/// Gap between the grid's top edge and the lowest slot, fraction of
/// grid height.
const STACK_GAP: f32 = 0.06;

/// Depth offset behind the grid plane.
const STRIP_DEPTH: f32 = -0.4;

const BASE_OPACITY: f32 = 0.5;
const HOVER_OPACITY: f32 = 0.85;
const HOVER_SCALE: f32 = 1.05;

pub(crate) fn pose(ctx: &PlacementContext) -> Pose {
    let grid = ctx.grid;
    let slot = STACK_SLOTS.saturating_sub(ctx.inactive_rank) as f32;
    let y = grid.top() + grid.height * (STACK_GAP + slot * SLOT_PITCH);

    let bump = if ctx.hovered { HOVER_SCALE } else { 1.0 };
    Pose::new(
        Vec3::new(grid.cx, y, STRIP_DEPTH),
        0.0,
        Vec3::new(
            grid.width * STRIP_WIDTH * bump,
            grid.height * STRIP_HEIGHT * bump,
            1.0,
        ),
        if ctx.hovered { HOVER_OPACITY } else { BASE_OPACITY },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridstage_core::geometry::LayoutBox;

    fn ctx(rank: usize) -> PlacementContext<'static> {
        let stage = LayoutBox::new(3.0, 1.0, 6.0, 5.0);
        let grid = LayoutBox::new(-4.0, 1.0, 6.0, 5.0);
        PlacementContext::inactive("a", rank, stage, grid)
    }

    #[test]
    fn most_recent_sits_on_top() {
        assert!(pose(&ctx(0)).position.y > pose(&ctx(1)).position.y);
        assert!(pose(&ctx(1)).position.y > pose(&ctx(2)).position.y);
    }

    #[test]
    fn strips_sit_above_grid_at_any_rank() {
        let grid_top = 1.0 + 5.0 / 2.0;
        for rank in 0..super::STACK_SLOTS * 3 {
            assert!(pose(&ctx(rank)).position.y > grid_top, "rank {rank}");
        }
    }

    #[test]
    fn deep_ranks_rest_on_the_lowest_slot() {
        let floor = pose(&ctx(super::STACK_SLOTS)).position.y;
        assert_eq!(pose(&ctx(super::STACK_SLOTS + 5)).position.y, floor);
        assert!(pose(&ctx(super::STACK_SLOTS - 1)).position.y > floor);
    }

    #[test]
    fn fixed_slot_pitch() {
        let pitch01 = pose(&ctx(0)).position.y - pose(&ctx(1)).position.y;
        let pitch12 = pose(&ctx(1)).position.y - pose(&ctx(2)).position.y;
        assert!((pitch01 - pitch12).abs() < 1e-5);
    }

    #[test]
    fn strips_are_thin_and_centered_on_grid() {
        let pose = pose(&ctx(0));
        assert!((pose.position.x - -4.0).abs() < 1e-6);
        assert!(pose.scale.y < pose.scale.x);
    }

    #[test]
    fn hover_grows_and_brightens() {
        let plain = pose(&ctx(3));
        let hovered = pose(&ctx(3).hovered(true));
        assert!(hovered.opacity > plain.opacity);
        assert!(hovered.scale.x > plain.scale.x);
        assert!(hovered.scale.y > plain.scale.y);
    }
}
