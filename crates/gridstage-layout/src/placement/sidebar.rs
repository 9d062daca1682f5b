#![forbid(unsafe_code)]

//! Sidebar variant: a bounded-column grid beside the stage.
//!
//! Inactive artifacts stack top-down in columns of [`ROWS_PER_COLUMN`],
//! anchored to the top of the stage box; each full column starts a new
//! one further back in depth. Cards are scaled down, yawed to face
//! inward, and brighten on hover.

use gridstage_core::geometry::Vec3;
use gridstage_core::pose::Pose;

use super::PlacementContext;

/// Rows per column before the stack recedes a column.
pub(crate) const ROWS_PER_COLUMN: usize = 4;

/// Card scale as a fraction of the stage dimensions.
const CARD_FRACTION: f32 = 0.24;

/// Vertical pitch between rows, as a fraction of stage height.
const ROW_PITCH: f32 = 0.26;

/// Horizontal gap between the stage's right edge and the first column,
/// as a fraction of stage width.
const SIDE_GAP: f32 = 0.22;

/// Horizontal pitch between columns, fraction of stage width.
const COLUMN_PITCH: f32 = 0.10;

/// Depth receded per column.
const COLUMN_DEPTH: f32 = 1.4;

/// Yaw toward the stage center, radians.
const YAW_INWARD: f32 = -0.45;

const BASE_OPACITY: f32 = 0.55;
const HOVER_OPACITY: f32 = 0.9;

pub(crate) fn pose(ctx: &PlacementContext) -> Pose {
    let stage = ctx.stage;
    let row = ctx.inactive_rank % ROWS_PER_COLUMN;
    let column = ctx.inactive_rank / ROWS_PER_COLUMN;

    let card_height = stage.height * CARD_FRACTION;
    let x = stage.right()
        + stage.width * SIDE_GAP
        + column as f32 * stage.width * COLUMN_PITCH;
    let y = stage.top() - card_height / 2.0 - row as f32 * stage.height * ROW_PITCH;
    let z = -(1.0 + column as f32 * COLUMN_DEPTH);

    Pose::new(
        Vec3::new(x, y, z),
        YAW_INWARD,
        Vec3::new(stage.width * CARD_FRACTION, card_height, 1.0),
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
    fn first_card_anchors_at_stage_top() {
        let pose = pose(&ctx(0));
        let stage_top = 1.0 + 5.0 / 2.0;
        assert!((pose.position.y + pose.scale.y / 2.0 - stage_top).abs() < 1e-5);
        assert!(pose.position.x > 3.0 + 3.0, "right of the stage");
    }

    #[test]
    fn rows_descend_within_a_column() {
        for rank in 0..ROWS_PER_COLUMN - 1 {
            assert!(pose(&ctx(rank + 1)).position.y < pose(&ctx(rank)).position.y);
        }
    }

    #[test]
    fn column_wrap_recedes_in_depth() {
        let last_in_first = pose(&ctx(ROWS_PER_COLUMN - 1));
        let first_in_second = pose(&ctx(ROWS_PER_COLUMN));
        assert!(first_in_second.position.z < last_in_first.position.z);
        assert!(first_in_second.position.x > last_in_first.position.x);
        // New column restarts at the top.
        assert!((first_in_second.position.y - pose(&ctx(0)).position.y).abs() < 1e-5);
    }

    #[test]
    fn cards_face_inward() {
        assert!((pose(&ctx(0)).yaw - YAW_INWARD).abs() < f32::EPSILON);
    }

    #[test]
    fn hover_brightens() {
        let plain = pose(&ctx(2));
        let hovered = pose(&ctx(2).hovered(true));
        assert!(hovered.opacity > plain.opacity);
        assert_eq!(hovered.position, plain.position);
    }
}
