#![forbid(unsafe_code)]

//! Shared active-artifact pose.

use gridstage_core::geometry::Vec3;
use gridstage_core::pose::Pose;

use super::PlacementContext;

/// Fraction of the stage box the unexpanded active artifact fills.
pub(crate) const ACTIVE_FILL: f32 = 0.92;

/// Growth factor the expanded sub-state reaches for, before the stage
/// bound clamps it.
const EXPAND_FACTOR: f32 = 1.3;

/// Pose for the active artifact: centered in the stage box, full
/// opacity, identity yaw. The expanded sub-state grows toward
/// `ACTIVE_FILL * EXPAND_FACTOR` of the stage, bounded by the stage
/// box itself, and shifts the anchor down so the top edge holds.
pub(crate) fn active_pose(ctx: &PlacementContext) -> Pose {
    let stage = ctx.stage;
    let fill = if ctx.expanded {
        (ACTIVE_FILL * EXPAND_FACTOR).min(1.0)
    } else {
        ACTIVE_FILL
    };
    // Keep the top edge where the unexpanded pose puts it.
    let cy = stage.cy + (ACTIVE_FILL - fill) * stage.height / 2.0;
    Pose::new(
        Vec3::new(stage.cx, cy, 0.0),
        0.0,
        Vec3::new(stage.width * fill, stage.height * fill, 1.0),
        1.0,
    )
}
