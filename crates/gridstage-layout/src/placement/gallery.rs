#![forbid(unsafe_code)]

//! Gallery variant: alternating left/right rings around the stage.
//!
//! Inactive artifacts alternate sides of the stage box (even ranks
//! right, odd ranks left). A "ring" is `rank / 2`; depth recedes
//! monotonically with the ring, and cards yaw outward proportionally
//! to their side. The horizontal fan is capped so the left/right flip
//! between consecutive ranks stays bounded however deep the ring.

use gridstage_core::geometry::Vec3;
use gridstage_core::pose::Pose;

use super::PlacementContext;

/// Horizontal offset of ring 0 from the stage center, fraction of
/// stage width.
const SIDE_OFFSET: f32 = 0.75;

/// Extra horizontal spread per ring, fraction of stage width.
const RING_SPREAD: f32 = 0.06;

/// Cap on the accumulated spread, fraction of stage width. With
/// `SIDE_OFFSET` this keeps the side-to-side distance under twice the
/// stage width at every ring.
const MAX_RING_SPREAD: f32 = 0.2;

/// Depth of ring 0 behind the layout plane.
const RING_SETBACK: f32 = 1.2;

/// Depth receded per ring; keeps depth strictly monotone in the ring.
const RING_DEPTH: f32 = 1.1;

/// Card scale as a fraction of the stage dimensions.
const CARD_FRACTION: f32 = 0.4;

/// Outward yaw per side, radians.
const YAW_OUTWARD: f32 = 0.5;

const BASE_OPACITY: f32 = 0.65;
const OPACITY_FADE_PER_RING: f32 = 0.07;
const MIN_OPACITY: f32 = 0.25;
const HOVER_OPACITY: f32 = 0.9;

pub(crate) fn pose(ctx: &PlacementContext) -> Pose {
    let stage = ctx.stage;
    let side = if ctx.inactive_rank % 2 == 0 { 1.0 } else { -1.0 };
    let ring = (ctx.inactive_rank / 2) as f32;

    let spread = (ring * RING_SPREAD).min(MAX_RING_SPREAD);
    let x = stage.cx + side * stage.width * (SIDE_OFFSET + spread);
    let z = -(RING_SETBACK + ring * RING_DEPTH);
    let opacity = if ctx.hovered {
        HOVER_OPACITY
    } else {
        (BASE_OPACITY - ring * OPACITY_FADE_PER_RING).max(MIN_OPACITY)
    };

    Pose::new(
        Vec3::new(x, stage.cy, z),
        -side * YAW_OUTWARD,
        Vec3::new(stage.width * CARD_FRACTION, stage.height * CARD_FRACTION, 1.0),
        opacity,
    )
}
