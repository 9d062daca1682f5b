#![forbid(unsafe_code)]

//! Grouping variant: category clusters on an arc behind the grid.
//!
//! Each artifact lands in one of [`BUCKET_COUNT`] buckets. An explicit
//! backend-supplied category wins; otherwise a case-insensitive
//! substring match against the title decides (the legacy behavior);
//! otherwise the bucket falls back to `rank % BUCKET_COUNT`. Buckets
//! occupy fixed angular slots along an arc behind the grid; within a
//! bucket, depth and height offsets grow with rank.

use gridstage_core::geometry::Vec3;
use gridstage_core::pose::Pose;

use super::PlacementContext;

/// Fixed number of visual clusters.
pub const BUCKET_COUNT: usize = 4;

/// Title keywords per bucket slot, matched case-insensitively.
const KEYWORDS: &[(&str, usize)] = &[
    ("trend", 0),
    ("forecast", 0),
    ("distribution", 1),
    ("histogram", 1),
    ("correlation", 2),
    ("regression", 2),
    ("scatter", 2),
    ("composition", 3),
    ("breakdown", 3),
    ("summary", 3),
];

/// Arc radius behind the grid.
const ARC_RADIUS: f32 = 4.5;

/// Depth of the arc's nearest point behind the layout plane.
const ARC_SETBACK: f32 = 1.2;

/// Angular span of the arc, radians.
const ARC_SPAN: f32 = 1.5;

/// Card scale as a fraction of the stage dimensions.
const CARD_FRACTION: f32 = 0.22;

/// Height offset per rank within a bucket stack.
const RANK_RISE: f32 = 0.18;

/// Depth offset per rank within a bucket stack.
const RANK_DEPTH: f32 = 0.3;

const BASE_OPACITY: f32 = 0.5;
const HOVER_OPACITY: f32 = 0.85;

/// Bucket slot for one artifact. Precedence: explicit category, then
/// title keywords, then `rank % BUCKET_COUNT`.
#[must_use]
pub fn bucket_for(title: &str, category_slot: Option<usize>, rank: usize) -> usize {
    if let Some(slot) = category_slot {
        return slot % BUCKET_COUNT;
    }
    let lower = title.to_lowercase();
    for (keyword, slot) in KEYWORDS {
        if lower.contains(keyword) {
            return *slot;
        }
    }
    rank % BUCKET_COUNT
}

pub(crate) fn pose(ctx: &PlacementContext) -> Pose {
    let bucket = bucket_for(ctx.title, ctx.category_slot, ctx.inactive_rank);
    let grid = ctx.grid;
    let stage = ctx.stage;

    // Slot angles spread symmetrically across the arc.
    let step = ARC_SPAN / (BUCKET_COUNT - 1) as f32;
    let theta = -ARC_SPAN / 2.0 + bucket as f32 * step;
    let rank = ctx.inactive_rank as f32;

    let x = grid.cx + ARC_RADIUS * theta.sin();
    let y = grid.cy + rank * RANK_RISE;
    let z = -(ARC_SETBACK + ARC_RADIUS * (1.0 - theta.cos())) - rank * RANK_DEPTH;

    Pose::new(
        Vec3::new(x, y, z),
        -theta,
        Vec3::new(stage.width * CARD_FRACTION, stage.height * CARD_FRACTION, 1.0),
        if ctx.hovered { HOVER_OPACITY } else { BASE_OPACITY },
    )
}
