#![forbid(unsafe_code)]

//! Viewport partitioning.
//!
//! Converts pixel-space viewport dimensions into a partitioned 3D
//! coordinate allocation: one [`LayoutBox`] for the data grid and one
//! for the active artifact's stage, side by side with equal
//! dimensions, with the reserved side panel deducted from the
//! horizontal budget.
//!
//! # Invariants
//!
//! 1. [`partition`] is pure: identical inputs yield identical boxes.
//! 2. `grid.width == stage.width` and `grid.height == stage.height`.
//! 3. The boxes never overlap and never cross the reserved-panel
//!    boundary.
//! 4. Box height is at least [`MIN_REGION_HEIGHT`] even under
//!    degenerate viewports, by clamping.
//!
//! # Failure Modes
//!
//! - Zero pixel width: the pixel→world ratio substitutes 1 pixel.
//! - A side panel wider than the viewport: the usable budget clamps to
//!   a small positive span; boxes shrink but stay well-formed.

use gridstage_core::geometry::LayoutBox;

/// Gap between the grid and stage boxes, world units.
pub const REGION_MARGIN: f32 = 0.6;

/// Inset from the outer horizontal edges of the usable budget.
pub const SIDE_INSET: f32 = 0.4;

/// Fraction of viewport height reserved above the boxes.
pub const TOP_FRACTION: f32 = 0.12;

/// Inset of the bottom bound from the viewport's lower edge.
pub const BOTTOM_INSET: f32 = 0.8;

/// World-space floor the bottom bound never crosses.
pub const FLOOR_Y: f32 = -7.0;

/// Minimum box height under degenerate viewports.
pub const MIN_REGION_HEIGHT: f32 = 2.0;

/// Minimum usable horizontal span after the panel deduction.
const MIN_USABLE_WIDTH: f32 = 2.0 * (1.0 + SIDE_INSET) + REGION_MARGIN;

/// Inputs the partition depends on. Compared wholesale for
/// memoization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportInput {
    /// Visible world width at the layout plane.
    pub world_width: f32,
    /// Visible world height at the layout plane.
    pub world_height: f32,
    /// Viewport width in pixels; implies the pixel→world ratio.
    pub pixel_width: f32,
    /// Reserved side-panel width in pixels.
    pub panel_pixels: f32,
}

/// The two allocations, replaced wholesale on every recompute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Regions {
    pub grid: LayoutBox,
    pub stage: LayoutBox,
}

/// Partition the viewport into grid and stage boxes. Pure.
#[must_use]
pub fn partition(input: ViewportInput) -> Regions {
    let world_per_pixel = input.world_width / input.pixel_width.max(1.0);
    let panel_world = (input.panel_pixels * world_per_pixel).max(0.0);

    // Horizontal budget left of the reserved panel (panel sits on the
    // right edge), centered on the remaining span.
    let usable = (input.world_width - panel_world).max(MIN_USABLE_WIDTH);
    let center_x = -panel_world / 2.0;
    let width = ((usable - REGION_MARGIN) / 2.0 - SIDE_INSET).max(1.0);

    let top = input.world_height / 2.0 - TOP_FRACTION * input.world_height;
    let bottom = (-input.world_height / 2.0 + BOTTOM_INSET).max(FLOOR_Y);
    let height = (top - bottom).max(MIN_REGION_HEIGHT);
    let cy = top - height / 2.0;

    let offset = (width + REGION_MARGIN) / 2.0;
    Regions {
        grid: LayoutBox::new(center_x - offset, cy, width, height),
        stage: LayoutBox::new(center_x + offset, cy, width, height),
    }
}

/// Memoizing wrapper: recomputes only when the input tuple changes.
/// No caching beyond the last input.
#[derive(Debug, Default)]
pub struct Partitioner {
    memo: Option<(ViewportInput, Regions)>,
}

impl Partitioner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Regions for `input`, reusing the memoized result when inputs
    /// are identical.
    pub fn regions(&mut self, input: ViewportInput) -> Regions {
        match &self.memo {
            Some((memoized, regions)) if *memoized == input => *regions,
            _ => {
                let regions = partition(input);
                self.memo = Some((input, regions));
                regions
            }
        }
    }
}
