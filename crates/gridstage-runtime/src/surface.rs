#![forbid(unsafe_code)]

//! Grid surface interaction.
//!
//! The data grid is an interactive panel with three pointer-driven
//! mechanisms layered on one ray-plane projection helper: freeform
//! drag, discrete resize (row/column counts), and clip (a mask
//! rectangle over the generated cells). Resize and clip are mutually
//! exclusive, selected by [`GridEditMode`].
//!
//! # Invariants
//!
//! 1. Row and column counts never drop below 1; the clip rectangle
//!    never shrinks below one cell. Degenerate deltas clamp, they
//!    never error.
//! 2. [`visible_cells`] always yields at least the header cell.
//! 3. The drag offset is retained on pointer-up until the next drag.
//! 4. Resize and clip compensate the base offset by exactly half the
//!    size delta per axis, holding the opposite top-left corner.
//!
//! [`visible_cells`]: GridSurface::visible_cells

use tracing::debug;

use gridstage_core::config::GridEditMode;
use gridstage_core::geometry::{Plane, Ray, Vec3};
use gridstage_scene::backend::RunRequest;

/// Initial logical grid dimensions.
pub const DEFAULT_ROWS: usize = 8;
pub const DEFAULT_COLS: usize = 5;

/// Cell dimensions in world units.
pub const CELL_WIDTH: f32 = 0.8;
pub const CELL_HEIGHT: f32 = 0.5;

/// Entries offered by the context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: &'static str,
    pub algorithm: &'static str,
}

/// The analyses the context menu can start.
pub const MENU_ENTRIES: &[MenuEntry] = &[
    MenuEntry {
        label: "Trend analysis",
        algorithm: "trend",
    },
    MenuEntry {
        label: "Distribution",
        algorithm: "distribution",
    },
    MenuEntry {
        label: "Correlation",
        algorithm: "correlation",
    },
    MenuEntry {
        label: "Composition",
        algorithm: "composition",
    },
];

/// Which mechanism a pointer-down engaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// Freeform move from the handle strip.
    Move,
    /// Size handle: resize or clip per the edit mode.
    Size,
}

/// An open context menu, anchored at a captured world point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextMenu {
    pub anchor: Vec3,
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    plane: Plane,
    start: Vec3,
    kind: DragKind,
    offset0: Vec3,
    rows0: usize,
    cols0: usize,
    clip0: (f32, f32),
}

/// Interactive state of the data grid panel.
#[derive(Debug)]
pub struct GridSurface {
    rows: usize,
    cols: usize,
    cell_width: f32,
    cell_height: f32,
    /// Layout-assigned position; follows the grid region.
    base: Vec3,
    /// User drag offset, additive to `base`, retained across drags.
    offset: Vec3,
    clip_width: f32,
    clip_height: f32,
    edit_mode: GridEditMode,
    processing: bool,
    drag: Option<DragState>,
    menu: Option<ContextMenu>,
}

impl GridSurface {
    #[must_use]
    pub fn new() -> Self {
        let rows = DEFAULT_ROWS;
        let cols = DEFAULT_COLS;
        Self {
            rows,
            cols,
            cell_width: CELL_WIDTH,
            cell_height: CELL_HEIGHT,
            base: Vec3::ZERO,
            offset: Vec3::ZERO,
            clip_width: cols as f32 * CELL_WIDTH,
            clip_height: rows as f32 * CELL_HEIGHT,
            edit_mode: GridEditMode::Resize,
            processing: false,
            drag: None,
            menu: None,
        }
    }

    /// Current world position: layout base plus retained drag offset.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.base + self.offset
    }

    pub fn set_base(&mut self, base: Vec3) {
        self.base = base;
    }

    pub fn set_edit_mode(&mut self, mode: GridEditMode) {
        self.edit_mode = mode;
    }

    #[must_use]
    pub fn edit_mode(&self) -> GridEditMode {
        self.edit_mode
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total content width at the current column count.
    #[must_use]
    pub fn extent_width(&self) -> f32 {
        self.cols as f32 * self.cell_width
    }

    /// Total content height at the current row count.
    #[must_use]
    pub fn extent_height(&self) -> f32 {
        self.rows as f32 * self.cell_height
    }

    #[must_use]
    pub fn clip(&self) -> (f32, f32) {
        (self.clip_width, self.clip_height)
    }

    #[must_use]
    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    /// Whether a run is in flight; asserted by the workspace for the
    /// whole duration of any creation and gates new submissions.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn set_processing(&mut self, processing: bool) {
        self.processing = processing;
    }

    /// Pointer-down: anchor a horizontal drag plane at the surface's
    /// current height and remember the projected start point.
    ///
    /// Returns false when the pointer ray misses the plane; no drag
    /// starts.
    pub fn begin_drag(&mut self, ray: &Ray, kind: DragKind) -> bool {
        let plane = Plane::horizontal(self.position().y);
        let Some(start) = plane.project(ray) else {
            return false;
        };
        self.drag = Some(DragState {
            plane,
            start,
            kind,
            offset0: self.offset,
            rows0: self.rows,
            cols0: self.cols,
            clip0: (self.clip_width, self.clip_height),
        });
        true
    }

    /// Pointer-move during a drag. Projects onto the plane anchored at
    /// drag start and applies the delta per the drag kind. Misses keep
    /// the previous state.
    pub fn drag_to(&mut self, ray: &Ray) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        let Some(point) = drag.plane.project(ray) else {
            return false;
        };
        let delta = point - drag.start;
        match drag.kind {
            DragKind::Move => {
                self.offset = drag.offset0 + Vec3::new(delta.x, 0.0, delta.z);
            }
            DragKind::Size => match self.edit_mode {
                GridEditMode::Resize => self.apply_resize(&drag, delta),
                GridEditMode::Clip => self.apply_clip(&drag, delta),
            },
        }
        true
    }

    /// Pointer-up: the offset (and any size change) is retained.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Resize: quantize the plane delta to whole cells and adjust the
    /// logical counts, keeping the opposite top-left corner anchored
    /// by shifting the offset half the size delta per axis.
    fn apply_resize(&mut self, drag: &DragState, delta: Vec3) {
        let dcols = (delta.x / self.cell_width).round() as i64;
        let drows = (delta.z / self.cell_height).round() as i64;
        let cols = (drag.cols0 as i64 + dcols).max(1) as usize;
        let rows = (drag.rows0 as i64 + drows).max(1) as usize;

        let dw = (cols as f32 - drag.cols0 as f32) * self.cell_width;
        let dh = (rows as f32 - drag.rows0 as f32) * self.cell_height;
        self.cols = cols;
        self.rows = rows;
        self.offset.x = drag.offset0.x + dw / 2.0;
        self.offset.y = drag.offset0.y - dh / 2.0;
        // The mask follows the full extent while resizing.
        self.clip_width = self.extent_width();
        self.clip_height = self.extent_height();
    }

    /// Clip: counts stay fixed; the mask rectangle grows or shrinks
    /// with the delta, clamped to [one cell, full extent], with the
    /// same half-delta anchor compensation.
    fn apply_clip(&mut self, drag: &DragState, delta: Vec3) {
        let clip_w = (drag.clip0.0 + delta.x).clamp(self.cell_width, self.extent_width());
        let clip_h = (drag.clip0.1 + delta.z).clamp(self.cell_height, self.extent_height());
        self.offset.x = drag.offset0.x + (clip_w - drag.clip0.0) / 2.0;
        self.offset.y = drag.offset0.y - (clip_h - drag.clip0.1) / 2.0;
        self.clip_width = clip_w;
        self.clip_height = clip_h;
    }

    /// Column count inside the clip rectangle; at least the header.
    #[must_use]
    pub fn visible_cols(&self) -> usize {
        ((self.clip_width / self.cell_width).floor() as usize).clamp(1, self.cols)
    }

    /// Row count inside the clip rectangle; at least the header.
    #[must_use]
    pub fn visible_rows(&self) -> usize {
        ((self.clip_height / self.cell_height).floor() as usize).clamp(1, self.rows)
    }

    /// `(row, col)` pairs of the cells actually rendered: cells whose
    /// bounds fall outside the clip rectangle are dropped, but the
    /// header row and column survive any clip.
    pub fn visible_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let rows = self.visible_rows();
        let cols = self.visible_cols();
        (0..rows).flat_map(move |r| (0..cols).map(move |c| (r, c)))
    }

    /// World-space center of a cell, measured from the surface's
    /// top-left corner.
    #[must_use]
    pub fn cell_center(&self, row: usize, col: usize) -> Vec3 {
        let origin = self.position();
        let left = origin.x - self.extent_width() / 2.0;
        let top = origin.y + self.extent_height() / 2.0;
        Vec3::new(
            left + (col as f32 + 0.5) * self.cell_width,
            top - (row as f32 + 0.5) * self.cell_height,
            origin.z,
        )
    }

    /// Capture the pointer's world intersection and open the menu
    /// there. The caller gates this on the interaction mode.
    pub fn open_menu(&mut self, ray: &Ray) -> bool {
        let plane = Plane::horizontal(self.position().y);
        let Some(anchor) = plane.project(ray) else {
            return false;
        };
        debug!(?anchor, "context menu opened");
        self.menu = Some(ContextMenu { anchor });
        true
    }

    #[must_use]
    pub fn menu(&self) -> Option<&ContextMenu> {
        self.menu.as_ref()
    }

    pub fn close_menu(&mut self) {
        self.menu = None;
    }

    /// Select a menu entry: closes the menu and returns the run
    /// request it names. Out-of-range indices just close the menu.
    pub fn select_menu(&mut self, index: usize) -> Option<RunRequest> {
        if self.menu.take().is_none() {
            return None;
        }
        let entry = MENU_ENTRIES.get(index)?;
        Some(RunRequest::new(entry.algorithm))
    }
}

impl Default for GridSurface {
    fn default() -> Self {
        Self::new()
    }
}
