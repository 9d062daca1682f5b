#![forbid(unsafe_code)]

//! Frame composition: workspace state in, declarative scene out.
//!
//! `compose` is a pure read of the workspace. It never mutates state
//! and never talks to a renderer directly; callers hand the returned
//! nodes to whatever [`gridstage_render::Renderer`] they run.
//!
//! # Invariants
//! - Every artifact with a pose in the arena yields exactly one panel
//!   box; pending artifacts add a progress bar, complete active ones
//!   add their visible plots.
//! - The header row and column of the grid surface are always present
//!   in the output, whatever the clip rectangle says.

use gridstage_core::geometry::Vec3;
use gridstage_core::pose::Pose;
use gridstage_render::{Primitive, SceneNode, Theme};
use gridstage_scene::artifact::{Artifact, PlotKind};
use gridstage_scene::backend::AnalysisBackend;
use gridstage_scene::plot_panel::{PlotPanel, STRIP_SLOT_WIDTH};

use crate::surface::{CELL_HEIGHT, CELL_WIDTH, MENU_ENTRIES};
use crate::workspace::Workspace;

/// Artifact panel face, in local units before pose scaling.
pub const PANEL_WIDTH: f32 = 2.4;
pub const PANEL_HEIGHT: f32 = 1.6;
const PANEL_DEPTH: f32 = 0.06;

const TITLE_SIZE: f32 = 0.16;
const TITLE_RISE: f32 = PANEL_HEIGHT / 2.0 + 0.18;

const PROGRESS_WIDTH: f32 = PANEL_WIDTH * 0.8;
const PROGRESS_HEIGHT: f32 = 0.1;

const MENU_ENTRY_HEIGHT: f32 = 0.3;
const MENU_WIDTH: f32 = 2.0;

const PLOT_SLOT_HEIGHT: f32 = 1.0;
const BAR_GAP: f32 = 0.04;

/// Build one frame's scene from the workspace.
#[must_use]
pub fn compose<B: AnalysisBackend>(ws: &Workspace<B>, theme: &Theme) -> Vec<SceneNode> {
    let mut nodes = Vec::new();
    compose_grid(ws, theme, &mut nodes);
    compose_menu(ws, theme, &mut nodes);
    for artifact in ws.artifacts() {
        let Some(pose) = ws.pose(artifact.id) else {
            continue;
        };
        compose_artifact(ws, artifact, pose, theme, &mut nodes);
    }
    nodes
}

fn compose_grid<B: AnalysisBackend>(ws: &Workspace<B>, theme: &Theme, out: &mut Vec<SceneNode>) {
    let surface = ws.surface();
    for (row, col) in surface.visible_cells() {
        let color = if row == 0 || col == 0 {
            theme.grid_header
        } else {
            theme.grid_cell
        };
        out.push(SceneNode {
            primitive: Primitive::Box {
                width: CELL_WIDTH * 0.95,
                height: CELL_HEIGHT * 0.9,
                depth: 0.02,
            },
            pose: Pose::new(surface.cell_center(row, col), 0.0, Vec3::splat(1.0), 1.0),
            color,
        });
    }
}

fn compose_menu<B: AnalysisBackend>(ws: &Workspace<B>, theme: &Theme, out: &mut Vec<SceneNode>) {
    let Some(menu) = ws.surface().menu() else {
        return;
    };
    let entries = MENU_ENTRIES.len() as f32;
    out.push(SceneNode {
        primitive: Primitive::Box {
            width: MENU_WIDTH,
            height: entries * MENU_ENTRY_HEIGHT,
            depth: 0.02,
        },
        pose: Pose::new(menu.anchor, 0.0, Vec3::splat(1.0), 0.95),
        color: theme.menu,
    });
    for (index, entry) in MENU_ENTRIES.iter().enumerate() {
        let y = (entries - 1.0) / 2.0 * MENU_ENTRY_HEIGHT - index as f32 * MENU_ENTRY_HEIGHT;
        out.push(SceneNode {
            primitive: Primitive::Text {
                content: entry.label.to_owned(),
                size: 0.14,
            },
            pose: Pose::new(menu.anchor + Vec3::new(0.0, y, 0.01), 0.0, Vec3::splat(1.0), 1.0),
            color: theme.text,
        });
    }
}

fn compose_artifact<B: AnalysisBackend>(
    ws: &Workspace<B>,
    artifact: &Artifact,
    pose: Pose,
    theme: &Theme,
    out: &mut Vec<SceneNode>,
) {
    let is_active = ws.active() == Some(artifact.id);
    let color = if artifact.status.is_pending() {
        theme.panel_pending
    } else if is_active {
        theme.panel_active
    } else {
        theme.panel
    };
    out.push(SceneNode {
        primitive: Primitive::Box {
            width: PANEL_WIDTH,
            height: PANEL_HEIGHT,
            depth: PANEL_DEPTH,
        },
        pose,
        color,
    });
    out.push(SceneNode {
        primitive: Primitive::Text {
            content: artifact.title.clone(),
            size: TITLE_SIZE,
        },
        pose: offset(pose, Vec3::new(0.0, TITLE_RISE, 0.02)),
        color: theme.text,
    });

    if artifact.status.is_pending() {
        compose_progress(artifact, pose, theme, out);
        return;
    }
    if is_active {
        if let Some(panel) = ws.panel(artifact.id) {
            compose_plots(artifact, panel, pose, theme, out);
        }
    }
}

fn compose_progress(artifact: &Artifact, pose: Pose, theme: &Theme, out: &mut Vec<SceneNode>) {
    let progress = artifact.progress().clamp(0.0, 1.0);
    let width = PROGRESS_WIDTH * progress;
    // Left-anchored fill: the bar grows rightward as progress rises.
    let x = -(PROGRESS_WIDTH - width) / 2.0;
    out.push(SceneNode {
        primitive: Primitive::Box {
            width: width.max(f32::EPSILON),
            height: PROGRESS_HEIGHT,
            depth: 0.02,
        },
        pose: offset(pose, Vec3::new(x, 0.0, 0.04)),
        color: theme.progress,
    });
}

fn compose_plots(
    artifact: &Artifact,
    panel: &PlotPanel,
    pose: Pose,
    theme: &Theme,
    out: &mut Vec<SceneNode>,
) {
    let total = artifact.plots.len();
    let range = panel.visible_range(total, PANEL_WIDTH);
    let shown = range.len().max(1) as f32;
    for (slot, index) in range.clone().enumerate() {
        let plot = &artifact.plots[index];
        // Slots spread evenly across the panel face.
        let slot_width = (PANEL_WIDTH / shown).min(STRIP_SLOT_WIDTH);
        let x = (slot as f32 + 0.5) / shown * PANEL_WIDTH - PANEL_WIDTH / 2.0;
        let base = offset(pose, Vec3::new(x, -PANEL_HEIGHT * 0.1, 0.04));
        match plot.kind {
            PlotKind::Bar => compose_bars(plot.max_sample(), &plot.samples, slot_width, base, theme, out),
            PlotKind::Scatter => compose_scatter(plot.max_sample(), &plot.samples, slot_width, base, theme, out),
        }
        let highlight = range.start + slot == panel.focused();
        out.push(SceneNode {
            primitive: Primitive::Text {
                content: plot.title.clone(),
                size: 0.1,
            },
            pose: offset(base, Vec3::new(0.0, PLOT_SLOT_HEIGHT / 2.0 + 0.08, 0.0)),
            color: if highlight { theme.accent } else { theme.text },
        });
    }
}

fn compose_bars(
    max: f32,
    samples: &[f32],
    slot_width: f32,
    base: Pose,
    theme: &Theme,
    out: &mut Vec<SceneNode>,
) {
    if samples.is_empty() {
        return;
    }
    let count = samples.len() as f32;
    let bar_width = (slot_width / count - BAR_GAP).max(0.01);
    for (i, sample) in samples.iter().enumerate() {
        let height = (sample / max).clamp(0.0, 1.0) * PLOT_SLOT_HEIGHT;
        let x = (i as f32 + 0.5) / count * slot_width - slot_width / 2.0;
        // Bars grow up from the slot's baseline.
        let y = height / 2.0 - PLOT_SLOT_HEIGHT / 2.0;
        out.push(SceneNode {
            primitive: Primitive::Box {
                width: bar_width,
                height: height.max(f32::EPSILON),
                depth: 0.02,
            },
            pose: offset(base, Vec3::new(x, y, 0.0)),
            color: theme.accent,
        });
    }
}

fn compose_scatter(
    max: f32,
    samples: &[f32],
    slot_width: f32,
    base: Pose,
    theme: &Theme,
    out: &mut Vec<SceneNode>,
) {
    if samples.is_empty() {
        return;
    }
    let count = samples.len() as f32;
    let positions: Vec<(f32, f32)> = samples
        .iter()
        .enumerate()
        .map(|(i, sample)| {
            let x = (i as f32 + 0.5) / count * slot_width - slot_width / 2.0;
            let y = (sample / max).clamp(0.0, 1.0) * PLOT_SLOT_HEIGHT - PLOT_SLOT_HEIGHT / 2.0;
            (x, y)
        })
        .collect();
    out.push(SceneNode {
        primitive: Primitive::Points {
            positions,
            size: 0.04,
        },
        pose: base,
        color: theme.accent,
    });
}

/// Child pose: local offset applied in the parent's frame, opacity
/// inherited. Yaw is intentionally not compounded; panels face the
/// camera and their children follow the translated origin only.
fn offset(parent: Pose, local: Vec3) -> Pose {
    Pose::new(
        parent.position + Vec3::new(local.x * parent.scale.x, local.y * parent.scale.y, local.z),
        parent.yaw,
        parent.scale,
        parent.opacity,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use gridstage_core::config::{InteractionMode, ProgressMode, WorkspaceConfig};
    use gridstage_core::geometry::Ray;
    use gridstage_layout::partition::ViewportInput;
    use gridstage_scene::backend::RunRequest;
    use gridstage_scene::lifecycle::STREAM_INTERVAL;

    fn workspace() -> Workspace {
        Workspace::with_mock(
            ViewportInput {
                world_width: 20.0,
                world_height: 12.0,
                pixel_width: 1280.0,
                panel_pixels: 240.0,
            },
            WorkspaceConfig::default(),
        )
    }

    fn boxes(nodes: &[SceneNode]) -> usize {
        nodes
            .iter()
            .filter(|n| matches!(n.primitive, Primitive::Box { .. }))
            .count()
    }

    #[test]
    fn empty_workspace_draws_only_the_grid() {
        let mut ws = workspace();
        ws.tick(Duration::from_millis(16));
        let nodes = compose(&ws, &Theme::default());
        let cells = ws.surface().visible_cells().count();
        assert_eq!(nodes.len(), cells);
        assert_eq!(boxes(&nodes), cells);
    }

    #[test]
    fn header_cells_use_the_header_color() {
        let mut ws = workspace();
        ws.tick(Duration::from_millis(16));
        let theme = Theme::default();
        let nodes = compose(&ws, &theme);
        let headers = nodes.iter().filter(|n| n.color == theme.grid_header).count();
        let rows = ws.surface().visible_rows();
        let cols = ws.surface().visible_cols();
        assert_eq!(headers, rows + cols - 1);
    }

    #[test]
    fn active_artifact_renders_panel_title_and_plots() {
        let mut ws = workspace();
        let id = ws.submit_run(RunRequest::new("trend")).unwrap();
        ws.tick(Duration::from_millis(16));
        let theme = Theme::default();
        let nodes = compose(&ws, &theme);
        assert!(nodes.iter().any(|n| n.color == theme.panel_active));
        let title = &ws.artifact(id).unwrap().title;
        assert!(nodes.iter().any(|n| matches!(
            &n.primitive,
            Primitive::Text { content, .. } if content == title
        )));
        // Plots show up as accent nodes.
        assert!(nodes.iter().any(|n| n.color == theme.accent));
    }

    #[test]
    fn pending_artifact_gets_a_progress_bar_and_no_plots() {
        let mut ws = workspace();
        ws.set_progress_mode(ProgressMode::Streaming);
        ws.submit_run(RunRequest::new("trend")).unwrap();
        ws.tick(STREAM_INTERVAL);
        let theme = Theme::default();
        let nodes = compose(&ws, &theme);
        assert!(nodes.iter().any(|n| n.color == theme.progress));
        assert!(nodes.iter().any(|n| n.color == theme.panel_pending));
        assert!(!nodes.iter().any(|n| matches!(n.primitive, Primitive::Points { .. })));
    }

    #[test]
    fn inactive_artifacts_render_without_plots() {
        let mut ws = workspace();
        ws.submit_run(RunRequest::new("trend")).unwrap();
        ws.tick(Duration::from_millis(16));
        ws.submit_run(RunRequest::new("trend")).unwrap();
        ws.tick(Duration::from_millis(16));
        let theme = Theme::default();
        let nodes = compose(&ws, &theme);
        assert_eq!(
            nodes.iter().filter(|n| n.color == theme.panel).count(),
            1,
            "exactly one inactive panel box"
        );
    }

    #[test]
    fn open_menu_adds_backdrop_and_entries() {
        let mut ws = workspace();
        ws.set_interaction(InteractionMode::ContextMenu);
        let surface_y = ws.surface().position().y;
        let ray = Ray::new(
            Vec3::new(0.0, surface_y + 5.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
        );
        assert!(ws.open_context_menu(&ray));
        let theme = Theme::default();
        let nodes = compose(&ws, &theme);
        assert!(nodes.iter().any(|n| n.color == theme.menu));
        let labels = nodes
            .iter()
            .filter(|n| matches!(&n.primitive, Primitive::Text { content, .. }
                if MENU_ENTRIES.iter().any(|e| e.label == content)))
            .count();
        assert_eq!(labels, MENU_ENTRIES.len());
    }

    #[test]
    fn progress_bar_width_tracks_progress() {
        let mut ws = workspace();
        ws.set_progress_mode(ProgressMode::Streaming);
        ws.submit_run(RunRequest::new("trend")).unwrap();
        ws.tick(STREAM_INTERVAL);
        let theme = Theme::default();
        let width_at = |ws: &Workspace| {
            compose(ws, &theme)
                .iter()
                .find_map(|n| match n.primitive {
                    Primitive::Box { width, .. } if n.color == theme.progress => Some(width),
                    _ => None,
                })
                .unwrap()
        };
        let early = width_at(&ws);
        ws.tick(STREAM_INTERVAL);
        ws.tick(STREAM_INTERVAL);
        let later = width_at(&ws);
        assert!(later > early);
    }
}
