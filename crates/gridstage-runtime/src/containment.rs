#![forbid(unsafe_code)]

//! Panic containment around frame composition.
//!
//! A panic while composing one frame must not take the host render
//! loop down with it. `guarded_compose` catches the unwind, logs the
//! payload, and substitutes a small diagnostic scene so the loop keeps
//! presenting frames while the fault is investigated.
//!
//! # Failure Modes
//! - The workspace may be left mid-mutation only if the panic escaped
//!   a `&mut` path; composition is a pure read, so state stays intact.

use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::error;

use gridstage_core::geometry::Vec3;
use gridstage_core::pose::Pose;
use gridstage_render::{Primitive, SceneNode, Theme};
use gridstage_scene::backend::AnalysisBackend;

use crate::compose::compose;
use crate::workspace::Workspace;

/// Compose a frame, falling back to a diagnostic scene on panic.
#[must_use]
pub fn guarded_compose<B: AnalysisBackend>(ws: &Workspace<B>, theme: &Theme) -> Vec<SceneNode> {
    match catch_unwind(AssertUnwindSafe(|| compose(ws, theme))) {
        Ok(nodes) => nodes,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!(%message, "composition panicked; rendering diagnostic scene");
            diagnostic_scene(&message, theme)
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}

fn diagnostic_scene(message: &str, theme: &Theme) -> Vec<SceneNode> {
    let center = Pose::new(Vec3::ZERO, 0.0, Vec3::splat(1.0), 1.0);
    vec![
        SceneNode {
            primitive: Primitive::Box {
                width: 6.0,
                height: 1.2,
                depth: 0.02,
            },
            pose: center,
            color: theme.panel_pending,
        },
        SceneNode {
            primitive: Primitive::Text {
                content: format!("composition error: {message}"),
                size: 0.18,
            },
            pose: Pose::new(Vec3::new(0.0, 0.0, 0.02), 0.0, Vec3::splat(1.0), 1.0),
            color: theme.text,
        },
    ]
}
