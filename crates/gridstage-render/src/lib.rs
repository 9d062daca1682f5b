#![forbid(unsafe_code)]

//! Declarative scene primitives and the renderer seam.
//!
//! # Role in GridStage
//! Rendering itself is an external collaborator: any scene-graph
//! library that can draw boxes, text, and point clouds with per-frame
//! transform and opacity mutation satisfies the [`Renderer`] trait.
//! This crate defines the declarative [`SceneNode`] the runtime emits
//! each frame, the theme's named colors (consumed verbatim, no logic),
//! and a recording renderer the tests assert against.

pub mod theme;

pub use theme::{Color, Theme};

use gridstage_core::pose::Pose;

/// What to draw at a pose. The closed set the external renderer must
/// support: boxes, text, and points (for scatter plots).
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// An axis-aligned box; width/height/depth in local units, scaled
    /// by the pose.
    Box { width: f32, height: f32, depth: f32 },
    /// A text label.
    Text { content: String, size: f32 },
    /// A point cloud in local coordinates.
    Points { positions: Vec<(f32, f32)>, size: f32 },
}

/// One drawable: a primitive at a pose with a theme color.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub primitive: Primitive,
    pub pose: Pose,
    pub color: Color,
}

/// The narrow contract an external renderer fulfills. Transparency
/// and per-frame transform mutation are required; everything else is
/// the renderer's business.
pub trait Renderer {
    fn begin_frame(&mut self);
    fn draw(&mut self, node: &SceneNode);
    fn end_frame(&mut self);
}

/// Test renderer that records every frame's nodes.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    frames: Vec<Vec<SceneNode>>,
    current: Vec<SceneNode>,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All completed frames, oldest first.
    #[must_use]
    pub fn frames(&self) -> &[Vec<SceneNode>] {
        &self.frames
    }

    /// The most recently completed frame.
    #[must_use]
    pub fn last_frame(&self) -> Option<&[SceneNode]> {
        self.frames.last().map(Vec::as_slice)
    }
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self) {
        self.current.clear();
    }

    fn draw(&mut self, node: &SceneNode) {
        self.current.push(node.clone());
    }

    fn end_frame(&mut self) {
        self.frames.push(std::mem::take(&mut self.current));
    }
}
