#![forbid(unsafe_code)]

//! Core: geometry, pose animation, and workspace configuration.
//!
//! # Role in GridStage
//! `gridstage-core` is the foundation layer. It owns the world-space
//! geometry vocabulary (vectors, layout boxes, ray-plane projection),
//! the pose type and its exponential-decay animation arena, and the
//! enumerated configuration switches exposed by the 2D control surface.
//!
//! # Primary responsibilities
//! - **Geometry**: `Vec3`, `LayoutBox`, `Ray`, `Plane` and the single
//!   shared pointer-projection helper used by every grid interaction.
//! - **Pose animation**: `Pose`, the pure `step_toward` decay law, and
//!   `PoseArena` holding a `(current, target)` tween per entity.
//! - **Configuration**: control-surface enums and `WorkspaceConfig`
//!   with serde-backed defaults.
//!
//! # How it fits in the system
//! The layout crate consumes geometry and produces target poses; the
//! runtime feeds those targets into the pose arena every tick. Nothing
//! in this crate knows about artifacts, rendering, or timers.

pub mod config;
pub mod geometry;
pub mod pose;
