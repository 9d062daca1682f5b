#![forbid(unsafe_code)]

//! GridStage runtime: the single-owner workspace loop, the grid
//! surface interaction machine, frame composition, and panic
//! containment.
//!
//! The split mirrors the rest of the workspace: `gridstage-core` holds
//! geometry, poses, and configuration; `gridstage-scene` holds the
//! artifact lifecycle; `gridstage-layout` computes regions and target
//! poses; `gridstage-render` defines the declarative scene. This crate
//! wires them into a frame loop:
//!
//! 1. [`Workspace::tick`] advances lifecycle timers, repartitions the
//!    viewport, retargets every pose, and converges the animation
//!    arena one step.
//! 2. [`compose`] reads the workspace into a `Vec<SceneNode>`.
//! 3. [`guarded_compose`] wraps step 2 in panic containment for host
//!    loops that must not die with a bad frame.
//!
//! # Invariants
//! - All mutation flows through `Workspace`; composition is a pure
//!   read and interaction handlers are synchronous mutations observed
//!   on the next tick.

pub mod compose;
pub mod containment;
pub mod surface;
pub mod workspace;

pub use compose::compose;
pub use containment::guarded_compose;
pub use surface::{GridSurface, MENU_ENTRIES, MenuEntry};
pub use workspace::{FrameClock, Workspace};
