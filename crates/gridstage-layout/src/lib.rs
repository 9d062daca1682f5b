#![forbid(unsafe_code)]

//! Spatial layout: viewport partitioning and placement strategies.
//!
//! # Role in GridStage
//! `gridstage-layout` is pure math. It converts viewport dimensions
//! into the two world-space allocations (grid and stage) and maps each
//! artifact's activation state and inactive rank to a target pose
//! under the configured placement strategy.
//!
//! Everything here is deterministic: identical inputs yield
//! bit-identical boxes and poses, which is what makes placement
//! idempotent and the animation layer trivially testable.

pub mod partition;
pub mod placement;

pub use partition::{Partitioner, Regions, ViewportInput, partition};
pub use placement::{PlacementContext, target_pose};
