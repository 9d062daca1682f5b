#![forbid(unsafe_code)]

//! Exponential-decay pose animation.
//!
//! Every animated entity holds a *current* pose and a *target* pose.
//! Each tick, every component converges independently via
//!
//!   current += (target − current) · min(1, rate · dt)
//!
//! with one shared per-second `rate` constant. Larger rates are
//! snappier; the expression is frame-rate independent in the sense
//! that convergence is asymptotic regardless of tick cadence, and the
//! `min(1, …)` clamp keeps a stalled frame (huge dt) from overshooting.
//!
//! # Invariants
//!
//! 1. For `rate·dt ≤ 1` a component never overshoots its target and
//!    its distance to the target is non-increasing.
//! 2. For `rate·dt > 1` the step clamps: the component lands exactly
//!    on the target, never beyond it.
//! 3. `advance` is pure: same `(current, target, dt, rate)` always
//!    yields the same pose.
//! 4. There is no arrival event; consumers treat convergence as
//!    asymptotic and test `|current − target| < ε` after N ticks.
//!
//! # Failure Modes
//!
//! - Negative dt or rate: treated as zero (no motion, no divergence).
//! - Rotation is interpolated linearly per axis, not spherically;
//!   acceptable because only yaw is driven and targets stay within a
//!   single turn.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::hash::Hash;
use std::time::Duration;

use crate::geometry::Vec3;

/// Shared convergence rate, per second. Roughly: the remaining
/// distance shrinks by `1 − 1/e` every `1/rate` seconds.
pub const CONVERGENCE_RATE: f32 = 8.0;

/// Depth offset behind the target at which a freshly spawned entity
/// starts, so new artifacts slide in instead of popping.
const ENTRY_DEPTH: f32 = 1.5;

/// Position, yaw, per-axis scale, and opacity: the animatable state of
/// a visual entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    /// Rotation around the vertical axis, radians.
    pub yaw: f32,
    pub scale: Vec3,
    /// In [0, 1].
    pub opacity: f32,
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        yaw: 0.0,
        scale: Vec3::splat(1.0),
        opacity: 1.0,
    };

    /// Create a pose.
    #[must_use]
    pub const fn new(position: Vec3, yaw: f32, scale: Vec3, opacity: f32) -> Self {
        Self {
            position,
            yaw,
            scale,
            opacity,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One decay step for a single component.
#[inline]
#[must_use]
pub fn step_toward(current: f32, target: f32, dt: f32, rate: f32) -> f32 {
    let blend = (rate * dt).clamp(0.0, 1.0);
    current + (target - current) * blend
}

fn step_vec(current: Vec3, target: Vec3, dt: f32, rate: f32) -> Vec3 {
    Vec3::new(
        step_toward(current.x, target.x, dt, rate),
        step_toward(current.y, target.y, dt, rate),
        step_toward(current.z, target.z, dt, rate),
    )
}

/// Advance `current` one tick toward `target`. Pure; independent of
/// any rendering object identity.
#[must_use]
pub fn advance(current: &Pose, target: &Pose, dt: f32, rate: f32) -> Pose {
    Pose {
        position: step_vec(current.position, target.position, dt, rate),
        yaw: step_toward(current.yaw, target.yaw, dt, rate),
        scale: step_vec(current.scale, target.scale, dt, rate),
        opacity: step_toward(current.opacity, target.opacity, dt, rate),
    }
}

/// Largest absolute per-component distance between two poses.
#[must_use]
pub fn distance(a: &Pose, b: &Pose) -> f32 {
    let d = |x: f32, y: f32| (x - y).abs();
    d(a.position.x, b.position.x)
        .max(d(a.position.y, b.position.y))
        .max(d(a.position.z, b.position.z))
        .max(d(a.yaw, b.yaw))
        .max(d(a.scale.x, b.scale.x))
        .max(d(a.scale.y, b.scale.y))
        .max(d(a.scale.z, b.scale.z))
        .max(d(a.opacity, b.opacity))
}

/// A `(current, target)` pose pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseTween {
    pub current: Pose,
    pub target: Pose,
}

impl PoseTween {
    /// Start at `initial`, converging toward `target`.
    #[must_use]
    pub const fn new(initial: Pose, target: Pose) -> Self {
        Self {
            current: initial,
            target,
        }
    }

    /// Replace the target wholesale.
    pub fn retarget(&mut self, target: Pose) {
        self.target = target;
    }

    /// Advance the current pose one tick.
    pub fn tick(&mut self, dt: Duration, rate: f32) {
        self.current = advance(&self.current, &self.target, dt.as_secs_f32(), rate);
    }

    /// Whether every component is within `epsilon` of the target.
    #[must_use]
    pub fn converged(&self, epsilon: f32) -> bool {
        distance(&self.current, &self.target) < epsilon
    }
}

/// Pose tweens for every visible entity, keyed by the owner's id.
///
/// The arena is independent of rendering object identity: the runtime
/// retargets entries whenever placement recomputes, ticks them once
/// per frame, and retains only the ids still in the collection.
#[derive(Debug, Clone)]
pub struct PoseArena<K> {
    tweens: FxHashMap<K, PoseTween>,
    rate: f32,
}

impl<K: Eq + Hash + Copy> PoseArena<K> {
    /// Create an arena with the shared convergence rate.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rate(CONVERGENCE_RATE)
    }

    /// Create an arena with a custom rate. Negative rates clamp to 0.
    #[must_use]
    pub fn with_rate(rate: f32) -> Self {
        Self {
            tweens: FxHashMap::default(),
            rate: rate.max(0.0),
        }
    }

    /// Set the target pose for `key`, spawning an entry tween if the
    /// key is new. Spawned entries start behind the target with zero
    /// opacity and fade in through normal convergence.
    pub fn retarget(&mut self, key: K, target: Pose) {
        self.tweens
            .entry(key)
            .and_modify(|t| t.retarget(target))
            .or_insert_with(|| {
                let mut entry = target;
                entry.position.z -= ENTRY_DEPTH;
                entry.opacity = 0.0;
                PoseTween::new(entry, target)
            });
    }

    /// Advance every tween one tick.
    pub fn advance_all(&mut self, dt: Duration) {
        for tween in self.tweens.values_mut() {
            tween.tick(dt, self.rate);
        }
    }

    /// Drop tweens whose keys are no longer wanted.
    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) {
        self.tweens.retain(|k, _| keep(k));
    }

    /// Tween for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&PoseTween> {
        self.tweens.get(key)
    }

    /// Current pose for `key`, if present.
    #[must_use]
    pub fn current(&self, key: &K) -> Option<Pose> {
        self.tweens.get(key).map(|t| t.current)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}

impl<K: Eq + Hash + Copy> Default for PoseArena<K> {
    fn default() -> Self {
        Self::new()
    }
}
