#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! World units are abstract: the viewport partitioner decides how many
//! of them the camera can see. Coordinates are right-handed with `y`
//! up and `z` toward the viewer; layout boxes live in the `x`/`y`
//! plane at `z = 0`.

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Tolerance for near-parallel ray-plane tests.
const PARALLEL_EPSILON: f32 = 1e-6;

/// A 3D vector in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const X: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    pub const Y: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    pub const Z: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    /// Create a new vector.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// All three components set to `v`.
    #[inline]
    #[must_use]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Dot product.
    #[inline]
    #[must_use]
    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Euclidean length.
    #[inline]
    #[must_use]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit-length copy. Returns `Vec3::ZERO` for degenerate input
    /// rather than producing NaN components.
    #[must_use]
    pub fn normalized(self) -> Vec3 {
        let len = self.length();
        if len <= PARALLEL_EPSILON {
            Vec3::ZERO
        } else {
            self * (1.0 / len)
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    #[inline]
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

/// A rectangular region of world space allocated to a logical area.
///
/// Boxes are replaced wholesale on recomputation, never mutated in
/// place, so consumers cannot observe a half-updated allocation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutBox {
    /// Center x.
    pub cx: f32,
    /// Center y.
    pub cy: f32,
    /// Full width.
    pub width: f32,
    /// Full height.
    pub height: f32,
}

impl LayoutBox {
    /// Create a new box from its center and dimensions.
    #[inline]
    #[must_use]
    pub const fn new(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self {
            cx,
            cy,
            width,
            height,
        }
    }

    /// Left edge.
    #[inline]
    #[must_use]
    pub fn left(&self) -> f32 {
        self.cx - self.width / 2.0
    }

    /// Right edge.
    #[inline]
    #[must_use]
    pub fn right(&self) -> f32 {
        self.cx + self.width / 2.0
    }

    /// Top edge.
    #[inline]
    #[must_use]
    pub fn top(&self) -> f32 {
        self.cy + self.height / 2.0
    }

    /// Bottom edge.
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.cy - self.height / 2.0
    }

    /// Center as a point at `z = 0`.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Vec3 {
        Vec3::new(self.cx, self.cy, 0.0)
    }

    /// Whether a point lies inside the box (edges inclusive).
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left() && x <= self.right() && y >= self.bottom() && y <= self.top()
    }

    /// Whether two boxes share any interior area.
    #[must_use]
    pub fn overlaps(&self, other: &LayoutBox) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.bottom() < other.top()
            && other.bottom() < self.top()
    }
}

/// A ray in world space, typically a picking ray from the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// Create a ray. The direction is normalized on construction.
    #[must_use]
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalized(),
        }
    }

    /// Point at parameter `t` along the ray.
    #[inline]
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// An infinite plane `dot(normal, p) == offset`.
///
/// This is the one geometry helper shared by the drag, resize, and
/// clip interactions: each anchors a plane at the surface's current
/// position and reads pointer deltas off it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub offset: f32,
}

impl Plane {
    /// Horizontal plane (normal `+y`) passing through height `y`.
    #[inline]
    #[must_use]
    pub const fn horizontal(y: f32) -> Self {
        Self {
            normal: Vec3::Y,
            offset: y,
        }
    }

    /// Camera-facing plane (normal `+z`) passing through depth `z`.
    #[inline]
    #[must_use]
    pub const fn facing(z: f32) -> Self {
        Self {
            normal: Vec3::Z,
            offset: z,
        }
    }

    /// Project a ray onto the plane.
    ///
    /// Returns `None` when the ray runs parallel to the plane or the
    /// intersection lies behind the ray origin; callers treat either
    /// as "pointer missed" and keep the previous state.
    #[must_use]
    pub fn project(&self, ray: &Ray) -> Option<Vec3> {
        let denom = self.normal.dot(ray.dir);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = (self.offset - self.normal.dot(ray.origin)) / denom;
        if t < 0.0 {
            return None;
        }
        Some(ray.at(t))
    }
}
