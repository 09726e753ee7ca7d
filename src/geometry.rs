//! # Geometry Kernel
//!
//! Pure position math shared by the subdivision schemes: centroids,
//! midpoints and the valence-dependent weight (alpha) functions.

/// Position type used throughout the crate
pub type Point = glam::Vec3;

/// Arithmetic mean of a point set.
///
/// An empty slice yields the zero point; callers are expected never to pass
/// an empty set for a valid mesh, but the fallback keeps partially-built
/// meshes from faulting.
#[inline]
pub fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::ZERO;
    }

    let sum: Point = points.iter().fold(Point::ZERO, |acc, &p| acc + p);
    sum / points.len() as f32
}

/// 50/50 midpoint of an edge's endpoints
#[inline]
pub fn edge_midpoint(p0: Point, p1: Point) -> Point {
    0.5 * p0 + 0.5 * p1
}

/// Loop scheme vertex weight for valence `n`.
///
/// `3/16` exactly for the regular-ish n = 3 case, otherwise
/// `(1/n)(5/8 - (3/8 + 1/4 cos(2pi/n))^2)`.
///
/// Undefined for n = 0 (division by zero); valid input meshes never present
/// an isolated vertex here.
#[inline]
pub fn loop_alpha(n: usize) -> f32 {
    if n == 3 {
        return 3.0 / 16.0;
    }

    let n = n as f32;
    let inner = 3.0 / 8.0 + 0.25 * (std::f32::consts::TAU / n).cos();
    (5.0 / 8.0 - inner * inner) / n
}

/// Kobbelt scheme vertex weight for valence `n`:
/// `(1/9)(4 - 2 cos(2pi/n))`.
///
/// Undefined for n = 0, same precondition as [`loop_alpha`].
#[inline]
pub fn kobbelt_alpha(n: usize) -> f32 {
    let n = n as f32;
    (4.0 - 2.0 * (std::f32::consts::TAU / n).cos()) / 9.0
}
