//! Steering rules for a single boid.
//!
//! Every function here is pure: it reads the boid and a snapshot of its
//! neighbors and returns a force already clamped per axis. Nothing in this
//! module touches shared state, so forces for a whole flock can be computed
//! before any boid moves.

use crate::{Boid, Vector2D};

/// Another boid inside the vision radius, together with its distance
#[derive(Debug, Clone, Copy)]
pub struct Neighbor<'a> {
    pub boid: &'a Boid,
    pub distance: f32,
}

/// Boids in `flock` that the boid at `index` can see.
///
/// A boid never sees itself. The radius test is inclusive, so a boid sitting
/// exactly on the edge of the vision circle still counts. An out-of-range
/// index yields no neighbors.
pub fn neighbors<'a>(
    flock: &'a [Boid],
    index: usize,
) -> impl Iterator<Item = Neighbor<'a>> + Clone + 'a {
    let origin = flock.get(index);
    flock
        .iter()
        .enumerate()
        .filter_map(move |(other_index, other)| {
            let boid = origin?;
            if other_index == index {
                return None;
            }
            let distance = boid.position.distance(&other.position);
            (distance <= boid.config.vision_radius).then_some(Neighbor {
                boid: other,
                distance,
            })
        })
}

/// Steer toward the average velocity of the neighbors
pub fn alignment<'a, I>(boid: &Boid, neighbors: I) -> Vector2D
where
    I: IntoIterator<Item = Neighbor<'a>>,
{
    let mut sum = Vector2D::zero();
    let mut count = 0;

    for neighbor in neighbors {
        sum += neighbor.boid.velocity;
        count += 1;
    }

    if count > 0 {
        let steering = sum / count as f32 - boid.velocity;
        steering.clamp_axes(boid.config.max_force)
    } else {
        Vector2D::zero()
    }
}

/// Steer toward the average position of the neighbors
pub fn cohesion<'a, I>(boid: &Boid, neighbors: I) -> Vector2D
where
    I: IntoIterator<Item = Neighbor<'a>>,
{
    let mut sum = Vector2D::zero();
    let mut count = 0;

    for neighbor in neighbors {
        sum += neighbor.boid.position;
        count += 1;
    }

    if count > 0 {
        let steering = sum / count as f32 - boid.position;
        steering.clamp_axes(boid.config.max_force)
    } else {
        Vector2D::zero()
    }
}

/// Steer away from the neighbors.
///
/// Each neighbor contributes the offset from it to `boid` divided by the
/// distance (not the squared distance), which leaves a unit vector pointing
/// away from that neighbor. A neighbor at distance zero has no direction to
/// push along: it adds nothing but still counts toward the average.
pub fn separation<'a, I>(boid: &Boid, neighbors: I) -> Vector2D
where
    I: IntoIterator<Item = Neighbor<'a>>,
{
    let mut steering = Vector2D::zero();
    let mut count = 0;

    for neighbor in neighbors {
        if neighbor.distance > 0.0 {
            let diff = boid.position - neighbor.boid.position;
            steering += diff / neighbor.distance;
        }
        count += 1;
    }

    if count > 0 {
        steering = steering / count as f32;
        steering.clamp_axes(boid.config.max_force)
    } else {
        Vector2D::zero()
    }
}

/// Gentle pull toward an external target such as the pointer.
///
/// A missing target, or one with NaN/infinite coordinates, exerts no force.
pub fn attraction(boid: &Boid, target: Option<Vector2D>) -> Vector2D {
    match target {
        Some(target) if target.is_finite() => {
            (target - boid.position).clamp_axes(boid.config.attraction_force_limit)
        }
        _ => Vector2D::zero(),
    }
}
