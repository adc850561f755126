use crate::{math, Color, Vector2D};

/// Offset of the drop shadow drawn under each boid
pub const SHADOW_OFFSET: Vector2D = Vector2D { x: 0.0, y: 5.0 };

// Triangle outline in boid-local coordinates: +x is forward, +y is left.
const NOSE: (f32, f32) = (20.0, 0.0);
const LEFT_WING: (f32, f32) = (-7.0, 10.0);
const RIGHT_WING: (f32, f32) = (-7.0, -10.0);

/// Read-only view of a boid handed to a renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSnapshot {
    pub position: Vector2D,
    /// Heading in radians, `atan2(velocity.y, velocity.x)`.
    pub orientation: f32,
    pub color: Color,
}

impl RenderSnapshot {
    /// Corners of the boid's triangle, nose first, pointing along `orientation`.
    pub fn triangle(&self) -> [Vector2D; 3] {
        let (sin, cos) = math::sin_cos(self.orientation);
        let forward = Vector2D::new(cos, sin);
        let side = Vector2D::new(-sin, cos);
        [NOSE, LEFT_WING, RIGHT_WING]
            .map(|(f, s)| self.position + forward * f + side * s)
    }

    /// The triangle shifted by [`SHADOW_OFFSET`].
    pub fn shadow(&self) -> [Vector2D; 3] {
        self.triangle().map(|corner| corner + SHADOW_OFFSET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vector2D, b: Vector2D) {
        assert!(
            (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_triangle_points_along_heading() {
        let snapshot = RenderSnapshot {
            position: Vector2D::new(50.0, 50.0),
            orientation: 0.0,
            color: Color::ROYAL_BLUE,
        };
        let [nose, left, right] = snapshot.triangle();

        assert_close(nose, Vector2D::new(70.0, 50.0));
        assert_close(left, Vector2D::new(43.0, 60.0));
        assert_close(right, Vector2D::new(43.0, 40.0));
    }

    #[test]
    fn test_triangle_rotates() {
        let snapshot = RenderSnapshot {
            position: Vector2D::zero(),
            orientation: core::f32::consts::FRAC_PI_2,
            color: Color::ROYAL_BLUE,
        };
        let [nose, _, _] = snapshot.triangle();
        assert_close(nose, Vector2D::new(0.0, 20.0));
    }

    #[test]
    fn test_shadow_is_offset_copy() {
        let snapshot = RenderSnapshot {
            position: Vector2D::new(10.0, 10.0),
            orientation: 1.0,
            color: Color::ROYAL_BLUE,
        };
        for (corner, shadow) in snapshot.triangle().iter().zip(snapshot.shadow().iter()) {
            assert_close(*shadow, *corner + SHADOW_OFFSET);
        }
    }
}
