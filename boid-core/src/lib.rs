#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod behavior;
mod boid;
mod config;
mod flock;
mod render;

pub use boid::{Boid, Color, Steering};
pub use config::{BoidConfig, Bounds, ConfigError};
pub use flock::Flock;
#[cfg(feature = "std")]
pub use flock::{FlockSim, Playback};
pub use render::{RenderSnapshot, SHADOW_OFFSET};

/// Float helpers that pick `std` or `libm` depending on the build.
pub(crate) mod math {
    pub fn sqrt(v: f32) -> f32 {
        #[cfg(feature = "std")]
        {
            v.sqrt()
        }
        #[cfg(not(feature = "std"))]
        {
            libm::sqrtf(v)
        }
    }

    pub fn atan2(y: f32, x: f32) -> f32 {
        #[cfg(feature = "std")]
        {
            y.atan2(x)
        }
        #[cfg(not(feature = "std"))]
        {
            libm::atan2f(y, x)
        }
    }

    pub fn sin_cos(angle: f32) -> (f32, f32) {
        #[cfg(feature = "std")]
        {
            angle.sin_cos()
        }
        #[cfg(not(feature = "std"))]
        {
            (libm::sinf(angle), libm::cosf(angle))
        }
    }
}

/// A 2D vector used for position, velocity and steering forces
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn magnitude(&self) -> f32 {
        math::sqrt(self.x * self.x + self.y * self.y)
    }

    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            Self {
                x: self.x / mag,
                y: self.y / mag,
            }
        } else {
            Self::zero()
        }
    }

    /// Clamps each axis independently to `[-limit, limit]`.
    ///
    /// This is not a radial clamp: a diagonal vector may end up with a
    /// magnitude of up to `limit * sqrt(2)`. A negative or NaN limit acts
    /// as zero.
    pub fn clamp_axes(&self, limit: f32) -> Self {
        let limit = limit.max(0.0);
        Self {
            x: self.x.clamp(-limit, limit),
            y: self.y.clamp(-limit, limit),
        }
    }

    pub fn distance(&self, other: &Vector2D) -> f32 {
        (*self - *other).magnitude()
    }

    /// Angle of the vector in radians, measured from the +x axis.
    pub fn heading(&self) -> f32 {
        math::atan2(self.y, self.x)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl core::ops::Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl core::ops::Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl core::ops::Mul<f32> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl core::ops::Div<f32> for Vector2D {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl core::ops::AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector2d_magnitude() {
        let v = Vector2D::new(3.0, 4.0);
        assert_eq!(v.magnitude(), 5.0);
    }

    #[test]
    fn test_vector2d_normalize() {
        let v = Vector2D::new(3.0, 4.0);
        let normalized = v.normalize();
        assert!((normalized.magnitude() - 1.0).abs() < 0.0001);
        assert_eq!(Vector2D::zero().normalize(), Vector2D::zero());
    }

    #[test]
    fn test_vector2d_operations() {
        let v1 = Vector2D::new(1.0, 2.0);
        let v2 = Vector2D::new(3.0, 4.0);

        let sum = v1 + v2;
        assert_eq!(sum, Vector2D::new(4.0, 6.0));

        let diff = v2 - v1;
        assert_eq!(diff, Vector2D::new(2.0, 2.0));

        let scaled = v1 * 2.0;
        assert_eq!(scaled, Vector2D::new(2.0, 4.0));

        let halved = v2 / 2.0;
        assert_eq!(halved, Vector2D::new(1.5, 2.0));
    }

    #[test]
    fn test_clamp_axes_is_per_axis() {
        let v = Vector2D::new(3.0, -0.5).clamp_axes(1.0);
        assert_eq!(v, Vector2D::new(1.0, -0.5));

        // Diagonals keep both components at the limit
        let diag = Vector2D::new(10.0, 10.0).clamp_axes(1.0);
        assert_eq!(diag, Vector2D::new(1.0, 1.0));
        assert!(diag.magnitude() > 1.0);
    }

    #[test]
    fn test_clamp_axes_bad_limit_is_zero() {
        let v = Vector2D::new(3.0, -2.0);
        assert_eq!(v.clamp_axes(-1.0), Vector2D::zero());
        assert_eq!(v.clamp_axes(f32::NAN), Vector2D::zero());
    }

    #[test]
    fn test_heading() {
        assert_eq!(Vector2D::new(1.0, 0.0).heading(), 0.0);
        let up = Vector2D::new(0.0, 1.0).heading();
        assert!((up - core::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_is_finite() {
        assert!(Vector2D::new(1.0, 2.0).is_finite());
        assert!(!Vector2D::new(f32::NAN, 2.0).is_finite());
        assert!(!Vector2D::new(1.0, f32::INFINITY).is_finite());
    }
}
