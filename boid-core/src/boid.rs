#[cfg(feature = "std")]
use rand::Rng;

use crate::behavior::{self, Neighbor};
use crate::{BoidConfig, Bounds, ConfigError, RenderSnapshot, Vector2D};

/// Display color of a boid. Has no effect on the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const ROYAL_BLUE: Color = Color::new(65, 105, 225);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Full red with green and blue each picked from the lower half of the
    /// range, giving the warm reds and oranges of the default flock.
    #[cfg(feature = "std")]
    pub fn random_warm<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(255, rng.gen_range(0..=127), rng.gen_range(0..=127))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::ROYAL_BLUE
    }
}

/// The four steering forces acting on a boid during one tick, before weighting
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Steering {
    pub alignment: Vector2D,
    pub cohesion: Vector2D,
    pub separation: Vector2D,
    pub attraction: Vector2D,
}

impl Steering {
    /// Weighted sum of the forces. Attraction is never weighted.
    pub fn combined(&self, config: &BoidConfig) -> Vector2D {
        self.alignment * config.alignment_weight
            + self.cohesion * config.cohesion_weight
            + self.separation * config.separation_weight
            + self.attraction
    }
}

/// A single boid entity
#[derive(Debug, Clone, PartialEq)]
pub struct Boid {
    pub position: Vector2D,
    pub velocity: Vector2D,
    /// Force accumulator, zero outside of a tick.
    pub acceleration: Vector2D,
    pub config: BoidConfig,
    pub color: Color,
}

impl Boid {
    pub fn new(position: Vector2D, velocity: Vector2D, config: BoidConfig) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vector2D::zero(),
            config,
            color: Color::default(),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// A boid placed uniformly inside `bounds` with each velocity axis in `[-1, 1)`.
    #[cfg(feature = "std")]
    pub fn random<R: Rng + ?Sized>(bounds: Bounds, config: BoidConfig, rng: &mut R) -> Self {
        let position = Vector2D::new(
            rng.gen_range(0.0..bounds.width),
            rng.gen_range(0.0..bounds.height),
        );
        let velocity = Vector2D::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
        Self::new(position, velocity, config)
    }

    /// Checks the tunables and that the kinematic state is finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate()?;
        if !(self.position.is_finite() && self.velocity.is_finite()) {
            return Err(ConfigError::NonFiniteState);
        }
        Ok(())
    }

    /// Computes all four steering forces from a snapshot of the neighbors.
    pub fn steering<'a, I>(&self, neighbors: I, target: Option<Vector2D>) -> Steering
    where
        I: Iterator<Item = Neighbor<'a>> + Clone,
    {
        Steering {
            alignment: behavior::alignment(self, neighbors.clone()),
            cohesion: behavior::cohesion(self, neighbors.clone()),
            separation: behavior::separation(self, neighbors),
            attraction: behavior::attraction(self, target),
        }
    }

    pub fn apply_force(&mut self, force: Vector2D) {
        self.acceleration += force;
    }

    /// Advances one tick: moves by the current velocity, then folds the
    /// accumulated acceleration into the velocity and clamps it per axis.
    pub fn update(&mut self) {
        self.position += self.velocity;
        self.velocity += self.acceleration;
        self.velocity = self.velocity.clamp_axes(self.config.max_speed);
        self.acceleration = Vector2D::zero();
    }

    /// Toroidal wrap. Reaching the far edge wraps to 0 and going below 0
    /// wraps to the far edge, on both axes.
    pub fn wrap_edges(&mut self, bounds: Bounds) {
        if self.position.x >= bounds.width {
            self.position.x = 0.0;
        } else if self.position.x < 0.0 {
            self.position.x = bounds.width;
        }

        if self.position.y >= bounds.height {
            self.position.y = 0.0;
        } else if self.position.y < 0.0 {
            self.position.y = bounds.height;
        }
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            position: self.position,
            orientation: self.velocity.heading(),
            color: self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds::new(100.0, 100.0).unwrap()
    }

    #[test]
    fn test_boid_creation() {
        let pos = Vector2D::new(10.0, 20.0);
        let vel = Vector2D::new(1.0, 1.0);
        let boid = Boid::new(pos, vel, BoidConfig::default());

        assert_eq!(boid.position, pos);
        assert_eq!(boid.velocity, vel);
        assert_eq!(boid.acceleration, Vector2D::zero());
        assert_eq!(boid.color, Color::ROYAL_BLUE);
    }

    #[test]
    fn test_boid_update_moves_before_accelerating() {
        let mut boid = Boid::new(
            Vector2D::new(0.0, 0.0),
            Vector2D::new(1.0, 1.0),
            BoidConfig::default(),
        );
        boid.apply_force(Vector2D::new(0.5, -0.25));

        boid.update();

        // Position uses the velocity from before this tick's acceleration
        assert_eq!(boid.position, Vector2D::new(1.0, 1.0));
        assert_eq!(boid.velocity, Vector2D::new(1.5, 0.75));
        assert_eq!(boid.acceleration, Vector2D::zero());
    }

    #[test]
    fn test_boid_update_clamps_velocity_per_axis() {
        let mut boid = Boid::new(
            Vector2D::zero(),
            Vector2D::new(1.9, -1.9),
            BoidConfig::default(),
        );
        boid.apply_force(Vector2D::new(0.5, -0.5));

        boid.update();

        assert_eq!(boid.velocity, Vector2D::new(2.0, -2.0));
    }

    #[test]
    fn test_wrap_far_edge_to_zero() {
        let mut boid = Boid::new(
            Vector2D::new(100.0, 100.0),
            Vector2D::zero(),
            BoidConfig::default(),
        );
        boid.wrap_edges(bounds());
        assert_eq!(boid.position, Vector2D::new(0.0, 0.0));
    }

    #[test]
    fn test_wrap_below_zero_to_far_edge() {
        let mut boid = Boid::new(
            Vector2D::new(-0.001, -1.0),
            Vector2D::zero(),
            BoidConfig::default(),
        );
        boid.wrap_edges(bounds());
        assert_eq!(boid.position, Vector2D::new(100.0, 100.0));
    }

    #[test]
    fn test_wrap_leaves_interior_alone() {
        let mut boid = Boid::new(
            Vector2D::new(0.0, 99.5),
            Vector2D::zero(),
            BoidConfig::default(),
        );
        boid.wrap_edges(bounds());
        assert_eq!(boid.position, Vector2D::new(0.0, 99.5));
    }

    #[test]
    fn test_update_with_unvalidated_negative_limits() {
        let config = BoidConfig {
            max_speed: -1.0,
            max_force: f32::NAN,
            ..BoidConfig::default()
        };
        let mut boid = Boid::new(Vector2D::new(5.0, 5.0), Vector2D::new(1.0, -1.0), config);
        boid.apply_force(Vector2D::new(0.5, 0.5));

        boid.update();

        // A negative or NaN limit clamps to zero instead of panicking
        assert_eq!(boid.position, Vector2D::new(6.0, 4.0));
        assert_eq!(boid.velocity, Vector2D::zero());
    }

    #[test]
    fn test_validate_rejects_non_finite_state() {
        let boid = Boid::new(
            Vector2D::new(f32::NAN, 0.0),
            Vector2D::zero(),
            BoidConfig::default(),
        );
        assert_eq!(boid.validate(), Err(ConfigError::NonFiniteState));
    }

    #[test]
    fn test_steering_combined_applies_weights() {
        let steering = Steering {
            alignment: Vector2D::new(1.0, 0.0),
            cohesion: Vector2D::new(0.0, 1.0),
            separation: Vector2D::new(-1.0, 0.0),
            attraction: Vector2D::new(0.5, 0.5),
        };
        let config = BoidConfig {
            alignment_weight: 2.0,
            cohesion_weight: 3.0,
            separation_weight: 0.0,
            ..BoidConfig::default()
        };

        assert_eq!(steering.combined(&config), Vector2D::new(2.5, 3.5));
    }

    #[test]
    #[cfg(feature = "std")]
    fn test_random_boid_inside_bounds() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let boid = Boid::random(bounds(), BoidConfig::default(), &mut rng);
            assert!(bounds().contains(boid.position.x, boid.position.y));
            assert!(boid.velocity.x >= -1.0 && boid.velocity.x < 1.0);
            assert!(boid.velocity.y >= -1.0 && boid.velocity.y < 1.0);
        }
    }

    #[test]
    #[cfg(feature = "std")]
    fn test_random_warm_color() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let color = Color::random_warm(&mut rng);
            assert_eq!(color.r, 255);
            assert!(color.g <= 127 && color.b <= 127);
        }
    }
}
