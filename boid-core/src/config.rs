use core::fmt;

/// Per-boid tunables, fixed when the boid is created
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoidConfig {
    pub max_speed: f32,
    pub max_force: f32,
    pub vision_radius: f32,
    /// Per-axis limit on the pull toward the attraction target. Kept well
    /// below `max_force` so the pull stays gentle.
    pub attraction_force_limit: f32,
    pub separation_weight: f32,
    pub cohesion_weight: f32,
    pub alignment_weight: f32,
}

impl Default for BoidConfig {
    fn default() -> Self {
        Self {
            max_speed: 2.0,
            max_force: 0.05,
            vision_radius: 50.0,
            attraction_force_limit: 0.01,
            separation_weight: 1.0,
            cohesion_weight: 1.0,
            alignment_weight: 1.0,
        }
    }
}

impl BoidConfig {
    /// Rejects negative or non-finite tunables. Zero is allowed everywhere;
    /// a zero vision radius simply leaves a boid without neighbors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check(self.max_speed, ConfigError::InvalidMaxSpeed)?;
        check(self.max_force, ConfigError::InvalidMaxForce)?;
        check(self.vision_radius, ConfigError::InvalidVisionRadius)?;
        check(
            self.attraction_force_limit,
            ConfigError::InvalidAttractionForceLimit,
        )?;
        check(self.separation_weight, ConfigError::InvalidSeparationWeight)?;
        check(self.cohesion_weight, ConfigError::InvalidCohesionWeight)?;
        check(self.alignment_weight, ConfigError::InvalidAlignmentWeight)?;
        Ok(())
    }
}

fn check(value: f32, err: ConfigError) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(err)
    }
}

/// Size of the toroidal world, in the same units as boid positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        let bounds = Self { width, height };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(ConfigError::InvalidWidth);
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(ConfigError::InvalidHeight);
        }
        Ok(())
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

/// Rejected flock configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    InvalidWidth,
    InvalidHeight,
    InvalidMaxSpeed,
    InvalidMaxForce,
    InvalidVisionRadius,
    InvalidAttractionForceLimit,
    InvalidSeparationWeight,
    InvalidCohesionWeight,
    InvalidAlignmentWeight,
    /// A boid was handed a NaN or infinite position or velocity.
    NonFiniteState,
    /// A fixed-capacity flock has no room for another boid.
    FlockFull { capacity: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::InvalidWidth => "width must be positive and finite",
            Self::InvalidHeight => "height must be positive and finite",
            Self::InvalidMaxSpeed => "max_speed must be non-negative and finite",
            Self::InvalidMaxForce => "max_force must be non-negative and finite",
            Self::InvalidVisionRadius => "vision_radius must be non-negative and finite",
            Self::InvalidAttractionForceLimit => {
                "attraction_force_limit must be non-negative and finite"
            }
            Self::InvalidSeparationWeight => "separation_weight must be non-negative and finite",
            Self::InvalidCohesionWeight => "cohesion_weight must be non-negative and finite",
            Self::InvalidAlignmentWeight => "alignment_weight must be non-negative and finite",
            Self::NonFiniteState => "boid position and velocity must be finite",
            Self::FlockFull { capacity } => {
                return write!(f, "flock is full ({} boids)", capacity);
            }
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(BoidConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_zero_vision_radius_is_legal() {
        let config = BoidConfig {
            vision_radius: 0.0,
            ..BoidConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_negative_vision_radius_rejected() {
        let config = BoidConfig {
            vision_radius: -1.0,
            ..BoidConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidVisionRadius));
    }

    #[test]
    fn test_non_finite_tunables_rejected() {
        let config = BoidConfig {
            max_speed: f32::INFINITY,
            ..BoidConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidMaxSpeed));

        let config = BoidConfig {
            cohesion_weight: f32::NAN,
            ..BoidConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidCohesionWeight));
    }

    #[test]
    fn test_bounds_validation() {
        assert!(Bounds::new(800.0, 600.0).is_ok());
        assert_eq!(Bounds::new(0.0, 600.0), Err(ConfigError::InvalidWidth));
        assert_eq!(Bounds::new(800.0, -1.0), Err(ConfigError::InvalidHeight));
        assert_eq!(Bounds::new(f32::NAN, 1.0), Err(ConfigError::InvalidWidth));
    }

    #[test]
    fn test_bounds_contains_edges() {
        let bounds = Bounds::new(100.0, 50.0).unwrap();
        assert!(bounds.contains(0.0, 0.0));
        assert!(bounds.contains(100.0, 50.0));
        assert!(!bounds.contains(100.1, 10.0));
        assert!(!bounds.contains(10.0, -0.1));
    }
}
