#[cfg(feature = "std")]
use rand::Rng;

use crate::{behavior, Boid, Bounds, ConfigError, RenderSnapshot, Vector2D};
#[cfg(feature = "std")]
use crate::{BoidConfig, Color};

/// Combined, weighted steering force for the boid at `index`, read from the
/// unmodified flock.
fn steering_force(flock: &[Boid], index: usize, target: Option<Vector2D>) -> Vector2D {
    let boid = &flock[index];
    boid.steering(behavior::neighbors(flock, index), target)
        .combined(&boid.config)
}

/// Second half of a tick: integrate every boid with its precomputed force.
fn apply_forces(boids: &mut [Boid], forces: &[Vector2D], bounds: Bounds) {
    for (boid, force) in boids.iter_mut().zip(forces.iter()) {
        boid.apply_force(*force);
        boid.update();
        boid.wrap_edges(bounds);
    }
}

/// A fixed-capacity flock that works without an allocator
pub struct Flock<const N: usize> {
    boids: heapless::Vec<Boid, N>,
    bounds: Bounds,
}

impl<const N: usize> Flock<N> {
    pub fn new(bounds: Bounds) -> Result<Self, ConfigError> {
        bounds.validate()?;
        Ok(Self {
            boids: heapless::Vec::new(),
            bounds,
        })
    }

    pub fn add_boid(&mut self, boid: Boid) -> Result<(), ConfigError> {
        boid.validate()?;
        self.boids
            .push(boid)
            .map_err(|_| ConfigError::FlockFull { capacity: N })
    }

    /// Advances every boid by one tick. All forces are computed before any
    /// boid moves, so the result does not depend on boid order.
    pub fn step(&mut self, target: Option<Vector2D>) {
        let target = target.filter(Vector2D::is_finite);
        let forces: heapless::Vec<Vector2D, N> = (0..self.boids.len())
            .map(|index| steering_force(&self.boids, index, target))
            .collect();
        apply_forces(&mut self.boids, &forces, self.bounds);
    }

    pub fn resize(&mut self, bounds: Bounds) -> Result<(), ConfigError> {
        bounds.validate()?;
        self.bounds = bounds;
        Ok(())
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn snapshots(&self) -> impl Iterator<Item = RenderSnapshot> + '_ {
        self.boids.iter().map(Boid::snapshot)
    }
}

/// A heap-backed flock of any size
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct FlockSim {
    boids: Vec<Boid>,
    bounds: Bounds,
    tick: u64,
}

#[cfg(feature = "std")]
impl FlockSim {
    /// `count` randomly placed boids sharing `config`.
    pub fn new(bounds: Bounds, count: usize, config: BoidConfig) -> Result<Self, ConfigError> {
        Self::with_rng(bounds, count, config, &mut rand::thread_rng())
    }

    /// Like [`FlockSim::new`] but draws positions, velocities and colors from
    /// `rng`, so a seeded generator reproduces the same flock.
    pub fn with_rng<R: Rng + ?Sized>(
        bounds: Bounds,
        count: usize,
        config: BoidConfig,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        bounds.validate()?;
        config.validate()?;
        let boids = (0..count)
            .map(|_| {
                let color = Color::random_warm(rng);
                Boid::random(bounds, config, rng).with_color(color)
            })
            .collect();
        Ok(Self::build(bounds, boids))
    }

    /// A flock made of the given boids, each keeping its own config.
    pub fn from_boids(bounds: Bounds, boids: Vec<Boid>) -> Result<Self, ConfigError> {
        bounds.validate()?;
        for boid in &boids {
            boid.validate()?;
        }
        Ok(Self::build(bounds, boids))
    }

    fn build(bounds: Bounds, boids: Vec<Boid>) -> Self {
        log::debug!(
            "created flock of {} boids in {}x{}",
            boids.len(),
            bounds.width,
            bounds.height
        );
        Self {
            boids,
            bounds,
            tick: 0,
        }
    }

    /// Advances every boid by one tick. All forces are computed before any
    /// boid moves, so the result does not depend on boid order. Stepping an
    /// empty flock does nothing and does not count as a tick.
    pub fn step(&mut self, target: Option<Vector2D>) {
        if self.boids.is_empty() {
            return;
        }
        let target = target.filter(Vector2D::is_finite);
        let forces: Vec<Vector2D> = (0..self.boids.len())
            .map(|index| steering_force(&self.boids, index, target))
            .collect();
        apply_forces(&mut self.boids, &forces, self.bounds);
        self.tick += 1;
        log::trace!(
            "tick {}: {} boids, target {:?}",
            self.tick,
            self.boids.len(),
            target
        );
    }

    pub fn resize(&mut self, bounds: Bounds) -> Result<(), ConfigError> {
        bounds.validate()?;
        log::debug!("resized flock to {}x{}", bounds.width, bounds.height);
        self.bounds = bounds;
        Ok(())
    }

    /// Replaces the tunables of every boid.
    pub fn set_config(&mut self, config: BoidConfig) -> Result<(), ConfigError> {
        config.validate()?;
        for boid in &mut self.boids {
            boid.config = config;
        }
        Ok(())
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of completed ticks over a non-empty flock.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn snapshots(&self) -> impl Iterator<Item = RenderSnapshot> + '_ {
        self.boids.iter().map(Boid::snapshot)
    }
}

/// Play/pause gate around a [`FlockSim`]. Starts paused.
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct Playback {
    sim: FlockSim,
    playing: bool,
}

#[cfg(feature = "std")]
impl Playback {
    pub fn new(sim: FlockSim) -> Self {
        Self {
            sim,
            playing: false,
        }
    }

    pub fn toggle(&mut self) {
        self.set_playing(!self.playing);
    }

    pub fn set_playing(&mut self, playing: bool) {
        if playing != self.playing {
            log::debug!("playback {}", if playing { "resumed" } else { "paused" });
        }
        self.playing = playing;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Steps the flock if playing. Returns whether a tick happened.
    pub fn advance(&mut self, target: Option<Vector2D>) -> bool {
        if !self.playing {
            return false;
        }
        let before = self.sim.tick;
        self.sim.step(target);
        self.sim.tick != before
    }

    /// Snapshots of the current state; unchanged while paused.
    pub fn frame(&self) -> Vec<RenderSnapshot> {
        self.sim.snapshots().collect()
    }

    pub fn sim(&self) -> &FlockSim {
        &self.sim
    }

    pub fn sim_mut(&mut self) -> &mut FlockSim {
        &mut self.sim
    }
}
