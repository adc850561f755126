#![cfg_attr(not(feature = "std"), no_std)]

use serde::{Deserialize, Serialize};

/// Represents a 2D position in world coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Update message that sets or clears the attraction target
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TargetPositionUpdate {
    /// Frame from which the update applies
    #[serde(default)]
    pub frame: u64,
    /// Optional target position (None means no target/free flying)
    pub position: Option<Position>,
}

/// Flock configuration as stored in a settings file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlockSettings {
    pub count: usize,
    pub width: f32,
    pub height: f32,
    /// Seed for boid placement; a fresh random flock when absent
    pub seed: Option<u64>,
    pub max_speed: f32,
    pub max_force: f32,
    pub vision_radius: f32,
    pub attraction_force_limit: f32,
    pub separation_weight: f32,
    pub cohesion_weight: f32,
    pub alignment_weight: f32,
}

impl Default for FlockSettings {
    fn default() -> Self {
        Self {
            count: 100,
            width: 800.0,
            height: 600.0,
            seed: None,
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

#[cfg(feature = "std")]
impl FlockSettings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Render state of one boid as reported to observers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoidState {
    pub position: Position,
    /// Heading in radians
    pub orientation: f32,
    /// RGB components
    pub color: [u8; 3],
}

/// Flock state right after a tick
#[cfg(feature = "std")]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    /// Completed simulation ticks, this one included
    pub tick: u64,
    pub boids: Vec<BoidState>,
}

/// Summary of a simulation run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusResponse {
    pub boid_count: usize,
    pub tick: u64,
    pub playing: bool,
    pub target_active: bool,
}
