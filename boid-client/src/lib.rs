//! Headless driver for the flock: builds a simulation from settings, runs the
//! frame loop behind a play/pause gate and streams a JSON line for each
//! reported tick.

use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use boid_core::{BoidConfig, Bounds, FlockSim, Playback, RenderSnapshot, Vector2D};
use boid_shared::{
    BoidState, FlockSettings, FrameReport, Position, StatusResponse, TargetPositionUpdate,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// How the frame loop is driven
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub frames: u64,
    /// Target in effect from the first frame
    pub target: Option<Position>,
    /// Later target changes, each taking effect at its `frame`
    pub target_updates: Vec<TargetPositionUpdate>,
    pub start_paused: bool,
    /// Frames before which the pause gate flips
    pub toggle_at: BTreeSet<u64>,
    pub report_every: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            frames: 600,
            target: None,
            target_updates: Vec::new(),
            start_paused: false,
            toggle_at: BTreeSet::new(),
            report_every: 1,
        }
    }
}

/// Reads settings from a JSON file, or the defaults when no file is given.
pub fn load_settings(path: Option<&Path>) -> Result<FlockSettings> {
    let Some(path) = path else {
        return Ok(FlockSettings::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    FlockSettings::from_json(&json)
        .with_context(|| format!("Invalid settings in {}", path.display()))
}

pub fn boid_config(settings: &FlockSettings) -> BoidConfig {
    BoidConfig {
        max_speed: settings.max_speed,
        max_force: settings.max_force,
        vision_radius: settings.vision_radius,
        attraction_force_limit: settings.attraction_force_limit,
        separation_weight: settings.separation_weight,
        cohesion_weight: settings.cohesion_weight,
        alignment_weight: settings.alignment_weight,
    }
}

/// Builds the flock described by `settings`, seeded when a seed is given.
pub fn build_flock(settings: &FlockSettings) -> Result<FlockSim> {
    let bounds = Bounds::new(settings.width, settings.height).context("Invalid world bounds")?;
    let config = boid_config(settings);

    let flock = match settings.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            FlockSim::with_rng(bounds, settings.count, config, &mut rng)
        }
        None => FlockSim::new(bounds, settings.count, config),
    };
    flock.context("Invalid boid configuration")
}

/// Reads target updates from a file holding one JSON object per line.
/// Blank lines are skipped.
pub fn load_target_updates(path: &Path) -> Result<Vec<TargetPositionUpdate>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read target updates from {}", path.display()))?;
    parse_target_updates(&text)
        .with_context(|| format!("Invalid target updates in {}", path.display()))
}

pub fn parse_target_updates(text: &str) -> Result<Vec<TargetPositionUpdate>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str::<TargetPositionUpdate>(line)
                .with_context(|| format!("line {}", index + 1))
        })
        .collect()
}

/// Parses a target given as `X,Y`.
pub fn parse_target(value: &str) -> Result<Position, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", value))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x '{}': {}", x, e))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y '{}': {}", y, e))?;
    Ok(Position::new(x, y))
}

fn boid_state(snapshot: &RenderSnapshot) -> BoidState {
    BoidState {
        position: Position::new(snapshot.position.x, snapshot.position.y),
        orientation: snapshot.orientation,
        color: [snapshot.color.r, snapshot.color.g, snapshot.color.b],
    }
}

/// Runs the frame loop over a [`Playback`]
pub struct FrameDriver {
    playback: Playback,
    options: RunOptions,
    target: Option<Position>,
}

impl FrameDriver {
    pub fn new(sim: FlockSim, mut options: RunOptions) -> Self {
        let mut playback = Playback::new(sim);
        playback.set_playing(!options.start_paused);
        // Stable, so updates sharing a frame keep file order and the last wins
        options.target_updates.sort_by_key(|update| update.frame);
        let target = options.target;
        Self {
            playback,
            options,
            target,
        }
    }

    fn target(&self) -> Option<Vector2D> {
        self.target.map(|p| Vector2D::new(p.x, p.y))
    }

    /// Runs every frame, writing one JSON line per reported tick to `out`.
    /// Paused frames produce nothing.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<StatusResponse> {
        let report_every = self.options.report_every.max(1);
        let mut pending = 0;

        log::info!(
            "Running {} frames with {} boids",
            self.options.frames,
            self.playback.sim().len()
        );

        for frame in 0..self.options.frames {
            if self.options.toggle_at.contains(&frame) {
                self.playback.toggle();
                log::info!(
                    "Frame {}: {}",
                    frame,
                    if self.playback.is_playing() { "playing" } else { "paused" }
                );
            }

            while let Some(update) = self.options.target_updates.get(pending) {
                if update.frame > frame {
                    break;
                }
                self.target = update.position;
                log::debug!("Frame {}: target {:?}", frame, self.target);
                pending += 1;
            }

            let ticked = self.playback.advance(self.target());

            let last = frame + 1 == self.options.frames;
            if ticked && (frame % report_every == 0 || last) {
                let report = self.report(frame);
                serde_json::to_writer(&mut *out, &report).context("Failed to encode frame")?;
                writeln!(out).context("Failed to write frame")?;
                self.log_debug_state(frame);
            }
        }
        out.flush().context("Failed to flush output")?;

        Ok(self.status())
    }

    pub fn report(&self, frame: u64) -> FrameReport {
        FrameReport {
            frame,
            tick: self.playback.sim().tick(),
            boids: self.playback.frame().iter().map(boid_state).collect(),
        }
    }

    pub fn status(&self) -> StatusResponse {
        StatusResponse {
            boid_count: self.playback.sim().len(),
            tick: self.playback.sim().tick(),
            playing: self.playback.is_playing(),
            target_active: self.target().is_some_and(|t| t.is_finite()),
        }
    }

    fn log_debug_state(&self, frame: u64) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }
        for (index, boid) in self.playback.sim().boids().iter().enumerate() {
            log::debug!(
                "frame {} boid {}: position ({:.2}, {:.2}) velocity ({:.2}, {:.2}) angle {:.3}",
                frame,
                index,
                boid.position.x,
                boid.position.y,
                boid.velocity.x,
                boid.velocity.y,
                boid.velocity.heading()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target("12.5, 40").unwrap(), Position::new(12.5, 40.0));
        assert!(parse_target("12.5").is_err());
        assert!(parse_target("a,1").is_err());
    }

    #[test]
    fn test_boid_config_from_settings() {
        let settings = FlockSettings {
            vision_radius: 75.0,
            cohesion_weight: 0.5,
            ..FlockSettings::default()
        };
        let config = boid_config(&settings);
        assert_eq!(config.vision_radius, 75.0);
        assert_eq!(config.cohesion_weight, 0.5);
        assert_eq!(config.max_speed, 2.0);
    }

    #[test]
    fn test_build_flock_rejects_bad_bounds() {
        let settings = FlockSettings {
            width: -1.0,
            ..FlockSettings::default()
        };
        let err = build_flock(&settings).unwrap_err();
        assert!(format!("{:#}", err).contains("width must be positive"));
    }

    #[test]
    fn test_parse_target_updates() {
        let text = r#"{"frame": 3, "position": {"x": 1.0, "y": 2.0}}

{"frame": 8, "position": null}
{"position": {"x": 5.0, "y": 5.0}}"#;
        let updates = parse_target_updates(text).unwrap();

        assert_eq!(updates.len(), 3);
        assert_eq!(updates[0].frame, 3);
        assert_eq!(updates[0].position, Some(Position::new(1.0, 2.0)));
        assert_eq!(updates[1].position, None);
        assert_eq!(updates[2].frame, 0);
    }

    #[test]
    fn test_parse_target_updates_names_bad_line() {
        let text = "{\"frame\": 1, \"position\": null}\nnot json";
        let err = parse_target_updates(text).unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
    }

    #[test]
    fn test_default_settings_without_file() {
        assert_eq!(load_settings(None).unwrap(), FlockSettings::default());
    }
}
