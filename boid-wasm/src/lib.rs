use boid_core::{BoidConfig, Bounds, Color, ConfigError, FlockSim, Playback, Vector2D};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, MouseEvent};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

const BACKGROUND: &str = "#1f1f1f";
const SHADOW_FILL: &str = "rgba(0, 0, 0, 0.3)";

fn css_color(color: Color) -> String {
    format!("rgb({}, {}, {})", color.r, color.g, color.b)
}

fn config_error(err: ConfigError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct BoidSimulation {
    playback: Playback,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    target: Option<Vector2D>,
}

#[wasm_bindgen]
impl BoidSimulation {
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_id: &str,
        width: f64,
        height: f64,
        boid_count: usize,
    ) -> Result<BoidSimulation, JsValue> {
        console_log!("Initializing boid simulation with {} boids", boid_count);

        let window = web_sys::window().ok_or("no global window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let context = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let bounds = Bounds::new(width as f32, height as f32).map_err(config_error)?;
        let flock =
            FlockSim::new(bounds, boid_count, BoidConfig::default()).map_err(config_error)?;

        Ok(BoidSimulation {
            playback: Playback::new(flock),
            canvas,
            context,
            target: None,
        })
    }

    /// One animation frame: steps the flock if playing, then redraws.
    /// While paused the previous frame stays on the canvas.
    pub fn frame(&mut self) -> Result<(), JsValue> {
        if !self.playback.is_playing() {
            return Ok(());
        }
        self.playback.advance(self.target);
        self.render()
    }

    pub fn render(&self) -> Result<(), JsValue> {
        let width = self.canvas.width() as f64;
        let height = self.canvas.height() as f64;

        self.context.set_fill_style_str(BACKGROUND);
        self.context.fill_rect(0.0, 0.0, width, height);

        for snapshot in self.playback.frame() {
            self.fill_triangle(&snapshot.shadow(), SHADOW_FILL);
            self.fill_triangle(&snapshot.triangle(), &css_color(snapshot.color));
        }

        Ok(())
    }

    fn fill_triangle(&self, corners: &[Vector2D; 3], fill: &str) {
        self.context.begin_path();
        self.context.move_to(corners[0].x as f64, corners[0].y as f64);
        for corner in &corners[1..] {
            self.context.line_to(corner.x as f64, corner.y as f64);
        }
        self.context.close_path();
        self.context.set_fill_style_str(fill);
        self.context.fill();
    }

    pub fn toggle_play(&mut self) {
        self.playback.toggle();
        console_log!(
            "Simulation {}",
            if self.playback.is_playing() { "playing" } else { "paused" }
        );
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    pub fn handle_mouse_move(&mut self, event: MouseEvent) {
        let canvas_element: &Element = self.canvas.as_ref();
        let rect = canvas_element.get_bounding_client_rect();
        let x = event.client_x() as f64 - rect.left();
        let y = event.client_y() as f64 - rect.top();
        self.target = Some(Vector2D::new(x as f32, y as f32));
    }

    pub fn handle_mouse_leave(&mut self) {
        self.target = None;
    }

    /// Resizing the canvas clears its bitmap, so the current flock is drawn
    /// again right away. A paused simulation keeps showing its last state.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        let bounds = Bounds::new(width as f32, height as f32).map_err(config_error)?;
        self.playback.sim_mut().resize(bounds).map_err(config_error)?;
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        console_log!("Resized to {}x{}", width, height);
        self.render()
    }

    pub fn boid_count(&self) -> usize {
        self.playback.sim().len()
    }

    pub fn set_separation_weight(&mut self, weight: f64) -> Result<(), JsValue> {
        self.update_config(|config| config.separation_weight = weight as f32)
    }

    pub fn set_alignment_weight(&mut self, weight: f64) -> Result<(), JsValue> {
        self.update_config(|config| config.alignment_weight = weight as f32)
    }

    pub fn set_cohesion_weight(&mut self, weight: f64) -> Result<(), JsValue> {
        self.update_config(|config| config.cohesion_weight = weight as f32)
    }

    pub fn set_max_speed(&mut self, speed: f64) -> Result<(), JsValue> {
        self.update_config(|config| config.max_speed = speed as f32)
    }

    pub fn set_max_force(&mut self, force: f64) -> Result<(), JsValue> {
        self.update_config(|config| config.max_force = force as f32)
    }

    pub fn set_vision_radius(&mut self, radius: f64) -> Result<(), JsValue> {
        self.update_config(|config| config.vision_radius = radius as f32)
    }
}

impl BoidSimulation {
    /// Edits the shared config and applies it to every boid, rejecting
    /// invalid values without touching the flock.
    fn update_config(&mut self, edit: impl FnOnce(&mut BoidConfig)) -> Result<(), JsValue> {
        let mut config = self
            .playback
            .sim()
            .boids()
            .first()
            .map(|boid| boid.config)
            .unwrap_or_default();
        edit(&mut config);
        self.playback
            .sim_mut()
            .set_config(config)
            .map_err(config_error)
    }
}
