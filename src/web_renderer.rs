use crate::config::GameConfig;
use crate::entity::Point;
use crate::game::{Game, Phase};
use crate::renderer::{surface_point, Input, Renderer};
use crate::scene::{DrawSurface, Paint, Scene};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::f64::consts::PI;
use std::io;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

// Colors
const COLOR_BACKGROUND: &str = "#CBD5E1";
const COLOR_ROAD: &str = "blue";
const COLOR_MARKER: &str = "#FFFFFF";
const COLOR_TARGET: &str = "red";
const COLOR_UI: &str = "#0F172A";
const COLOR_GAME_OVER: &str = "#EF4444";

/// Canvas 2d context seen through the drawing primitives the scene needs.
struct CanvasSurface<'a> {
    context: &'a CanvasRenderingContext2d,
}

impl CanvasSurface<'_> {
    fn set_paint(&self, paint: Paint) {
        let color = match paint {
            Paint::Road => COLOR_ROAD,
            Paint::Marker => COLOR_MARKER,
            Paint::Target => COLOR_TARGET,
        };
        self.context.set_fill_style_str(color);
    }
}

impl DrawSurface for CanvasSurface<'_> {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.context.clear_rect(x, y, width, height);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: Paint) {
        self.set_paint(paint);
        self.context.fill_rect(x, y, width, height);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: Paint) {
        self.set_paint(paint);
        self.context.begin_path();
        if self.context.arc(center.x, center.y, radius, 0.0, PI * 2.0).is_ok() {
            self.context.fill();
        }
    }
}

/// Canvas and context, looked up once the element exists.
struct CanvasTarget {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

pub struct WebRenderer {
    canvas_id: String,
    window: web_sys::Window,
    width: f64,
    height: f64,
    target: Option<CanvasTarget>,

    // Input state
    pending_input: Rc<RefCell<VecDeque<Input>>>,
    click_listener: Option<Closure<dyn FnMut(MouseEvent)>>,
}

impl WebRenderer {
    pub fn new(canvas_id: &str, config: &GameConfig) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        Ok(Self {
            canvas_id: canvas_id.to_string(),
            window,
            width: config.width,
            height: config.height,
            target: None,
            pending_input: Rc::new(RefCell::new(VecDeque::new())),
            click_listener: None,
        })
    }

    /// Find the canvas and its 2d context. `None` while the page has not created them yet.
    fn lookup_canvas(&self) -> Option<CanvasTarget> {
        let document = self.window.document()?;
        let canvas = document
            .get_element_by_id(&self.canvas_id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        let context = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(CanvasTarget { canvas, context })
    }

    fn ensure_canvas(&mut self) -> Result<bool, JsValue> {
        if self.target.is_some() {
            return Ok(true);
        }

        let Some(target) = self.lookup_canvas() else {
            return Ok(false);
        };

        target.canvas.set_width(self.width as u32);
        target.canvas.set_height(self.height as u32);
        target
            .canvas
            .style()
            .set_property("background-color", COLOR_BACKGROUND)?;

        self.setup_click_listener(&target.canvas)?;
        log::info!("attached to canvas '{}'", self.canvas_id);

        self.target = Some(target);
        Ok(true)
    }

    fn setup_click_listener(&mut self, canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
        let pending_input = self.pending_input.clone();
        let element = canvas.clone();
        let logical = (self.width, self.height);

        let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
            let rect = element.get_bounding_client_rect();
            let point = surface_point(
                Point::new(event.client_x() as f64, event.client_y() as f64),
                Point::new(rect.left(), rect.top()),
                (rect.width(), rect.height()),
                logical,
            );
            pending_input.borrow_mut().push_back(Input::Click(point));
        }) as Box<dyn FnMut(MouseEvent)>);

        canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        self.click_listener = Some(closure);
        Ok(())
    }

    fn draw_ui(context: &CanvasRenderingContext2d, scene: &Scene) -> Result<(), JsValue> {
        context.set_fill_style_str(COLOR_UI);
        context.set_font("16px monospace");
        context.set_text_align("left");
        context.set_text_baseline("top");
        context.fill_text(
            &format!("Score: {}  Lives: {}", scene.score, scene.lives),
            8.0,
            8.0,
        )?;

        if let Phase::GameOver { final_score } = scene.phase {
            context.set_fill_style_str(COLOR_GAME_OVER);
            context.set_font("bold 24px monospace");
            context.set_text_align("center");
            context.set_text_baseline("middle");
            context.fill_text(
                &format!("GAME OVER! Final score: {}", final_score),
                scene.width / 2.0,
                scene.height / 4.0,
            )?;
            context.set_font("16px monospace");
            context.fill_text(
                "Click to restart",
                scene.width / 2.0,
                scene.height / 4.0 + 28.0,
            )?;
        }

        Ok(())
    }
}

fn js_to_io(err: JsValue) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{:?}", err))
}

impl Renderer for WebRenderer {
    fn init(&mut self) -> io::Result<()> {
        // The canvas may not be mounted yet; render retries every frame
        if !self.ensure_canvas().map_err(js_to_io)? {
            log::debug!("canvas '{}' not found yet", self.canvas_id);
        }
        Ok(())
    }

    fn render(&mut self, game: &Game) -> io::Result<()> {
        if !self.ensure_canvas().map_err(js_to_io)? {
            return Ok(());
        }
        let Some(target) = &self.target else {
            return Ok(());
        };

        let scene = Scene::from_game(game);
        scene.draw(&mut CanvasSurface {
            context: &target.context,
        });
        Self::draw_ui(&target.context, &scene).map_err(js_to_io)?;

        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        if let (Some(target), Some(listener)) = (&self.target, self.click_listener.take()) {
            target
                .canvas
                .remove_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
                .map_err(js_to_io)?;
        }
        self.pending_input.borrow_mut().clear();
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        Ok(self.pending_input.borrow_mut().pop_front())
    }
}
