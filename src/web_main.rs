use crate::lifecycle::Lifecycle;
use crate::renderer::apply_input;
use crate::web_logger;
use crate::{Game, GameConfig, Renderer, WebRenderer};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

struct GameLoop {
    game: Game,
    renderer: WebRenderer,
}

impl GameLoop {
    fn update_frame(&mut self) -> Result<(), JsValue> {
        // Drain every click since the last frame
        while let Some(input) = self
            .renderer
            .poll_input()
            .map_err(|e| JsValue::from_str(&e.to_string()))?
        {
            apply_input(&mut self.game, input);
        }

        // One simulation step per animation frame
        self.game.tick();

        self.renderer
            .render(&self.game)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(())
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Running game. Call `stop()` before removing the canvas from the page.
#[wasm_bindgen]
pub struct GameHandle {
    window: web_sys::Window,
    game_loop: Rc<RefCell<GameLoop>>,
    lifecycle: Rc<Lifecycle>,
    frame_id: Rc<Cell<Option<i32>>>,
    frame_callback: FrameCallback,
    spawn_interval_id: i32,
    spawn_callback: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl GameHandle {
    /// Cancel the animation frame and the spawn timer, and detach input.
    pub fn stop(&mut self) {
        // A loop that halted on an error still owns its timer and listeners
        if !self.lifecycle.begin_stop() {
            return;
        }

        if let Some(id) = self.frame_id.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                log::warn!("failed to cancel animation frame: {:?}", e);
            }
        }
        self.window.clear_interval_with_handle(self.spawn_interval_id);

        // Breaks the frame closure's reference to itself
        self.frame_callback.borrow_mut().take();
        self.spawn_callback.take();

        match self.game_loop.try_borrow_mut() {
            Ok(mut game_loop) => {
                if let Err(e) = game_loop.renderer.cleanup() {
                    log::warn!("renderer cleanup failed: {}", e);
                }
            }
            Err(_) => log::warn!("game loop busy during stop, skipping renderer cleanup"),
        }

        log::info!("game stopped");
    }

    pub fn score(&self) -> u32 {
        self.game_loop.borrow().game.state.score
    }

    pub fn lives(&self) -> u32 {
        self.game_loop.borrow().game.state.lives
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.game_loop.borrow().game.is_game_over()
    }

    pub fn reset(&self) {
        self.game_loop.borrow_mut().game.reset();
    }
}

impl Drop for GameHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

#[wasm_bindgen]
pub fn start_game(canvas_id: &str) -> Result<GameHandle, JsValue> {
    console_error_panic_hook::set_once();
    web_logger::init(log::LevelFilter::Info);

    let window = web_sys::window().ok_or("no window")?;

    let game = Game::new(GameConfig::default()).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let spawn_interval_ms = game.config().spawn_interval.as_millis() as i32;

    let mut renderer = WebRenderer::new(canvas_id, game.config())?;
    renderer
        .init()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let game_loop = Rc::new(RefCell::new(GameLoop { game, renderer }));
    let lifecycle = Rc::new(Lifecycle::new());
    let frame_id = Rc::new(Cell::new(None));

    // requestAnimationFrame loop: the closure reschedules itself through `f`
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();

    let frame = {
        let game_loop = game_loop.clone();
        let lifecycle = lifecycle.clone();
        let frame_id = frame_id.clone();
        let window = window.clone();

        Closure::wrap(Box::new(move || {
            if !lifecycle.is_running() {
                return;
            }

            if let Err(e) = game_loop.borrow_mut().update_frame() {
                log::error!("frame failed, halting until stop(): {:?}", e);
                lifecycle.halt();
                return;
            }

            if let Some(callback) = f.borrow().as_ref() {
                match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                    Ok(id) => frame_id.set(Some(id)),
                    Err(e) => {
                        log::error!("failed to schedule next frame: {:?}", e);
                        lifecycle.halt();
                    }
                }
            }
        }) as Box<dyn FnMut()>)
    };

    frame_id.set(Some(
        window.request_animation_frame(frame.as_ref().unchecked_ref())?,
    ));
    *g.borrow_mut() = Some(frame);

    // Spawn timer, independent of the frame rate
    let spawn_callback = {
        let game_loop = game_loop.clone();
        let lifecycle = lifecycle.clone();
        Closure::wrap(Box::new(move || {
            if !lifecycle.is_running() {
                return;
            }
            if let Ok(mut game_loop) = game_loop.try_borrow_mut() {
                game_loop.game.spawn();
            }
        }) as Box<dyn FnMut()>)
    };
    let spawn_interval_id = window.set_interval_with_callback_and_timeout_and_arguments_0(
        spawn_callback.as_ref().unchecked_ref(),
        spawn_interval_ms,
    )?;

    log::info!("game started on canvas '{}'", canvas_id);

    Ok(GameHandle {
        window,
        game_loop,
        lifecycle,
        frame_id,
        frame_callback: g,
        spawn_interval_id,
        spawn_callback: Some(spawn_callback),
    })
}
