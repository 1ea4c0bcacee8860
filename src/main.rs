//! Lane Racer entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, KeyboardEvent};

    use lane_racer::audio::{AudioManager, SoundEffect};
    use lane_racer::render::{Scene, Shape, build_scene};
    use lane_racer::sim::{self, GameState, LaneGrid, TickOutcome};
    use lane_racer::{
        Command, Frame, HighScores, LoopController, Presenter, RunSummary, TickScheduler,
        TickToken, Tuning,
    };

    type Controller = LoopController<AnimationFrameScheduler, CanvasPresenter>;

    /// Requests each tick as an animation frame
    struct AnimationFrameScheduler {
        game: Weak<RefCell<Game>>,
    }

    impl TickScheduler for AnimationFrameScheduler {
        fn request_tick(&mut self, token: TickToken) {
            let Some(window) = web_sys::window() else {
                log::error!("No window, tick {} not scheduled", token.id());
                return;
            };
            let game = self.game.clone();
            let closure = Closure::once(move |_time: f64| {
                if let Some(game) = game.upgrade() {
                    game.borrow_mut().on_frame(token);
                }
            });
            if window
                .request_animation_frame(closure.as_ref().unchecked_ref())
                .is_err()
            {
                log::error!("requestAnimationFrame failed for tick {}", token.id());
            }
            closure.forget();
        }
    }

    /// Paints scenes on a 2D canvas and drives the score/start DOM elements
    struct CanvasPresenter {
        ctx: CanvasRenderingContext2d,
        grid: LaneGrid,
        tuning: Tuning,
        score_el: Option<Element>,
        best_el: Option<Element>,
        start_btn: Option<Element>,
        last_summary: Option<RunSummary>,
    }

    impl CanvasPresenter {
        fn new(ctx: CanvasRenderingContext2d, tuning: Tuning, document: &Document) -> Self {
            Self {
                ctx,
                grid: LaneGrid::from_tuning(&tuning),
                tuning,
                score_el: document.get_element_by_id("score"),
                best_el: document.get_element_by_id("best"),
                start_btn: document.get_element_by_id("start-btn"),
                last_summary: None,
            }
        }

        fn paint(&self, scene: &Scene) {
            let ctx = &self.ctx;
            ctx.clear_rect(0.0, 0.0, scene.size.x as f64, scene.size.y as f64);

            for shape in &scene.shapes {
                match *shape {
                    Shape::Fill { rect, color, glow } => {
                        ctx.save();
                        if let Some(glow) = glow {
                            ctx.set_shadow_color(glow.color);
                            ctx.set_shadow_blur(glow.blur as f64);
                        }
                        ctx.set_fill_style_str(color);
                        ctx.fill_rect(
                            rect.pos.x as f64,
                            rect.pos.y as f64,
                            rect.size.x as f64,
                            rect.size.y as f64,
                        );
                        ctx.restore();
                    }
                    Shape::Stroke { rect, color, width } => {
                        ctx.set_stroke_style_str(color);
                        ctx.set_line_width(width as f64);
                        ctx.stroke_rect(
                            rect.pos.x as f64,
                            rect.pos.y as f64,
                            rect.size.x as f64,
                            rect.size.y as f64,
                        );
                    }
                    Shape::DashedLine {
                        from,
                        to,
                        color,
                        width,
                        dash,
                    } => {
                        let pattern = js_sys::Array::of2(
                            &JsValue::from_f64(dash[0] as f64),
                            &JsValue::from_f64(dash[1] as f64),
                        );
                        let _ = ctx.set_line_dash(&pattern);
                        ctx.set_stroke_style_str(color);
                        ctx.set_line_width(width as f64);
                        ctx.begin_path();
                        ctx.move_to(from.x as f64, from.y as f64);
                        ctx.line_to(to.x as f64, to.y as f64);
                        ctx.stroke();
                        let _ = ctx.set_line_dash(&js_sys::Array::new());
                    }
                }
            }
        }

        fn set_score(&self, score: u64) {
            if let Some(el) = &self.score_el {
                el.set_text_content(Some(&format!("Score: {}", score)));
            }
        }

        fn set_best(&self, best: Option<u64>) {
            if let Some(el) = &self.best_el {
                match best {
                    Some(best) => {
                        el.set_text_content(Some(&format!("Best: {}", best)));
                        let _ = el.set_attribute("class", "");
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }
        }

        fn show_start_button(&self, label: &str) {
            if let Some(btn) = &self.start_btn {
                btn.set_text_content(Some(label));
                let _ = btn.set_attribute("class", "");
            }
        }

        fn hide_start_button(&self) {
            if let Some(btn) = &self.start_btn {
                let _ = btn.set_attribute("class", "hidden");
            }
        }

        fn take_summary(&mut self) -> Option<RunSummary> {
            self.last_summary.take()
        }
    }

    impl Presenter for CanvasPresenter {
        fn run_started(&mut self) {
            self.hide_start_button();
            self.set_score(0);
            self.last_summary = None;
        }

        fn present(&mut self, frame: &Frame<'_>) {
            let scene = build_scene(&self.grid, &self.tuning, frame);
            self.paint(&scene);
            self.set_score(frame.score);
        }

        fn run_ended(&mut self, summary: &RunSummary) {
            self.set_score(summary.final_score);
            self.show_start_button("Restart");
            self.last_summary = Some(*summary);
        }
    }

    /// Game instance holding all state
    struct Game {
        controller: Controller,
        audio: AudioManager,
        high_scores: HighScores,
        /// Idle/demo mode - autopilot drives the car
        autopilot: bool,
    }

    impl Game {
        /// Draw the road before the first run
        fn paint_idle(&self) {
            let presenter = self.controller.presenter();
            let state = self.controller.state();
            let scene = build_scene(&state.grid, &state.tuning, &Frame::of(state));
            presenter.paint(&scene);
            presenter.set_score(0);
            presenter.set_best(None);
            presenter.show_start_button("Start");
        }

        fn command(&mut self, command: Command) {
            if !self.controller.handle(command) {
                return;
            }
            match command {
                Command::Start => self.audio.play(SoundEffect::Start),
                Command::MoveLeft | Command::MoveRight => {
                    self.audio.play(SoundEffect::LaneChange)
                }
            }
        }

        fn on_frame(&mut self, token: TickToken) {
            if self.autopilot {
                if let Some(steer) = sim::suggest(self.controller.state()) {
                    self.controller.steer(steer);
                }
            }

            if let Some(TickOutcome::Crashed { .. }) = self.controller.on_tick(token) {
                self.audio.play(SoundEffect::Crash);
                if let Some(summary) = self.controller.presenter_mut().take_summary() {
                    let rank = self.high_scores.record(&summary);
                    if rank == Some(1) && self.high_scores.entries.len() > 1 {
                        self.audio.play(SoundEffect::NewBest);
                    }
                    self.controller
                        .presenter()
                        .set_best(self.high_scores.top_score());
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Lane Racer starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let tuning = Tuning::load();
        canvas.set_width(tuning.canvas_width as u32);
        canvas.set_height(tuning.canvas_height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let presenter = CanvasPresenter::new(ctx, tuning, &document);
        let game = Rc::new_cyclic(|weak: &Weak<RefCell<Game>>| {
            let scheduler = AnimationFrameScheduler { game: weak.clone() };
            RefCell::new(Game {
                controller: LoopController::new(
                    GameState::new(seed, tuning),
                    scheduler,
                    presenter,
                ),
                audio: AudioManager::new(),
                high_scores: HighScores::new(),
                autopilot: false,
            })
        });

        log::info!("Game initialized with seed: {}", seed);

        game.borrow().paint_idle();

        setup_start_button(&document, game.clone());
        setup_keyboard(game);

        log::info!("Lane Racer ready!");
    }

    fn setup_start_button(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().command(Command::Start);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            match event.key().as_str() {
                "ArrowLeft" => {
                    event.prevent_default();
                    g.command(Command::MoveLeft);
                }
                "ArrowRight" => {
                    event.prevent_default();
                    g.command(Command::MoveRight);
                }
                " " | "Enter" => g.command(Command::Start),
                "i" | "I" => {
                    g.autopilot = !g.autopilot;
                    log::info!("Autopilot: {}", g.autopilot);
                }
                "m" | "M" => {
                    let muted = g.audio.toggle_muted();
                    log::info!("Muted: {}", muted);
                }
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use lane_racer::sim::{self, GameState, TickOutcome};
    use lane_racer::{Frame, HighScores, LoopController, ManualScheduler, Presenter, RunSummary, Tuning};

    /// Stop a run that the autopilot keeps alive this long
    const MAX_TICKS_PER_RUN: u64 = 50_000;
    const PROGRESS_EVERY: u64 = 1_000;

    #[derive(Default)]
    struct LogPresenter {
        last_summary: Option<RunSummary>,
    }

    impl Presenter for LogPresenter {
        fn present(&mut self, frame: &Frame<'_>) {
            if frame.score > 0 && frame.score % PROGRESS_EVERY == 0 {
                log::debug!(
                    "score {} speed {:.3} traffic {}",
                    frame.score,
                    frame.speed,
                    frame.obstacles.len()
                );
            }
        }

        fn run_ended(&mut self, summary: &RunSummary) {
            self.last_summary = Some(*summary);
        }
    }

    /// Play `runs` autopilot games back to back
    pub fn run(tuning: Tuning, seed: u64, runs: u32) {
        let mut controller = LoopController::new(
            GameState::new(seed, tuning),
            ManualScheduler::new(),
            LogPresenter::default(),
        );
        let mut high_scores = HighScores::new();

        for run in 1..=runs {
            controller.start();

            loop {
                if let Some(steer) = sim::suggest(controller.state()) {
                    controller.steer(steer);
                }
                match controller.pump() {
                    Some(TickOutcome::Advanced { score, .. }) if score >= MAX_TICKS_PER_RUN => {
                        log::warn!("Run {} still alive at {} ticks, stopping", run, score);
                        controller.stop();
                        // Drop the callback queued for the stopped run
                        controller.scheduler_mut().clear();
                        break;
                    }
                    Some(TickOutcome::Advanced { .. }) => {}
                    _ => break,
                }
            }

            if let Some(summary) = controller.presenter_mut().last_summary.take() {
                let rank = high_scores.record(&summary);
                log::info!(
                    "Run {}: score {}, top speed {:.3}, rank {:?}",
                    run,
                    summary.final_score,
                    summary.top_speed,
                    rank
                );
            }
        }

        if let Some(best) = high_scores.top_score() {
            println!("Best of {} runs: {}", runs, best);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Lane Racer (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);

    let tuning = match args.next() {
        Some(path) => match lane_racer::Tuning::from_file(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Failed to load tuning from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => lane_racer::Tuning::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Seed: {}", seed);

    headless::run(tuning, seed, 3);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
