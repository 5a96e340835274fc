//! Gap Glider entry point
//!
//! Handles platform-specific initialization and drives the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

    use gap_glider::audio::WebAudio;
    use gap_glider::best_score::LocalStorageStore;
    use gap_glider::platform::Viewport;
    use gap_glider::renderer::CanvasSurface;
    use gap_glider::schedule::{TaskKind, TaskSlots, Ticket};
    use gap_glider::{CountdownStep, FrameStep, Game, Settings, Tuning};

    /// Host handle for a scheduled callback
    #[derive(Debug, Clone, Copy)]
    enum Handle {
        AnimationFrame(i32),
        Interval(i32),
    }

    /// Browser shell: the session plus everything tied to the page
    struct Shell {
        game: Game<WebAudio, LocalStorageStore>,
        surface: CanvasSurface,
        settings: Settings,
        tasks: TaskSlots<Handle>,
    }

    type SharedShell = Rc<RefCell<Shell>>;

    fn window() -> web_sys::Window {
        web_sys::window().expect("no window")
    }

    fn cancel(handle: Handle) {
        match handle {
            Handle::AnimationFrame(id) => {
                let _ = window().cancel_animation_frame(id);
            }
            Handle::Interval(id) => window().clear_interval_with_handle(id),
        }
    }

    impl Shell {
        /// Cancel host callbacks whose tickets were invalidated
        fn cancel_stale(&mut self) {
            for (kind, handle) in self.tasks.take_stale(&self.game) {
                log::debug!("Cancelling stale {kind:?} task");
                cancel(handle);
            }
        }

        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.game.audio_mut().set_muted(self.settings.muted);
            self.settings.save();
            log::info!("Audio {}", if self.settings.muted { "muted" } else { "unmuted" });
        }

        fn toggle_reduced_motion(&mut self) {
            self.settings.reduced_motion = !self.settings.reduced_motion;
            self.game.set_motion_fx(self.settings.motion_fx());
            self.settings.save();
        }

        fn update_hud(&self) {
            let document = window().document().expect("no document");
            let hud = self.game.hud();

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&hud.score_text));
                if let Ok(el) = el.dyn_into::<HtmlElement>() {
                    let _ = el
                        .style()
                        .set_property("transform", &format!("scale({})", hud.score_scale));
                }
            }
            for id in ["high-score", "high-scores"] {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(&hud.best_text));
                }
            }

            if let Some(el) = document.get_element_by_id("start-screen") {
                set_hidden(&el, !hud.start_screen_visible);
                if let Some(text) = &hud.countdown_text {
                    el.set_inner_html(&format!("<h1>{text}</h1>"));
                }
            }

            if let Some(el) = document.get_element_by_id("game-over-screen") {
                set_hidden(&el, !hud.game_over_visible);
            }
            if let Some(el) = document.get_element_by_id("final-score") {
                el.set_text_content(Some(&hud.final_score_text));
            }
        }
    }

    fn set_hidden(el: &web_sys::Element, hidden: bool) {
        let classes = el.class_list();
        let _ = if hidden {
            classes.add_1("hidden")
        } else {
            classes.remove_1("hidden")
        };
    }

    fn viewport_for_window() -> Viewport {
        let w = window();
        let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(480.0);
        let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(640.0);
        Viewport::fit_window(width as f32, height as f32)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Gap Glider starting...");

        let document = window().document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let viewport = viewport_for_window();
        let surface = CanvasSurface::new(canvas.clone()).map_err(|e| e.to_string())?;
        surface.resize(viewport);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Game::new(
            viewport,
            Tuning::load(),
            &settings,
            WebAudio::new(&settings),
            LocalStorageStore,
            seed,
        );

        let shell = Rc::new(RefCell::new(Shell {
            game,
            surface,
            settings,
            tasks: TaskSlots::new(),
        }));
        shell.borrow().update_hud();

        setup_input_handlers(&canvas, shell.clone());
        setup_buttons(shell.clone());
        setup_resize(shell.clone());

        log::info!("Gap Glider ready");
        Ok(())
    }

    /// Cancel leftovers and schedule the countdown for `ticket`
    fn begin_countdown(shell: &SharedShell, ticket: Ticket) {
        let interval_ms = shell.borrow().game.state().tuning.countdown_interval_ms as i32;
        let callback_shell = shell.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            countdown_fired(&callback_shell, ticket);
        });
        let id = window().set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            interval_ms,
        );
        closure.forget();

        let mut s = shell.borrow_mut();
        s.cancel_stale();
        match id {
            Ok(id) => {
                if let Some(old) = s.tasks.replace(ticket, Handle::Interval(id)) {
                    cancel(old);
                }
            }
            Err(e) => log::error!("Failed to schedule countdown: {e:?}"),
        }
        s.update_hud();
    }

    fn countdown_fired(shell: &SharedShell, ticket: Ticket) {
        let step = shell.borrow_mut().game.countdown_step(ticket);
        match step {
            CountdownStep::Tick { .. } => shell.borrow().update_hud(),
            CountdownStep::Go(frame) => {
                {
                    let mut s = shell.borrow_mut();
                    if let Some(handle) = s.tasks.clear(TaskKind::Countdown) {
                        cancel(handle);
                    }
                    s.update_hud();
                }
                request_frame(shell.clone(), frame);
            }
            CountdownStep::Stale => shell.borrow_mut().cancel_stale(),
        }
    }

    fn request_frame(shell: SharedShell, ticket: Ticket) {
        let callback_shell = shell.clone();
        let closure = Closure::once(move |time: f64| {
            frame_fired(callback_shell, ticket, time);
        });
        let id = window().request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();

        match id {
            Ok(id) => {
                shell
                    .borrow_mut()
                    .tasks
                    .replace(ticket, Handle::AnimationFrame(id));
            }
            Err(e) => log::error!("Failed to request animation frame: {e:?}"),
        }
    }

    fn frame_fired(shell: SharedShell, ticket: Ticket, time: f64) {
        let step = {
            let mut s = shell.borrow_mut();
            s.tasks.clear(TaskKind::Frame);
            let Shell { game, surface, .. } = &mut *s;
            let step = game.frame(ticket, surface, time);
            s.update_hud();
            step
        };

        match step {
            FrameStep::Continue(next) => request_frame(shell, next),
            FrameStep::Ended { score, new_best } => {
                log::info!("Game over: score {score}{}", if new_best { " (new best!)" } else { "" });
            }
            FrameStep::Stale => {}
        }
    }

    fn jump(shell: &SharedShell) {
        shell.borrow_mut().game.jump();
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, shell: SharedShell) {
        // Space bar jumps, M mutes, R toggles reduced motion
        {
            let shell = shell.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.code().as_str() {
                    "Space" => jump(&shell),
                    "KeyM" => shell.borrow_mut().toggle_mute(),
                    "KeyR" => {
                        let mut s = shell.borrow_mut();
                        s.toggle_reduced_motion();
                        s.update_hud();
                    }
                    _ => {}
                }
            });
            let _ = window()
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer press
        {
            let shell = shell.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                jump(&shell);
            });
            let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                jump(&shell);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(shell: SharedShell) {
        let document = window().document().expect("no document");

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let shell = shell.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let ticket = shell.borrow_mut().game.start();
                if let Some(ticket) = ticket {
                    begin_countdown(&shell, ticket);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let ticket = shell.borrow_mut().game.restart();
                match ticket {
                    Some(ticket) => begin_countdown(&shell, ticket),
                    None => shell.borrow_mut().cancel_stale(),
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(shell: SharedShell) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let viewport = viewport_for_window();
            let mut s = shell.borrow_mut();
            s.surface.resize(viewport);
            s.game.resize(viewport);
            s.cancel_stale();
            s.update_hud();
        });
        let _ = window().add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Gap Glider (native) starting...");
    log::info!("Native mode runs a headless autopilot - build for wasm32 to play");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2024);
    let tuning = args
        .next()
        .map(|path| gap_glider::Tuning::load_file(std::path::Path::new(&path)))
        .unwrap_or_default();
    demo::run(seed, tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use gap_glider::audio::SilentAudio;
    use gap_glider::best_score::MemoryStore;
    use gap_glider::platform::{BestScoreStore, Viewport};
    use gap_glider::renderer::NullSurface;
    use gap_glider::sim::GameState;
    use gap_glider::{CountdownStep, FrameStep, Game, Settings, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 60 * 5;
    const RUNS: u32 = 3;

    /// Jump when the actor sinks below the centre of the next gap
    fn wants_jump(state: &GameState) -> bool {
        let pipe_width = state.tuning.pipe_width;
        let actor = state.actor.bounds();
        let target = state
            .obstacles
            .iter()
            .find(|o| o.right(pipe_width) > actor.left())
            .map(|o| (o.top_height + o.bottom_y) / 2.0)
            .unwrap_or(state.viewport.height / 2.0);
        actor.top() + actor.size.y / 2.0 > target + 10.0 && state.actor.velocity_y >= 0.0
    }

    pub fn run(seed: u64, tuning: Tuning) {
        let mut game = Game::new(
            Viewport::default(),
            tuning,
            &Settings::default(),
            SilentAudio,
            MemoryStore::new(),
            seed,
        );
        let mut surface = NullSurface::default();
        let mut time_ms = 0.0;

        for run in 1..=RUNS {
            let Some(countdown) = (if run == 1 { game.start() } else { game.restart() }) else {
                log::error!("Could not start run {run}");
                return;
            };

            let mut ticket = loop {
                match game.countdown_step(countdown) {
                    CountdownStep::Tick { remaining } => log::info!("{remaining}..."),
                    CountdownStep::Go(frame) => break frame,
                    CountdownStep::Stale => {
                        log::error!("Countdown went stale");
                        return;
                    }
                }
            };

            for _ in 0..MAX_FRAMES {
                if wants_jump(game.state()) {
                    game.jump();
                }
                time_ms += FRAME_MS;
                match game.frame(ticket, &mut surface, time_ms) {
                    FrameStep::Continue(next) => ticket = next,
                    FrameStep::Ended { score, new_best } => {
                        log::info!(
                            "Run {run}: score {score}{}",
                            if new_best { " (new best)" } else { "" }
                        );
                        break;
                    }
                    FrameStep::Stale => break,
                }
            }
        }

        log::info!(
            "Best score {} ({} writes), {} frames drawn",
            game.best_score(),
            game.store().writes.len(),
            surface.frames
        );
        debug_assert_eq!(game.store().load().unwrap_or(0), game.best_score());
    }
}
