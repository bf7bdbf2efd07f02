use crate::audio::AudioVoiceEngine;
use crate::canvas::CanvasSurface;
use crate::core::input::{hit_test, HoverTracker};
use crate::core::resize::ResizeDebouncer;
use crate::core::{collision, physics};
use crate::core::{
    render_frame, ChordDefinition, Clock, FrameStats, InstantClock, SceneState, SimParams, CHORDS,
};
use crate::dom;
use glam::Vec2;
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything the render loop and the pointer handlers share. Only `frame`
/// writes particle kinematics and the display caches.
pub struct FrameContext {
    pub canvas: web::HtmlCanvasElement,
    pub surface: CanvasSurface,
    pub scene: SceneState<web::CanvasGradient>,
    pub params: SimParams,
    pub rng: StdRng,
    pub clock: InstantClock,
    pub last_instant: Instant,
    pub resize: ResizeDebouncer,
    pub hover: HoverTracker,
    pub stats: FrameStats,
    pub voices: Rc<RefCell<AudioVoiceEngine>>,
}

impl FrameContext {
    pub fn new(
        canvas: web::HtmlCanvasElement,
        surface: CanvasSurface,
        clock: InstantClock,
        voices: Rc<RefCell<AudioVoiceEngine>>,
    ) -> Self {
        Self {
            canvas,
            surface,
            scene: SceneState::default(),
            params: SimParams::default(),
            rng: StdRng::from_entropy(),
            clock,
            last_instant: Instant::now(),
            resize: ResizeDebouncer::default(),
            hover: HoverTracker::default(),
            stats: FrameStats::default(),
            voices,
        }
    }

    pub fn frame(&mut self) {
        let now_instant = Instant::now();
        let dt_ms = (now_instant - self.last_instant).as_secs_f64() * 1000.0;
        self.last_instant = now_instant;
        let now = self.clock.now_ms();

        if self.resize.poll(now) || self.scene.is_empty() {
            self.relayout();
        }

        for (index, t) in self.voices.borrow_mut().take_started() {
            self.scene.mark_playing(index, t);
        }

        physics::step(&mut self.scene, &self.params, dt_ms, &mut self.rng);
        collision::resolve(&mut self.scene, &self.params, now);
        let stats = render_frame(&mut self.scene, &mut self.surface, &self.params, now);
        if stats.culled != self.stats.culled {
            log::debug!(
                "[frame] drawn {} culled {} edges {}",
                stats.drawn,
                stats.culled,
                stats.edges
            );
        }
        self.stats = stats;
    }

    fn relayout(&mut self) {
        let (css, dpr) = dom::sync_canvas_backing_size(&self.canvas);
        self.surface.resize(css, dpr);
        self.scene = SceneState::layout(CHORDS, css.x, css.y, &mut self.rng);
        log::info!(
            "[layout] {} chords on {:.0}x{:.0} @{}x",
            self.scene.len(),
            css.x,
            css.y,
            dpr
        );
    }

    pub fn notify_resize(&mut self) {
        let now = self.clock.now_ms();
        self.resize.notify(now);
    }

    /// Returns the new hover state when it flips.
    pub fn pointer_move(&mut self, point: Vec2) -> Option<bool> {
        let over = hit_test(&self.scene, point, &self.params).is_some();
        self.hover.update(over)
    }

    pub fn pointer_leave(&mut self) -> Option<bool> {
        self.hover.update(false)
    }

    pub fn hit(&self, point: Vec2) -> Option<(usize, &'static ChordDefinition)> {
        let index = hit_test(&self.scene, point, &self.params)?;
        Some((index, self.scene.particles[index].chord))
    }
}

fn request_frame(tick: &Closure<dyn FnMut()>) -> Option<i32> {
    web::window()?
        .request_animation_frame(tick.as_ref().unchecked_ref())
        .ok()
}

/// requestAnimationFrame loop that can be cancelled.
pub struct FrameLoop {
    raf_id: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl FrameLoop {
    pub fn start(frame_ctx: Rc<RefCell<FrameContext>>) -> Self {
        let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let raf_id = Rc::new(Cell::new(None));
        let tick_clone = tick.clone();
        let raf_clone = raf_id.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            raf_clone.set(None);
            frame_ctx.borrow_mut().frame();
            if let Some(cb) = tick_clone.borrow().as_ref() {
                raf_clone.set(request_frame(cb));
            }
        }) as Box<dyn FnMut()>));
        if let Some(cb) = tick.borrow().as_ref() {
            raf_id.set(request_frame(cb));
        }
        Self { raf_id, tick }
    }

    pub fn stop(&self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        // Dropping the closure breaks its self-reference.
        self.tick.borrow_mut().take();
    }
}
