#![cfg(target_arch = "wasm32")]
use crate::audio::AudioVoiceEngine;
use crate::canvas::CanvasSurface;
use crate::core::InstantClock;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod audio;
mod canvas;
mod constants;
mod core;
mod dom;
mod events;
mod frame;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("chord-web loaded");
    Ok(())
}

struct Mounted {
    frame_loop: frame::FrameLoop,
    listeners: Vec<dom::Listener>,
    voices: Rc<RefCell<AudioVoiceEngine>>,
}

impl Mounted {
    fn teardown(self) {
        self.frame_loop.stop();
        drop(self.listeners);
        self.voices.borrow_mut().dispose();
    }
}

fn mount_on(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Mounted> {
    let surface = CanvasSurface::new(canvas)?;
    let clock = InstantClock::new();
    let voices = Rc::new(RefCell::new(AudioVoiceEngine::new(clock)));
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        canvas.clone(),
        surface,
        clock,
        voices.clone(),
    )));

    let mut listeners = events::wire_input_handlers(&events::InputWiring {
        canvas: canvas.clone(),
        frame_ctx: frame_ctx.clone(),
    })?;
    listeners.push(events::wire_resize(&frame_ctx)?);

    let frame_loop = frame::FrameLoop::start(frame_ctx);
    Ok(Mounted {
        frame_loop,
        listeners,
        voices,
    })
}

/// The chord web bound to one canvas. Dropping the JS handle without calling
/// `unmount` leaves it running.
#[wasm_bindgen]
pub struct ChordWeb {
    inner: Option<Mounted>,
}

#[wasm_bindgen]
impl ChordWeb {
    /// Start the simulation on `canvas`. If the canvas has no 2D context the
    /// returned handle is inert.
    #[wasm_bindgen(constructor)]
    pub fn mount(canvas: web::HtmlCanvasElement) -> ChordWeb {
        let inner = match mount_on(&canvas) {
            Ok(m) => {
                log::info!("[mount] chord web running");
                Some(m)
            }
            Err(e) => {
                log::warn!("[mount] chord web disabled: {:?}", e);
                None
            }
        };
        ChordWeb { inner }
    }

    #[wasm_bindgen(getter)]
    pub fn mounted(&self) -> bool {
        self.inner.is_some()
    }

    pub fn unmount(&mut self) {
        if let Some(m) = self.inner.take() {
            m.teardown();
            log::info!("[unmount] chord web stopped");
        }
    }
}
