use crate::audio::AudioVoiceEngine;
use crate::constants::{CURSOR_DEFAULT, CURSOR_POINTER};
use crate::dom::{self, Listener};
use crate::frame::FrameContext;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub frame_ctx: Rc<RefCell<FrameContext>>,
}

pub fn wire_input_handlers(w: &InputWiring) -> anyhow::Result<Vec<Listener>> {
    Ok(vec![
        wire_pointermove(w)?,
        wire_pointerleave(w)?,
        wire_click(w)?,
    ])
}

fn apply_cursor(canvas: &web::HtmlCanvasElement, changed: Option<bool>) {
    if let Some(over) = changed {
        dom::set_cursor(canvas, if over { CURSOR_POINTER } else { CURSOR_DEFAULT });
    }
}

fn wire_pointermove(w: &InputWiring) -> anyhow::Result<Listener> {
    let w = w.clone();
    Listener::new(&w.canvas.clone(), "pointermove", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let point = dom::pointer_canvas_css(ev, &w.canvas);
        let changed = w.frame_ctx.borrow_mut().pointer_move(point);
        apply_cursor(&w.canvas, changed);
    })
}

fn wire_pointerleave(w: &InputWiring) -> anyhow::Result<Listener> {
    let w = w.clone();
    Listener::new(&w.canvas.clone(), "pointerleave", move |_ev: web::Event| {
        let changed = w.frame_ctx.borrow_mut().pointer_leave();
        apply_cursor(&w.canvas, changed);
    })
}

fn wire_click(w: &InputWiring) -> anyhow::Result<Listener> {
    let w = w.clone();
    Listener::new(&w.canvas.clone(), "click", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let point = dom::pointer_canvas_css(ev, &w.canvas);
        let (hit, voices) = {
            let ctx = w.frame_ctx.borrow();
            (ctx.hit(point), ctx.voices.clone())
        };
        if let Some((index, chord)) = hit {
            log::info!("[click] {} (#{})", chord.name, index);
            AudioVoiceEngine::request(&voices, index, chord);
        }
    })
}
