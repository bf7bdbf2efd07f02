pub mod pointer;

use crate::dom::Listener;
use crate::frame::FrameContext;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub use pointer::{wire_input_handlers, InputWiring};

/// Window resizes only arm the debouncer; the frame loop re-lays out once the
/// burst has gone quiet.
pub fn wire_resize(frame_ctx: &Rc<RefCell<FrameContext>>) -> anyhow::Result<Listener> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let frame_ctx = frame_ctx.clone();
    Listener::new(&window, "resize", move |_ev: web::Event| {
        frame_ctx.borrow_mut().notify_resize();
    })
}
