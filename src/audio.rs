use crate::constants::*;
use crate::core::{
    voice_chord, ChordDefinition, Clock, InstantClock, TriggerOutcome, VoiceScheduler, Voicing,
};
use fnv::FnvHashMap;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

fn create_gain(
    audio_ctx: &web::AudioContext,
    value: f32,
    label: &str,
) -> anyhow::Result<web::GainNode> {
    let g = web::GainNode::new(audio_ctx)
        .map_err(|e| anyhow::anyhow!("{} GainNode: {:?}", label, e))?;
    g.gain().set_value(value);
    Ok(g)
}

/// Long, dark stereo impulse response generated procedurally.
fn build_impulse_response(
    audio_ctx: &web::AudioContext,
    seconds: f32,
) -> anyhow::Result<web::AudioBuffer> {
    let sr = audio_ctx.sample_rate();
    let len = (sr * seconds) as u32;
    let ir = audio_ctx
        .create_buffer(2, len, sr)
        .map_err(|e| anyhow::anyhow!("impulse buffer: {:?}", e))?;
    // xorshift32 keeps the tail identical between sessions
    let mut seeds: [u32; 2] = [0x1234ABCD, 0x7890FEDC];
    let dt = 1.0_f32 / sr;
    for (ch, seed) in seeds.iter_mut().enumerate() {
        let mut buf: Vec<f32> = Vec::with_capacity(len as usize);
        for i in 0..len as usize {
            let mut x = *seed;
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            *seed = x;
            let n = (x as f32 / u32::MAX as f32) * 2.0 - 1.0;
            let t = i as f32 * dt;
            let decay = (-t / (seconds * 0.6)).exp();
            let dark = (1.0 - t / seconds).max(0.0);
            buf.push(n * decay * (0.6 + 0.4 * dark));
        }
        ir.copy_to_channel(&mut buf, ch as i32)
            .map_err(|e| anyhow::anyhow!("impulse channel {}: {:?}", ch, e))?;
    }
    Ok(ir)
}

/// Shared effects chain: voices → lowpass → volume → dry + reverb → out, with
/// one vibrato LFO modulating every voice's detune.
pub struct SynthChain {
    ctx: web::AudioContext,
    vibrato: web::OscillatorNode,
    vibrato_depth: web::GainNode,
    filter: web::BiquadFilterNode,
    volume: web::GainNode,
    dry: web::GainNode,
    reverb: web::ConvolverNode,
    reverb_wet: web::GainNode,
}

impl SynthChain {
    pub fn new() -> anyhow::Result<Self> {
        let ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("AudioContext: {:?}", e))?;
        let destination = ctx.destination();

        let filter = web::BiquadFilterNode::new(&ctx)
            .map_err(|e| anyhow::anyhow!("BiquadFilterNode: {:?}", e))?;
        filter.set_type(web::BiquadFilterType::Lowpass);
        filter.frequency().set_value(LOWPASS_HZ);
        filter.q().set_value(LOWPASS_Q);

        let volume = create_gain(&ctx, VOLUME_GAIN, "volume")?;
        let dry = create_gain(&ctx, 1.0 - REVERB_WET, "dry")?;
        let reverb_wet = create_gain(&ctx, REVERB_WET, "reverb wet")?;
        let reverb =
            web::ConvolverNode::new(&ctx).map_err(|e| anyhow::anyhow!("ConvolverNode: {:?}", e))?;
        reverb.set_normalize(true);
        reverb.set_buffer(Some(&build_impulse_response(&ctx, REVERB_DECAY_SEC)?));

        _ = filter.connect_with_audio_node(&volume);
        _ = volume.connect_with_audio_node(&dry);
        _ = dry.connect_with_audio_node(&destination);
        _ = volume.connect_with_audio_node(&reverb);
        _ = reverb.connect_with_audio_node(&reverb_wet);
        _ = reverb_wet.connect_with_audio_node(&destination);

        let vibrato =
            web::OscillatorNode::new(&ctx).map_err(|e| anyhow::anyhow!("vibrato LFO: {:?}", e))?;
        vibrato.set_type(web::OscillatorType::Sine);
        vibrato.frequency().set_value(VIBRATO_RATE_HZ);
        let vibrato_depth = create_gain(&ctx, VIBRATO_DEPTH_CENTS, "vibrato depth")?;
        _ = vibrato.connect_with_audio_node(&vibrato_depth);
        _ = vibrato.start();

        Ok(Self {
            ctx,
            vibrato,
            vibrato_depth,
            filter,
            volume,
            dry,
            reverb,
            reverb_wet,
        })
    }

    pub fn is_running(&self) -> bool {
        self.ctx.state() == web::AudioContextState::Running
    }

    /// Sustained chord: one oscillator and envelope per voiced note.
    pub fn play(&self, voicing: &Voicing) {
        if voicing.is_empty() {
            return;
        }
        let peak = NOTE_PEAK_GAIN / (voicing.len() as f32).sqrt();
        let t0 = self.ctx.current_time() + 0.01;
        let t_hold = t0 + ATTACK_SEC + HOLD_SEC;
        let t_end = t_hold + RELEASE_SEC;
        for note in voicing {
            let Ok(osc) = web::OscillatorNode::new(&self.ctx) else {
                continue;
            };
            osc.set_type(web::OscillatorType::Triangle);
            osc.frequency().set_value(note.frequency_hz());
            _ = self.vibrato_depth.connect_with_audio_param(&osc.detune());
            let Ok(env) = create_gain(&self.ctx, 0.0, "note envelope") else {
                continue;
            };
            _ = env.gain().set_value_at_time(0.0, t0);
            _ = env.gain().linear_ramp_to_value_at_time(peak, t0 + ATTACK_SEC);
            _ = env.gain().set_value_at_time(peak, t_hold);
            _ = env.gain().linear_ramp_to_value_at_time(0.0, t_end);
            _ = osc.connect_with_audio_node(&env);
            _ = env.connect_with_audio_node(&self.filter);
            _ = osc.start_with_when(t0);
            _ = osc.stop_with_when(t_end + 0.05);
        }
    }

    pub fn dispose(&self) {
        _ = self.vibrato.stop();
        _ = self.vibrato.disconnect();
        _ = self.vibrato_depth.disconnect();
        _ = self.filter.disconnect();
        _ = self.volume.disconnect();
        _ = self.dry.disconnect();
        _ = self.reverb.disconnect();
        _ = self.reverb_wet.disconnect();
        _ = self.ctx.close();
    }
}

/// Owns the synth chain and the polyphony budget. Accepted triggers are queued
/// in `started` for the frame loop to stamp on the scene.
pub struct AudioVoiceEngine {
    chain: Option<SynthChain>,
    scheduler: VoiceScheduler,
    // Pending release timeouts with the callbacks they own.
    timers: FnvHashMap<usize, (i32, Closure<dyn FnMut()>)>,
    // Callbacks that already fired; dropped outside their own invocation.
    spent: Vec<Closure<dyn FnMut()>>,
    started: Vec<(usize, f64)>,
    clock: InstantClock,
    disposed: bool,
}

impl AudioVoiceEngine {
    pub fn new(clock: InstantClock) -> Self {
        Self {
            chain: None,
            scheduler: VoiceScheduler::default(),
            timers: FnvHashMap::default(),
            spent: Vec::new(),
            started: Vec::new(),
            clock,
            disposed: false,
        }
    }

    pub fn take_started(&mut self) -> Vec<(usize, f64)> {
        std::mem::take(&mut self.started)
    }

    fn ensure_chain(&mut self) -> anyhow::Result<&SynthChain> {
        if self.chain.is_none() {
            self.chain = Some(SynthChain::new()?);
            log::info!("audio chain created");
        }
        self.chain
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("audio chain missing"))
    }

    /// Click path. Starts audio lazily; a trigger that cannot get a running
    /// context is dropped.
    pub fn request(engine: &Rc<RefCell<Self>>, index: usize, chord: &'static ChordDefinition) {
        let resume: Option<js_sys::Promise> = {
            let mut e = engine.borrow_mut();
            if e.disposed || e.scheduler.is_playing(index) {
                return;
            }
            let chain = match e.ensure_chain() {
                Ok(c) => c,
                Err(err) => {
                    log::error!("audio unavailable: {:?}", err);
                    return;
                }
            };
            if chain.is_running() {
                None
            } else {
                match chain.ctx.resume() {
                    Ok(p) => Some(p),
                    Err(err) => {
                        log::debug!("audio resume refused: {:?}", err);
                        return;
                    }
                }
            }
        };

        let Some(promise) = resume else {
            Self::trigger(engine, index, chord);
            return;
        };
        let engine = engine.clone();
        spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                log::debug!("audio resume rejected, dropping {}: {:?}", chord.name, err);
                return;
            }
            let running = engine
                .borrow()
                .chain
                .as_ref()
                .map_or(false, SynthChain::is_running);
            if running {
                Self::trigger(&engine, index, chord);
            } else {
                log::debug!("audio still suspended, dropping {}", chord.name);
            }
        });
    }

    fn trigger(engine: &Rc<RefCell<Self>>, index: usize, chord: &'static ChordDefinition) {
        let delay_ms = {
            let mut e = engine.borrow_mut();
            if e.disposed {
                return;
            }
            let now = e.clock.now_ms();
            match e.scheduler.try_trigger(index, now) {
                TriggerOutcome::Accepted => {}
                outcome => {
                    log::debug!("{} not triggered: {:?}", chord.name, outcome);
                    return;
                }
            }
            e.started.push((index, now));
            if let Some(chain) = &e.chain {
                chain.play(&voice_chord(chord));
            }
            log::info!("voice on: {} ({} active)", chord.name, e.scheduler.active_count());
            e.scheduler.release_ms()
        };
        Self::schedule_release(engine, index, delay_ms);
    }

    fn schedule_release(engine: &Rc<RefCell<Self>>, index: usize, delay_ms: f64) {
        let weak = Rc::downgrade(engine);
        let callback: Closure<dyn FnMut()> = Closure::once(move || {
            if let Some(engine) = weak.upgrade() {
                let mut e = engine.borrow_mut();
                if let Some((_, cb)) = e.timers.remove(&index) {
                    e.spent.push(cb);
                }
                if e.scheduler.release(index) {
                    log::debug!("voice off: {}", index);
                }
            }
        });
        let handle = web::window().ok_or_else(|| anyhow::anyhow!("no window")).and_then(|w| {
            w.set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay_ms as i32,
            )
            .map_err(|e| anyhow::anyhow!("{:?}", e))
        });
        let mut e = engine.borrow_mut();
        e.spent.clear();
        match handle {
            Ok(h) => {
                e.timers.insert(index, (h, callback));
            }
            Err(err) => {
                // No timer means no release; free the slot now.
                log::error!("release timer: {:?}", err);
                e.scheduler.release(index);
            }
        }
    }

    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        if let Some(w) = web::window() {
            for (handle, _) in self.timers.values() {
                w.clear_timeout_with_handle(*handle);
            }
        }
        self.timers.clear();
        self.spent.clear();
        self.scheduler.clear();
        self.started.clear();
        if let Some(chain) = self.chain.take() {
            chain.dispose();
        }
        log::info!("audio disposed");
    }
}
