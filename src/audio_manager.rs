//! Optional sound: coin pickups, the finish jingle, footsteps and music.
//!
//! Every file is optional and a missing output device disables audio, so the
//! game never depends on sound being available.
use std::{fs::File, io::Read, io::BufReader, time::{Instant, Duration}, sync::Arc};
use std::io::Cursor;

use rodio::{OutputStream, OutputStreamHandle, Sink, Decoder, Source};

use crate::core::session::TickEvents;

fn load_bytes(path: &str) -> Option<Vec<u8>> {
    let mut f = File::open(path).ok()?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf).ok()?;
    Some(buf)
}

fn load_bytes_any(paths: &[&str]) -> Option<Arc<Vec<u8>>> {
    paths.iter().find_map(|p| load_bytes(p)).map(Arc::new)
}

pub struct AudioManager {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    bg_sink: Option<Sink>,
    foot_sink: Sink,
    coin: Option<Arc<Vec<u8>>>,
    finish: Option<Arc<Vec<u8>>>,
    step: Option<Arc<Vec<u8>>>,
    last_step: Instant,
    step_interval_walk: Duration,
    step_interval_sprint: Duration,
}

impl AudioManager {
    /// `None` when there is no usable output device.
    pub fn new() -> Option<Self> {
        let (_stream, handle) = match OutputStream::try_default() {
            Ok(pair) => pair,
            Err(e) => {
                log::warn!("audio disabled: {e}");
                return None;
            }
        };
        let foot_sink = Sink::try_new(&handle).ok()?;
        let mut audio = Self {
            _stream,
            handle,
            bg_sink: None,
            foot_sink,
            coin: None,
            finish: None,
            step: None,
            last_step: Instant::now(),
            step_interval_walk: Duration::from_millis(260),
            step_interval_sprint: Duration::from_millis(170),
        };
        audio.load_sfx_auto();
        Some(audio)
    }

    fn load_sfx_auto(&mut self) {
        self.coin = load_bytes_any(&["Assets/coin.wav", "Assets/sounds/coin.wav", "Assets/coin.ogg"]);
        self.finish = load_bytes_any(&["Assets/finish.wav", "Assets/sounds/finish.wav", "Assets/win.ogg"]);
        self.step = load_bytes_any(&["Assets/step.wav", "Assets/sounds/step.wav", "Assets/sounds/footstep.wav"]);
        log::debug!(
            "sfx loaded: coin={} finish={} step={}",
            self.coin.is_some(),
            self.finish.is_some(),
            self.step.is_some()
        );
    }

    pub fn play_music_loop_auto(&mut self) {
        if self.bg_sink.is_some() { return; }
        let Some(bytes) = load_bytes_any(&["Assets/music.ogg", "Assets/sounds/music.wav"]) else { return };
        if let Ok(dec) = Decoder::new_looped(Cursor::new(bytes.as_ref().clone())) {
            if let Ok(sink) = Sink::try_new(&self.handle) {
                sink.append(dec);
                sink.set_volume(0.35);
                self.bg_sink = Some(sink);
            }
        }
    }

    /// Each one-shot gets its own detached sink so overlapping sounds all play.
    fn play_detached(&self, data: Option<&Arc<Vec<u8>>>, volume: f32) {
        let Some(d) = data else { return };
        if let Ok(dec) = Decoder::new(BufReader::new(Cursor::new(d.as_ref().clone()))) {
            if let Ok(sink) = Sink::try_new(&self.handle) {
                sink.append(dec.amplify(volume.clamp(0.0, 2.5)));
                sink.detach();
            }
        }
    }

    fn play_step(&mut self, sprinting: bool) {
        let interval = if sprinting { self.step_interval_sprint } else { self.step_interval_walk };
        if self.last_step.elapsed() < interval { return; }
        self.last_step = Instant::now();
        if let Some(d) = self.step.clone() {
            if let Ok(dec) = Decoder::new(BufReader::new(Cursor::new(d.as_ref().clone()))) {
                self.foot_sink.append(dec);
            }
        }
    }

    fn stop_steps(&mut self) {
        self.foot_sink.stop();
        if let Ok(new_sink) = Sink::try_new(&self.handle) {
            self.foot_sink = new_sink;
        }
    }

    /// Reacts to what happened during the last session tick.
    pub fn on_tick(&mut self, events: &TickEvents, sprinting: bool) {
        if events.coin_collected {
            self.play_detached(self.coin.as_ref(), 0.65);
        }
        if events.completed {
            self.stop_steps();
            self.play_detached(self.finish.as_ref(), 1.0);
        } else if events.moved {
            self.play_step(sprinting);
        }
    }
}
