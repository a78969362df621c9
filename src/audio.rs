//! Truck radio and sound effects
//!
//! All audio is synthesized at startup with fundsp and played through rodio,
//! so there are no sound files to ship. Three short looping patches stand in
//! for radio stations; the moo is a filtered sawtooth glide.
//!
//! If no output device is available the radio stays silent and every call
//! no-ops, the animation itself is unaffected.

use fundsp::prelude32::*;
use macroquad::prelude::*;
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

pub const SAMPLE_RATE: u32 = 44_100;

/// Keeps the output stream alive; dropping it kills all sound
pub struct AudioOutput {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl AudioOutput {
    pub fn open() -> Option<AudioOutput> {
        match OutputStream::try_default() {
            Ok((stream, handle)) => Some(AudioOutput {
                _stream: stream,
                handle,
            }),
            Err(e) => {
                eprintln!("No audio output: {} (radio disabled)", e);
                None
            }
        }
    }
}

/// One synthesized radio station
pub struct Track {
    pub name: &'static str,
    samples: Vec<f32>,
}

pub struct Radio {
    output: Option<AudioOutput>,
    tracks: Vec<Track>,
    current: usize,
    on: bool,
    sink: Option<Sink>,
    moo_samples: Vec<f32>,
    visualizer_phase: f32,
}

impl Radio {
    pub fn new(output: Option<AudioOutput>) -> Radio {
        Radio {
            output,
            tracks: build_tracks(),
            current: 0,
            on: false,
            sink: None,
            moo_samples: render_moo(),
            visualizer_phase: 0.0,
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn current_track_name(&self) -> &'static str {
        self.tracks[self.current].name
    }

    /// Turn the radio on or off. Does nothing without an output device.
    pub fn toggle(&mut self) {
        if self.output.is_none() {
            return;
        }
        if self.on {
            self.stop_playback();
            self.on = false;
        } else {
            self.start_playback();
            self.on = true;
        }
    }

    /// Advance to the next station; restarts playback if the radio is on
    pub fn next_track(&mut self) {
        if self.output.is_none() {
            return;
        }
        self.current = next_index(self.current, self.tracks.len());
        if self.on {
            self.stop_playback();
            self.start_playback();
        }
    }

    /// One-shot moo for the abduction moment
    pub fn play_moo(&self) {
        let Some(output) = &self.output else { return };
        let Ok(sink) = Sink::try_new(&output.handle) else {
            return;
        };
        sink.append(SamplesBuffer::new(1, SAMPLE_RATE, self.moo_samples.clone()));
        sink.detach();
    }

    pub fn update(&mut self, dt: f32, toggle_pressed: bool, next_pressed: bool) {
        if toggle_pressed {
            self.toggle();
        }
        if next_pressed {
            self.next_track();
        }
        if self.on {
            self.visualizer_phase += dt * 10.0;
        }
    }

    /// Bobbing equalizer bars above the truck cabin while playing
    pub fn draw_visualizer(&self, cabin_x: f32, cabin_y: f32) {
        if !self.on {
            return;
        }
        for i in 0..3 {
            let phase = self.visualizer_phase + i as f32 * 1.1;
            let height = 4.0 + (phase.sin() * 0.5 + 0.5) * 6.0;
            let alpha = 0.6 + (phase * 1.2).sin() * 0.4;
            let bob = (phase * 0.7).sin() * 3.0;
            let color = match i {
                0 => Color::new(1.0, 0.41, 0.71, alpha),
                1 => Color::new(0.0, 1.0, 1.0, alpha),
                _ => Color::new(1.0, 0.85, 0.3, alpha),
            };
            draw_rectangle(
                cabin_x + i as f32 * 6.0,
                cabin_y - 12.0 - height + bob,
                3.0,
                height,
                color,
            );
        }
    }

    fn start_playback(&mut self) {
        let Some(output) = &self.output else { return };
        match Sink::try_new(&output.handle) {
            Ok(sink) => {
                let track = &self.tracks[self.current];
                sink.append(
                    SamplesBuffer::new(1, SAMPLE_RATE, track.samples.clone()).repeat_infinite(),
                );
                self.sink = Some(sink);
                println!("Radio: {}", track.name);
            }
            Err(e) => eprintln!("Radio playback failed: {}", e),
        }
    }

    fn stop_playback(&mut self) {
        // Dropping the sink stops the loop
        self.sink = None;
    }
}

/// Wrapping station index
pub fn next_index(current: usize, len: usize) -> usize {
    (current + 1) % len
}

// --- Synthesis ---

/// Run a unit generator for the given duration and collect mono samples
fn render(unit: &mut dyn AudioUnit, seconds: f32) -> Vec<f32> {
    unit.set_sample_rate(SAMPLE_RATE as f64);
    unit.reset();
    let n = (seconds * SAMPLE_RATE as f32) as usize;
    (0..n).map(|_| unit.get_mono().clamp(-1.0, 1.0)).collect()
}

fn build_tracks() -> Vec<Track> {
    vec![
        Track {
            name: "Un Monton de Estrellas",
            samples: render_estrellas(),
        },
        Track {
            name: "Carretera Infinita",
            samples: render_carretera(),
        },
        Track {
            name: "Ritmo Nocturno",
            samples: render_nocturno(),
        },
    ]
}

/// Gentle pentatonic arpeggio on a triangle wave
fn render_estrellas() -> Vec<f32> {
    const NOTES: [f32; 8] = [392.0, 440.0, 523.25, 587.33, 659.25, 587.33, 523.25, 440.0];
    let melody = lfo(|t: f32| {
        let i = (t * 4.0) as usize % NOTES.len();
        NOTES[i]
    });
    let fade = lfo(|t: f32| fade_gain(t, 8.0));
    let mut unit = (melody >> triangle()) * fade * 0.18;
    render(&mut unit, 8.0)
}

/// Slow sawtooth bass riff through a lowpass, like a tired engine
fn render_carretera() -> Vec<f32> {
    const NOTES: [f32; 4] = [98.0, 98.0, 116.54, 87.31];
    let riff = lfo(|t: f32| {
        let i = (t * 2.0) as usize % NOTES.len();
        NOTES[i]
    });
    let fade = lfo(|t: f32| fade_gain(t, 8.0));
    let mut unit = (riff >> saw() >> lowpass_hz(320.0, 1.0)) * fade * 0.22;
    render(&mut unit, 8.0)
}

/// Square-wave blips with a pulsing tremolo
fn render_nocturno() -> Vec<f32> {
    const NOTES: [f32; 6] = [261.63, 311.13, 392.0, 311.13, 466.16, 392.0];
    let melody = lfo(|t: f32| {
        let i = (t * 6.0) as usize % NOTES.len();
        NOTES[i]
    });
    let tremolo = lfo(|t: f32| 0.5 + 0.5 * (t * 18.0).sin());
    let fade = lfo(|t: f32| fade_gain(t, 6.0));
    let mut unit = (melody >> square()) * tremolo * fade * 0.12;
    render(&mut unit, 6.0)
}

/// Downward sawtooth glide through a lowpass, with a little vibrato wobble
fn render_moo() -> Vec<f32> {
    let glide = lfo(|t: f32| {
        let x = (t / 0.7).min(1.0);
        let base = 196.0 + (110.0 - 196.0) * x;
        base * (1.0 + 0.03 * (t * 40.0).sin())
    });
    let envelope = lfo(|t: f32| {
        let attack = (t / 0.05).min(1.0);
        let release = (1.0 - (t - 0.05) / 0.75).max(0.0);
        attack * release * 0.5
    });
    let mut unit = (glide >> saw() >> lowpass_hz(450.0, 2.0)) * envelope;
    render(&mut unit, 0.8)
}

/// Short fade-in/out at the loop boundary to avoid clicks
fn fade_gain(t: f32, total: f32) -> f32 {
    let edge = 0.05;
    let head = (t / edge).min(1.0);
    let tail = ((total - t) / edge).clamp(0.0, 1.0);
    head * tail
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rms(samples: &[f32]) -> f32 {
        (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt()
    }

    #[test]
    fn test_tracks_have_audio() {
        for track in build_tracks() {
            assert!(!track.samples.is_empty(), "{} is empty", track.name);
            assert!(
                track.samples.iter().all(|s| s.abs() <= 1.0),
                "{} clips",
                track.name
            );
            assert!(rms(&track.samples) > 0.01, "{} is silent", track.name);
        }
    }

    #[test]
    fn test_moo_duration_and_energy() {
        let moo = render_moo();
        assert_eq!(moo.len(), (0.8 * SAMPLE_RATE as f32) as usize);
        assert!(rms(&moo) > 0.01);
    }

    #[test]
    fn test_loop_boundaries_are_quiet() {
        let samples = render_estrellas();
        assert!(samples.first().unwrap().abs() < 0.05);
        assert!(samples.last().unwrap().abs() < 0.05);
    }

    #[test]
    fn test_next_index_wraps() {
        assert_eq!(next_index(0, 3), 1);
        assert_eq!(next_index(2, 3), 0);
    }

    #[test]
    fn test_radio_without_device_stays_off() {
        let mut radio = Radio::new(None);
        radio.toggle();
        assert!(!radio.is_on());
        radio.next_track();
        assert_eq!(radio.current_track_name(), "Un Monton de Estrellas");
    }
}
