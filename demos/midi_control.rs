//! Single voice with MIDI parameter control.
//!
//! The control frames drive two plain sine oscillators, one per output channel.

use std::f32::consts::TAU;

use audio_midi_shell::{AudioGenerator, AudioMidiShell};
use simple_logger::SimpleLogger;

use noise_voice_dsp::engine::{ControlFrame, ControlInput, Knobs, TriggerEvent};
use noise_voice_dsp::voice::{EngineKind, Voice, NUM_ENGINES};

const SAMPLE_RATE: u32 = 48000;
const BLOCK_SIZE: usize = 32;

fn main() -> ! {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Debug)
        .init()
        .unwrap();

    AudioMidiShell::run_forever(SAMPLE_RATE, BLOCK_SIZE, App::new());
}

#[derive(Debug)]
struct App {
    voice: Voice,
    knobs: Knobs,
    controls: ControlInput,
    frames: Vec<ControlFrame>,
    phases: [f32; 2],
    volume: f32,
}

impl App {
    pub fn new() -> Self {
        Self {
            voice: Voice::new(SAMPLE_RATE as f32),
            knobs: [0.5; 4],
            controls: ControlInput::default(),
            frames: vec![ControlFrame::default(); BLOCK_SIZE],
            phases: [0.0; 2],
            volume: 0.5,
        }
    }

    fn poll_controls(&mut self) {
        self.voice.update_controls(&self.controls);
        self.controls.encoder_increment = 0;
    }
}

impl AudioGenerator for App {
    fn init(&mut self, _block_size: usize) {
        self.voice.init();
    }

    fn process(&mut self, samples_left: &mut [f32], samples_right: &mut [f32]) {
        self.poll_controls();

        let size = samples_left.len().min(self.frames.len());
        self.voice.render(&self.knobs, &mut self.frames[..size]);

        for (n, frame) in self.frames[..size].iter().enumerate() {
            let frequencies = [frame.frequency, frame.frequency_aux];
            let mut out = [0.0; 2];

            for ((phase, frequency), sample) in self
                .phases
                .iter_mut()
                .zip(frequencies)
                .zip(out.iter_mut())
            {
                *phase += frequency / SAMPLE_RATE as f32;
                if *phase >= 1.0 {
                    *phase -= 1.0;
                }
                *sample = (*phase * TAU).sin() * frame.level * self.volume;
            }

            samples_left[n] = out[0];
            samples_right[n] = out[1];
        }
    }

    fn process_midi(&mut self, message: Vec<u8>) {
        let [status, data1, data2] = match message.as_slice() {
            [status, data1, data2, ..] => [*status, *data1, *data2],
            _ => return,
        };

        match status & 0xF0 {
            0x80 => {
                self.voice.trigger(TriggerEvent::NoteOff { note: data1 });
            }
            0x90 => {
                // Velocity 0 is turned into a note off by the voice.
                self.voice.trigger(TriggerEvent::NoteOn {
                    note: data1,
                    velocity: data2,
                });
            }
            0xB0 => {
                // Control change
                let value = data2 as f32 / 127.0;
                match data1 {
                    21..=24 => {
                        let knob = (data1 - 21) as usize;
                        self.knobs[knob] = value;
                        log::info!("Knob {}: {}", knob + 1, value);
                    }
                    25 => {
                        let index = (value * (NUM_ENGINES - 1) as f32).round() as usize;
                        self.voice.set_engine(EngineKind::from_index(index));
                    }
                    26 => {
                        // Relative encoder, 64 is the center.
                        self.controls.encoder_increment += data2 as i32 - 64;
                    }
                    27 => {
                        self.controls.encoder_pressed = data2 >= 64;
                    }
                    28 | 29 => {
                        self.controls.buttons[(data1 - 28) as usize] = data2 >= 64;
                    }
                    30 => {
                        self.volume = value;
                        log::info!("Volume: {}", self.volume);
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }
}
