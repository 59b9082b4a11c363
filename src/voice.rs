//! Single voice with engine dispatch.
//!
//! Owns every engine and forwards triggers, control input and rendering to the selected
//! one. There is exactly one `Voice` per output channel, so the host keeps it in whatever
//! shared cell its audio callback and control loop use.

use crate::engine::cv_quantizer_engine::{CvQuantizerEngine, CvQuantizerStatus};
use crate::engine::fractal_loop_engine::{FractalLoopEngine, FractalLoopStatus};
use crate::engine::fractal_note_engine::{FractalNoteEngine, FractalNoteStatus};
use crate::engine::random_step_engine::{RandomStepEngine, RandomStepStatus};
use crate::engine::{ControlFrame, ControlInput, Engine, Knobs, TriggerEvent};
use crate::utils::units::volts_to_dac;
use crate::SampleRate;

pub const NUM_ENGINES: usize = 4;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    #[default]
    RandomStep,
    FractalNote,
    FractalLoop,
    CvQuantizer,
}

impl EngineKind {
    pub const ALL: [Self; NUM_ENGINES] = [
        Self::RandomStep,
        Self::FractalNote,
        Self::FractalLoop,
        Self::CvQuantizer,
    ];

    /// Engine for an index, clamped to the valid range.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(NUM_ENGINES - 1)]
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::RandomStep => "Randos",
            Self::FractalNote => "FractalZoom",
            Self::FractalLoop => "FractalLoop",
            Self::CvQuantizer => "JustInTone",
        }
    }
}

/// Read-only snapshot of the selected engine for a status display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Status {
    RandomStep(RandomStepStatus),
    FractalNote(FractalNoteStatus),
    FractalLoop(FractalLoopStatus),
    CvQuantizer(CvQuantizerStatus),
}

#[derive(Debug, Clone)]
pub struct Voice {
    random_step_engine: RandomStepEngine,
    fractal_note_engine: FractalNoteEngine,
    fractal_loop_engine: FractalLoopEngine,
    cv_quantizer_engine: CvQuantizerEngine,

    engine_kind: EngineKind,
    sample_rate: SampleRate,
}

impl Voice {
    pub fn new(sample_rate: f32) -> Self {
        let mut voice = Self {
            random_step_engine: RandomStepEngine::new(),
            fractal_note_engine: FractalNoteEngine::new(),
            fractal_loop_engine: FractalLoopEngine::new(),
            cv_quantizer_engine: CvQuantizerEngine::new(),
            engine_kind: EngineKind::default(),
            sample_rate: SampleRate::new(sample_rate),
        };
        voice.init();

        voice
    }

    pub fn init(&mut self) {
        let sample_rate = self.sample_rate.sample_rate_hz;
        for kind in EngineKind::ALL {
            self.get_engine(kind).init(sample_rate);
        }
    }

    #[inline]
    pub fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    #[inline]
    pub fn engine_kind(&self) -> EngineKind {
        self.engine_kind
    }

    /// Selects an engine. The newly selected engine starts idle.
    pub fn set_engine(&mut self, kind: EngineKind) {
        if kind == self.engine_kind {
            return;
        }

        self.get_engine(self.engine_kind).reset();
        self.get_engine(kind).reset();
        self.engine_kind = kind;
        log::info!("Engine: {}", kind.name());
    }

    pub fn get_engine(&mut self, kind: EngineKind) -> &mut dyn Engine {
        match kind {
            EngineKind::RandomStep => &mut self.random_step_engine,
            EngineKind::FractalNote => &mut self.fractal_note_engine,
            EngineKind::FractalLoop => &mut self.fractal_loop_engine,
            EngineKind::CvQuantizer => &mut self.cv_quantizer_engine,
        }
    }

    fn engine(&self) -> &dyn Engine {
        match self.engine_kind {
            EngineKind::RandomStep => &self.random_step_engine,
            EngineKind::FractalNote => &self.fractal_note_engine,
            EngineKind::FractalLoop => &self.fractal_loop_engine,
            EngineKind::CvQuantizer => &self.cv_quantizer_engine,
        }
    }

    pub fn random_step_engine(&mut self) -> &mut RandomStepEngine {
        &mut self.random_step_engine
    }

    pub fn fractal_note_engine(&mut self) -> &mut FractalNoteEngine {
        &mut self.fractal_note_engine
    }

    pub fn fractal_loop_engine(&mut self) -> &mut FractalLoopEngine {
        &mut self.fractal_loop_engine
    }

    /// Control loop: handles one event of the trigger stream.
    pub fn trigger(&mut self, event: TriggerEvent) {
        self.get_engine(self.engine_kind).trigger(event);
    }

    /// Control loop: handles the encoder and buttons.
    pub fn update_controls(&mut self, input: &ControlInput) {
        self.get_engine(self.engine_kind).update_controls(input);
    }

    /// Audio callback: renders one frame per sample.
    #[inline]
    pub fn render(&mut self, knobs: &Knobs, frames: &mut [ControlFrame]) {
        self.get_engine(self.engine_kind).render(knobs, frames);
    }

    #[inline]
    pub fn gate(&self) -> bool {
        self.engine().gate()
    }

    /// DAC codes for the CV outputs of a rendered frame.
    #[inline]
    pub fn dac_codes(&self, frame: &ControlFrame) -> [u16; 2] {
        let full_scale = self.engine().cv_full_scale();
        [
            volts_to_dac(frame.cv[0], full_scale),
            volts_to_dac(frame.cv[1], full_scale),
        ]
    }

    pub fn status(&self) -> Status {
        match self.engine_kind {
            EngineKind::RandomStep => Status::RandomStep(self.random_step_engine.status()),
            EngineKind::FractalNote => Status::FractalNote(self.fractal_note_engine.status()),
            EngineKind::FractalLoop => Status::FractalLoop(self.fractal_loop_engine.status()),
            EngineKind::CvQuantizer => Status::CvQuantizer(self.cv_quantizer_engine.status()),
        }
    }
}
