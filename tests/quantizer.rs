//! Tests for the scale quantizers

use noise_voice_dsp::quantizer::cv::{quantize_cv, split_semitone};
use noise_voice_dsp::quantizer::fractal::{
    fractal_to_frequency, fractal_to_just_major, just_major_step, normalize,
};
use noise_voice_dsp::quantizer::scales::{snap_to_major, JUST_MAJOR_WITH_OCTAVE};
use noise_voice_dsp::quantizer::*;
use noise_voice_dsp::utils::random::Random;
use noise_voice_dsp::utils::units::{midi_to_frequency, volts_to_dac, DAC_MAX_CODE};

const INPUTS: [f32; 12] = [
    f32::NAN,
    f32::NEG_INFINITY,
    -1.0,
    0.0,
    0.1,
    0.25,
    0.5,
    0.75,
    0.999_999,
    1.0,
    2.0,
    f32::INFINITY,
];

fn assert_close(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "{actual} != {expected} (+/- {tolerance})"
    );
}

#[test]
fn major_snapping() {
    assert_eq!(snap_to_major(0), 0);
    assert_eq!(snap_to_major(1), 0);
    assert_eq!(snap_to_major(3), 2);
    assert_eq!(snap_to_major(6), 5);
    assert_eq!(snap_to_major(8), 7);
    assert_eq!(snap_to_major(10), 9);
    assert_eq!(snap_to_major(11), 11);

    // Wraps into the octave.
    assert_eq!(snap_to_major(15), 2);
    assert_eq!(snap_to_major(-1), 11);
    assert_eq!(snap_to_major(-9), 2);
}

#[test]
fn midi_frequencies() {
    assert_close(midi_to_frequency(69), 440.0, 1e-3);
    assert_close(midi_to_frequency(53), 174.614, 1e-2);
    assert_close(midi_to_frequency(57), 220.0, 1e-3);
    assert_eq!(midi_to_frequency(-10), midi_to_frequency(0));
    assert_eq!(midi_to_frequency(500), midi_to_frequency(127));
}

#[test]
fn equal_tempered_notes() {
    let range = OctaveRange::new(1.0);

    // Root C, half way: semitone 6 snaps to 5.
    let mode = QuantizationMode::from_settings(Root::from_index(1), range, Tuning::default());
    assert_eq!(
        mode,
        QuantizationMode::EqualTemperamentScale {
            root: 0,
            octave_range: range
        }
    );
    assert_eq!(equal_tempered_note(0.5, 0, range), 53);
    assert_close(equal_tempered_frequency(0.5, 0, range), 174.614, 1e-2);

    // Root F, lowest pick: the root itself.
    assert_eq!(equal_tempered_note(0.0, 5, range), 53);
    assert_close(equal_tempered_frequency(0.0, 5, range), 174.614, 1e-2);

    // Semitone 3 snaps down to the major second.
    assert_eq!(equal_tempered_note(3.5 / 12.0, 0, range), 50);

    // Semitone 11 is a scale degree.
    assert_eq!(equal_tempered_note(11.5 / 12.0, 0, range), 59);

    // Full octaves are kept.
    let range = OctaveRange::new(2.0);
    assert_eq!(equal_tempered_note(13.5 / 24.0, 2, range), 48 + 12 + 2);
    assert_eq!(equal_tempered_note(1.0, 0, range), 48 + 24);
}

#[test]
fn equal_tempered_notes_are_in_scale() {
    for root in 0..12u8 {
        for range in [0.5, 1.0, 2.5, 4.0] {
            let range = OctaveRange::new(range);
            for n in 0..=200 {
                let note = equal_tempered_note(n as f32 / 200.0, root, range);
                let degree = (note - BASE_NOTE - root as i32).rem_euclid(12);
                assert_eq!(snap_to_major(degree), degree);
                assert!(note >= BASE_NOTE + root as i32);
            }
        }
    }
}

#[test]
fn just_frequencies() {
    let range = OctaveRange::new(2.0);
    let root = root_frequency(0);
    assert_close(root, 130.8128, 1e-3);

    assert_eq!(just_ratio_index(0.0), 0);
    assert_eq!(just_ratio_index(1.0), JUST_MAJOR_WITH_OCTAVE.len() - 1);
    assert_eq!(just_octave(0.0, range), 0);
    assert_eq!(just_octave(1.0, range), 2);

    assert_close(just_frequency(0.0, 0.0, 0, range), root, 1e-3);
    assert_close(just_frequency(4.5 / 8.0, 0.0, 0, range), root * 1.5, 1e-3);
    assert_close(just_frequency(1.0, 1.0, 0, range), root * 2.0 * 4.0, 1e-2);

    // Half octave ranges never transpose.
    assert_eq!(just_octave(1.0, OctaveRange::new(0.5)), 0);
}

#[test]
fn just_frequencies_in_range() {
    for root in 0..12u8 {
        for range in [0.5, 1.0, 3.0, 6.0] {
            let range = OctaveRange::new(range);
            let lowest = root_frequency(root);
            let highest = lowest * 2.0 * (range.whole_octaves() as f32).exp2();

            for a in 0..=20 {
                for b in 0..=20 {
                    let frequency = just_frequency(a as f32 / 20.0, b as f32 / 20.0, root, range);
                    assert!(frequency >= lowest - 1e-3);
                    assert!(frequency <= highest + 1e-2);
                }
            }
        }
    }
}

#[test]
fn quantizers_are_total() {
    for root in [0, 5, 11, 200] {
        for range in [f32::NAN, 0.0, 1.0, 6.0, 100.0] {
            let range = OctaveRange::new(range);
            for value in INPUTS {
                for frequency in [
                    unquantized_frequency(value),
                    equal_tempered_frequency(value, root, range),
                    just_frequency(value, value, root, range),
                    fractal_to_frequency(value),
                    fractal_to_just_major(value, 55.0, 4),
                ] {
                    assert!(frequency.is_finite() && frequency > 0.0);
                }
            }
        }
    }
}

#[test]
fn unquantized_band() {
    assert_eq!(unquantized_frequency(0.0), MIN_FREQUENCY);
    assert_eq!(unquantized_frequency(1.0), MAX_FREQUENCY);
    assert_eq!(unquantized_frequency(f32::NAN), MIN_FREQUENCY);
    assert_eq!(unquantized_frequency(5.0), MAX_FREQUENCY);
    assert_close(unquantized_frequency(0.5), 1025.0, 1e-3);
}

#[test]
fn mode_from_settings() {
    let range = OctaveRange::default();

    assert_eq!(
        QuantizationMode::from_settings(Root::None, range, Tuning::JustIntonation),
        QuantizationMode::Unquantized
    );
    assert_eq!(
        QuantizationMode::from_settings(Root::PitchClass(3), range, Tuning::EqualTemperament),
        QuantizationMode::EqualTemperamentScale {
            root: 3,
            octave_range: range
        }
    );
    assert_eq!(
        QuantizationMode::from_settings(Root::PitchClass(3), range, Tuning::JustIntonation),
        QuantizationMode::JustIntonationScale {
            root: 3,
            octave_range: range
        }
    );
}

#[test]
fn mode_draws() {
    let range = OctaveRange::new(1.0);

    // First value of seed 1 is 0.2364555.
    let mut random = Random::new(1);
    let frequency = QuantizationMode::Unquantized.frequency(&mut random);
    assert_close(frequency, 50.0 + 1950.0 * 0.236_455_5, 1e-2);

    // Semitone 2 of C.
    let mut random = Random::new(1);
    let mode = QuantizationMode::EqualTemperamentScale {
        root: 0,
        octave_range: range,
    };
    assert_close(mode.frequency(&mut random), midi_to_frequency(50), 1e-3);
    assert_eq!(random.state(), 1015568748);

    // Ratio 9/8, then octave 0. Consumes two values.
    let mut random = Random::new(1);
    let mode = QuantizationMode::JustIntonationScale {
        root: 0,
        octave_range: range,
    };
    assert_close(mode.frequency(&mut random), root_frequency(0) * 9.0 / 8.0, 1e-3);
    assert_eq!(random.state(), 1586005467);
}

#[test]
fn root_and_range_settings() {
    assert_eq!(Root::from_index(0), Root::None);
    assert_eq!(Root::from_index(1), Root::PitchClass(0));
    assert_eq!(Root::from_index(13), Root::PitchClass(11));
    assert_eq!(Root::from_index(-4), Root::None);

    assert_eq!(Root::PitchClass(0).name(), "C");
    assert_eq!(Root::PitchClass(11).name(), "B");
    assert_eq!(Root::None.name(), "None");

    assert_eq!(Root::PitchClass(0).step(-5), Root::None);
    assert_eq!(Root::PitchClass(10).step(3), Root::PitchClass(11));
    assert_eq!(Root::None.step(6), Root::PitchClass(5));

    assert_eq!(OctaveRange::new(10.0).octaves(), OctaveRange::MAX);
    assert_eq!(OctaveRange::new(0.0).octaves(), OctaveRange::MIN);
    assert_eq!(OctaveRange::default().step(3).octaves(), 2.5);
    assert_eq!(OctaveRange::new(2.5).whole_octaves(), 2);

    assert_eq!(Tuning::default().toggle(), Tuning::JustIntonation);
    assert!(!Tuning::default().toggle().toggle().is_just());
}

#[test]
fn fractal_mappings() {
    assert_eq!(normalize(-2.0), 0.0);
    assert_eq!(normalize(2.0), 1.0);
    assert_eq!(normalize(0.0), 0.5);
    assert_eq!(normalize(f32::NAN), 0.0);

    assert_eq!(fractal_to_frequency(-5.0), MIN_FREQUENCY);
    assert_eq!(fractal_to_frequency(5.0), MAX_FREQUENCY);

    assert_eq!(just_major_step(-2.0, 4), 0);
    assert_eq!(just_major_step(2.0, 4), 27);

    assert_close(fractal_to_just_major(-2.0, 55.0, 4), 55.0, 1e-3);
    assert_close(fractal_to_just_major(2.0, 55.0, 4), 55.0 * 15.0 / 8.0 * 8.0, 1e-2);
    assert_close(fractal_to_just_major(f32::NAN, 55.0, 4), 55.0, 1e-3);
}

#[test]
fn cv_quantization() {
    assert_eq!(split_semitone(0.0), (0, 0));
    assert_eq!(split_semitone(0.99), (1, 0));
    assert_eq!(split_semitone(1.5), (1, 6));
    assert_eq!(split_semitone(-0.5), (-1, 6));
    assert_eq!(split_semitone(f32::NAN), (0, 0));

    assert_close(quantize_cv(0.99, Tuning::EqualTemperament), 1.0, 1e-6);
    assert_close(quantize_cv(0.99, Tuning::JustIntonation), 1.0, 1e-6);
    assert_close(quantize_cv(2.04, Tuning::EqualTemperament), 2.0, 1e-6);

    // Fifth above 0 V.
    assert_close(quantize_cv(7.0 / 12.0, Tuning::EqualTemperament), 7.0 / 12.0, 1e-6);
    assert_close(quantize_cv(7.0 / 12.0, Tuning::JustIntonation), 0.584_962_5, 1e-5);
    assert_close(quantize_cv(3.0 + 7.0 / 12.0, Tuning::JustIntonation), 3.584_962_5, 1e-5);
}

#[test]
fn cv_quantization_is_monotonic() {
    for tuning in [Tuning::EqualTemperament, Tuning::JustIntonation] {
        let mut last = quantize_cv(0.0, tuning);
        for n in 1..=8000 {
            let value = quantize_cv(n as f32 / 1000.0, tuning);
            assert!(value >= last);
            last = value;
        }
    }
}

#[test]
fn dac_codes() {
    assert_eq!(volts_to_dac(0.0, 5.0), 0);
    assert_eq!(volts_to_dac(5.0, 5.0), DAC_MAX_CODE);
    assert_eq!(volts_to_dac(2.5, 5.0), 2047);
    assert_eq!(volts_to_dac(8.0, 8.0), DAC_MAX_CODE);
    assert_eq!(volts_to_dac(-1.0, 5.0), 0);
    assert_eq!(volts_to_dac(10.0, 5.0), DAC_MAX_CODE);
    assert_eq!(volts_to_dac(f32::NAN, 5.0), 0);
    assert_eq!(volts_to_dac(1.0, 0.0), 0);
}
