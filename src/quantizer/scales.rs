//! Scale tables and snapping.

/// Semitone offsets of the major scale degrees.
pub const MAJOR_OFFSETS: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Just major scale, seven degrees.
pub const JUST_MAJOR: [f32; 7] = [
    1.0,        // unison
    9.0 / 8.0,  // major 2nd
    5.0 / 4.0,  // major 3rd
    4.0 / 3.0,  // perfect 4th
    3.0 / 2.0,  // perfect 5th
    5.0 / 3.0,  // major 6th
    15.0 / 8.0, // major 7th
];

/// Just major scale with the closing octave, picked from by the random voice.
pub const JUST_MAJOR_WITH_OCTAVE: [f32; 8] = [
    1.0,
    9.0 / 8.0,
    5.0 / 4.0,
    4.0 / 3.0,
    3.0 / 2.0,
    5.0 / 3.0,
    15.0 / 8.0,
    2.0,
];

/// One just ratio per equal-tempered semitone.
pub const JUST_CHROMATIC: [f32; 12] = [
    1.0,          // unison
    16.0 / 15.0,  // minor 2nd
    9.0 / 8.0,    // major 2nd
    6.0 / 5.0,    // minor 3rd
    5.0 / 4.0,    // major 3rd
    4.0 / 3.0,    // perfect 4th
    45.0 / 32.0,  // tritone
    3.0 / 2.0,    // perfect 5th
    8.0 / 5.0,    // minor 6th
    5.0 / 3.0,    // major 6th
    9.0 / 5.0,    // minor 7th
    15.0 / 8.0,   // major 7th
];

/// Snaps a semitone down to the closest major scale degree at or below it.
///
/// The input is reduced modulo 12 first, so negative values wrap into the octave.
#[inline]
pub fn snap_to_major(semitone: i32) -> i32 {
    let leftover = semitone.rem_euclid(12);
    let mut chosen = 0;
    for offset in MAJOR_OFFSETS {
        if offset <= leftover {
            chosen = offset;
        } else {
            break;
        }
    }

    chosen
}
