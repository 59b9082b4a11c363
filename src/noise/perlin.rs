//! 1-D gradient (Perlin) noise.
//!
//! Output is continuous, zero at every integer coordinate and bounded by `[-0.5, 0.5]`.

#[allow(unused_imports)]
use num_traits::float::Float;

use spin::Once;

/// Ken Perlin's reference permutation of `0..=255`.
const REFERENCE_PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252,
    219, 203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168,
    68, 175, 74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211,
    133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80,
    73, 209, 76, 132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100,
    109, 198, 173, 186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82,
    85, 212, 207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248,
    152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108,
    110, 79, 113, 224, 232, 178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210,
    144, 12, 191, 179, 162, 241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199,
    106, 157, 184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114,
    67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
];

pub const PERMUTATION_SIZE: usize = 256;

static PERMUTATION: Once<PermutationTable> = Once::new();

/// The reference permutation stored twice, so `table[i + 1]` never needs a wrap for
/// `i < 256`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermutationTable {
    entries: [u8; 2 * PERMUTATION_SIZE],
}

impl PermutationTable {
    fn build() -> Self {
        let mut entries = [0; 2 * PERMUTATION_SIZE];
        for (i, value) in REFERENCE_PERMUTATION.iter().enumerate() {
            entries[i] = *value;
            entries[i + PERMUTATION_SIZE] = *value;
        }

        Self { entries }
    }

    /// Shared table, built on first use. Read-only afterwards.
    pub fn get() -> &'static Self {
        PERMUTATION.call_once(Self::build)
    }

    #[inline]
    pub fn hash(&self, index: usize) -> u8 {
        self.entries[index]
    }

    #[inline]
    pub fn entries(&self) -> &[u8; 2 * PERMUTATION_SIZE] {
        &self.entries
    }
}

/// Quintic smoothstep `6t^5 - 15t^4 + 10t^3`.
#[inline]
pub fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// 1-D gradient: the hash parity picks the slope sign.
#[inline]
pub fn grad(hash: u8, t: f32) -> f32 {
    if hash & 1 != 0 {
        t
    } else {
        -t
    }
}

/// Evaluates the noise field at `x`.
///
/// Non-finite coordinates evaluate as `0.0`. Coordinates beyond the `i32` range saturate to
/// the edge cell.
#[inline]
pub fn perlin(table: &PermutationTable, x: f32) -> f32 {
    if !x.is_finite() {
        return 0.0;
    }

    let cell = x.floor();
    let xf = x - cell;
    let xi = (cell as i32 & 255) as usize;

    let u = fade(xf);

    let g1 = grad(table.hash(xi), xf);
    let g2 = grad(table.hash(xi + 1), xf - 1.0);

    (1.0 - u) * g1 + u * g2
}
