//! Deterministic noise sources.
//!
//! Two independent sources feed the quantizers:
//! - [`Random`](crate::utils::random::Random), a scalar LCG producing uncorrelated values
//!   in `[0, 1)`,
//! - [`fbm::fbm`], fractional Brownian motion built from 1-D [`perlin`] noise, a slowly
//!   varying and spatially coherent field.

pub mod fbm;
pub mod perlin;

pub use fbm::{fbm, FbmParameters};
pub use perlin::{perlin, PermutationTable};
