//! Random point cloud generation

use crate::point::Point3f;
use crate::point_cloud::PointCloud3f;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default number of stars
pub const STAR_COUNT: usize = 2000;

/// Default side length of the cube the stars are scattered in
pub const STAR_SPREAD: f32 = 15.0;

/// Scatter `count` points uniformly in a cube of side `spread` centered at the origin.
///
/// Each coordinate is `(u - 0.5) * spread` with `u` drawn from [0, 1).
pub fn generate_starfield<R: Rng>(rng: &mut R, count: usize, spread: f32) -> PointCloud3f {
    let mut coordinate = || (rng.gen::<f32>() - 0.5) * spread;
    (0..count)
        .map(|_| {
            let x = coordinate();
            let y = coordinate();
            let z = coordinate();
            Point3f::new(x, y, z)
        })
        .collect()
}

/// Generate a starfield from a fixed seed, or from entropy when `seed` is `None`
pub fn generate_seeded(seed: Option<u64>, count: usize, spread: f32) -> PointCloud3f {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    generate_starfield(&mut rng, count, spread)
}
