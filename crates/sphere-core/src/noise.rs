//! Seeded 3D simplex gradient noise.
//!
//! The field is immutable once built: a 512-entry permutation table (256
//! random bytes repeated twice) and the 12 edge-midpoint gradients of a cube.
//! Sampling is a pure function of the input point and those tables, so two
//! fields built from the same bytes return bit-identical values.
//!
//! Output is scaled by 32 and stays roughly within `[-1, 1]`.

use glam::Vec3;
use rand::prelude::*;

const F3: f64 = 1.0 / 3.0;
const G3: f64 = 1.0 / 6.0;
const FALLOFF_RADIUS_SQ: f64 = 0.6;
const OUTPUT_SCALE: f64 = 32.0;

const GRAD3: [[f64; 3]; 12] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
];

#[derive(Clone)]
pub struct NoiseField {
    perm: [u8; 512],
}

impl NoiseField {
    /// Draw 256 permutation bytes from `rng`.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut p = [0u8; 256];
        for b in p.iter_mut() {
            *b = rng.gen();
        }
        Self::from_permutation(&p)
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(&mut StdRng::seed_from_u64(seed))
    }

    /// Build from explicit bytes; entries need not be a true permutation.
    pub fn from_permutation(p: &[u8; 256]) -> Self {
        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = p[i & 255];
        }
        Self { perm }
    }

    pub fn permutation(&self) -> &[u8; 512] {
        &self.perm
    }

    /// Sample the field. Non-finite input yields an unspecified (possibly NaN)
    /// value but never panics.
    pub fn sample(&self, xin: f64, yin: f64, zin: f64) -> f64 {
        // Skew into simplex space to find the lattice cell.
        let s = (xin + yin + zin) * F3;
        let i = (xin + s).floor();
        let j = (yin + s).floor();
        let k = (zin + s).floor();

        // Unskew the cell origin back to (x, y, z) space.
        let t = (i + j + k) * G3;
        let x0 = xin - (i - t);
        let y0 = yin - (j - t);
        let z0 = zin - (k - t);

        let (o1, o2) = corner_offsets(x0, y0, z0);

        let corners = [
            (x0, y0, z0, [0, 0, 0]),
            (
                x0 - o1[0] as f64 + G3,
                y0 - o1[1] as f64 + G3,
                z0 - o1[2] as f64 + G3,
                o1,
            ),
            (
                x0 - o2[0] as f64 + 2.0 * G3,
                y0 - o2[1] as f64 + 2.0 * G3,
                z0 - o2[2] as f64 + 2.0 * G3,
                o2,
            ),
            (
                x0 - 1.0 + 3.0 * G3,
                y0 - 1.0 + 3.0 * G3,
                z0 - 1.0 + 3.0 * G3,
                [1, 1, 1],
            ),
        ];

        let ii = lattice_index(i);
        let jj = lattice_index(j);
        let kk = lattice_index(k);

        let mut n = 0.0;
        for (x, y, z, off) in corners {
            let mut tc = FALLOFF_RADIUS_SQ - x * x - y * y - z * z;
            if tc < 0.0 {
                continue;
            }
            let gi = self.gradient_index(ii + off[0], jj + off[1], kk + off[2]);
            tc *= tc;
            n += tc * tc * dot(&GRAD3[gi], x, y, z);
        }
        OUTPUT_SCALE * n
    }

    /// Convenience wrapper for f32 geometry.
    #[inline]
    pub fn sample_vec3(&self, p: Vec3) -> f32 {
        self.sample(p.x as f64, p.y as f64, p.z as f64) as f32
    }

    #[inline]
    fn gradient_index(&self, i: usize, j: usize, k: usize) -> usize {
        let pk = self.perm[k] as usize;
        let pj = self.perm[j + pk] as usize;
        self.perm[i + pj] as usize % 12
    }
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField")
            .field("perm_head", &&self.perm[..8])
            .finish()
    }
}

/// Traversal order through the simplex: the two intermediate corners as
/// `{0,1}` offsets, chosen by ranking `x0`, `y0`, `z0`.
#[inline]
fn corner_offsets(x0: f64, y0: f64, z0: f64) -> ([usize; 3], [usize; 3]) {
    if x0 >= y0 {
        if y0 >= z0 {
            ([1, 0, 0], [1, 1, 0])
        } else if x0 >= z0 {
            ([1, 0, 0], [1, 0, 1])
        } else {
            ([0, 0, 1], [1, 0, 1])
        }
    } else if y0 < z0 {
        ([0, 0, 1], [0, 1, 1])
    } else if x0 < z0 {
        ([0, 1, 0], [0, 1, 1])
    } else {
        ([0, 1, 0], [1, 1, 0])
    }
}

// Saturating float->int cast keeps NaN/inf inputs in range.
#[inline]
fn lattice_index(v: f64) -> usize {
    ((v as i64) & 255) as usize
}

#[inline]
fn dot(g: &[f64; 3], x: f64, y: f64, z: f64) -> f64 {
    g[0] * x + g[1] * y + g[2] * z
}
