//! Simplex noise with optional periodicity.
//!
//! `Simplex` carries its own permutation table so two generators with different seeds can run
//! side by side. The periodic sampler maps each axis onto a circle and evaluates 4D simplex
//! noise on the resulting torus, so the field repeats exactly at the requested periods.

use std::f64::consts::TAU;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Ken Perlin's reference permutation.
const CLASSIC: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

const GRAD2: [(f64, f64); 12] = [
    (1.0, 1.0), (-1.0, 1.0), (1.0, -1.0), (-1.0, -1.0),
    (1.0, 0.0), (-1.0, 0.0), (1.0, 0.0), (-1.0, 0.0),
    (0.0, 1.0), (0.0, -1.0), (0.0, 1.0), (0.0, -1.0),
];

const GRAD4: [[f64; 4]; 32] = [
    [0.0, 1.0, 1.0, 1.0], [0.0, 1.0, 1.0, -1.0], [0.0, 1.0, -1.0, 1.0], [0.0, 1.0, -1.0, -1.0],
    [0.0, -1.0, 1.0, 1.0], [0.0, -1.0, 1.0, -1.0], [0.0, -1.0, -1.0, 1.0], [0.0, -1.0, -1.0, -1.0],
    [1.0, 0.0, 1.0, 1.0], [1.0, 0.0, 1.0, -1.0], [1.0, 0.0, -1.0, 1.0], [1.0, 0.0, -1.0, -1.0],
    [-1.0, 0.0, 1.0, 1.0], [-1.0, 0.0, 1.0, -1.0], [-1.0, 0.0, -1.0, 1.0], [-1.0, 0.0, -1.0, -1.0],
    [1.0, 1.0, 0.0, 1.0], [1.0, 1.0, 0.0, -1.0], [1.0, -1.0, 0.0, 1.0], [1.0, -1.0, 0.0, -1.0],
    [-1.0, 1.0, 0.0, 1.0], [-1.0, 1.0, 0.0, -1.0], [-1.0, -1.0, 0.0, 1.0], [-1.0, -1.0, 0.0, -1.0],
    [1.0, 1.0, 1.0, 0.0], [1.0, 1.0, -1.0, 0.0], [1.0, -1.0, 1.0, 0.0], [1.0, -1.0, -1.0, 0.0],
    [-1.0, 1.0, 1.0, 0.0], [-1.0, 1.0, -1.0, 0.0], [-1.0, -1.0, 1.0, 0.0], [-1.0, -1.0, -1.0, 0.0],
];

// Skew / unskew factors.
const F2: f64 = 0.366_025_403_784_438_6; // (sqrt(3) - 1) / 2
const G2: f64 = 0.211_324_865_405_187_1; // (3 - sqrt(3)) / 6
const F4: f64 = 0.309_016_994_374_947_45; // (sqrt(5) - 1) / 4
const G4: f64 = 0.138_196_601_125_010_5; // (5 - sqrt(5)) / 20

/// Anything that can be sampled at a 2D coordinate.
pub trait NoiseField {
    fn sample(&self, x: f64, y: f64) -> f64;
}

/// 256-entry permutation, stored twice so hashes never need a wrap.
#[derive(Clone)]
pub struct Permutation {
    table: [u8; 512],
}

impl Permutation {
    pub fn classic() -> Self {
        Self::from_base(&CLASSIC)
    }

    /// Shuffle of `0..=255` driven by `seed`; identical seeds give identical tables.
    pub fn seeded(seed: u64) -> Self {
        let mut base: Vec<u8> = (0..=255u8).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        base.shuffle(&mut rng);
        let mut arr = [0u8; 256];
        arr.copy_from_slice(&base);
        Self::from_base(&arr)
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self::classic(),
        }
    }

    fn from_base(base: &[u8; 256]) -> Self {
        let mut table = [0u8; 512];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = base[i & 255];
        }
        Self { table }
    }

    #[inline]
    fn at(&self, i: usize) -> usize {
        self.table[i] as usize
    }
}

#[derive(Clone)]
pub struct Simplex {
    perm: Permutation,
}

impl Simplex {
    pub fn new(perm: Permutation) -> Self {
        Self { perm }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        Self::new(Permutation::from_seed(seed))
    }

    /// 2D simplex noise, roughly in [-1, 1].
    pub fn noise2(&self, x: f64, y: f64) -> f64 {
        let s = (x + y) * F2;
        let i = (x + s).floor();
        let j = (y + s).floor();
        let t = (i + j) * G2;
        let x0 = x - (i - t);
        let y0 = y - (j - t);

        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = lattice(i);
        let jj = lattice(j);
        let p = &self.perm;
        let gi0 = p.at(ii + p.at(jj)) % 12;
        let gi1 = p.at(ii + i1 + p.at(jj + j1)) % 12;
        let gi2 = p.at(ii + 1 + p.at(jj + 1)) % 12;

        let corner = |gi: usize, x: f64, y: f64| {
            let t = 0.5 - x * x - y * y;
            if t < 0.0 {
                0.0
            } else {
                let (gx, gy) = GRAD2[gi];
                let t = t * t;
                t * t * (gx * x + gy * y)
            }
        };

        70.0 * (corner(gi0, x0, y0) + corner(gi1, x1, y1) + corner(gi2, x2, y2))
    }

    /// 4D simplex noise, roughly in [-1, 1].
    pub fn noise4(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        let s = (x + y + z + w) * F4;
        let i = (x + s).floor();
        let j = (y + s).floor();
        let k = (z + s).floor();
        let l = (w + s).floor();
        let t = (i + j + k + l) * G4;
        let x0 = x - (i - t);
        let y0 = y - (j - t);
        let z0 = z - (k - t);
        let w0 = w - (l - t);

        // Rank each axis by magnitude to find which simplex we are in.
        let mut rank = [0u8; 4];
        let c = [x0, y0, z0, w0];
        for a in 0..4 {
            for b in (a + 1)..4 {
                if c[a] > c[b] {
                    rank[a] += 1;
                } else {
                    rank[b] += 1;
                }
            }
        }
        let step = |threshold: u8| -> [usize; 4] {
            [
                (rank[0] >= threshold) as usize,
                (rank[1] >= threshold) as usize,
                (rank[2] >= threshold) as usize,
                (rank[3] >= threshold) as usize,
            ]
        };
        let offsets = [[0usize; 4], step(3), step(2), step(1), [1usize; 4]];

        let ii = lattice(i);
        let jj = lattice(j);
        let kk = lattice(k);
        let ll = lattice(l);
        let p = &self.perm;

        let mut total = 0.0;
        for (n, o) in offsets.iter().enumerate() {
            let g = n as f64 * G4;
            let dx = x0 - o[0] as f64 + g;
            let dy = y0 - o[1] as f64 + g;
            let dz = z0 - o[2] as f64 + g;
            let dw = w0 - o[3] as f64 + g;
            let t = 0.6 - dx * dx - dy * dy - dz * dz - dw * dw;
            if t < 0.0 {
                continue;
            }
            let gi = p.at(ii + o[0] + p.at(jj + o[1] + p.at(kk + o[2] + p.at(ll + o[3])))) % 32;
            let gr = GRAD4[gi];
            let t = t * t;
            total += t * t * (gr[0] * dx + gr[1] * dy + gr[2] * dz + gr[3] * dw);
        }
        27.0 * total
    }

    /// 2D noise that repeats every `period_x` along x and `period_y` along y.
    pub fn periodic2(&self, x: f64, y: f64, period_x: f64, period_y: f64) -> f64 {
        let ax = x / period_x * TAU;
        let ay = y / period_y * TAU;
        // Radius keeps one lattice unit per unit of input along the circle.
        let rx = period_x / TAU;
        let ry = period_y / TAU;
        self.noise4(rx * ax.cos(), rx * ax.sin(), ry * ay.cos(), ry * ay.sin())
    }
}

impl NoiseField for Simplex {
    fn sample(&self, x: f64, y: f64) -> f64 {
        self.noise2(x, y)
    }
}

/// Simplex noise wrapped onto a torus of the given periods.
#[derive(Clone)]
pub struct Tiled {
    pub noise: Simplex,
    pub period_x: f64,
    pub period_y: f64,
}

impl NoiseField for Tiled {
    fn sample(&self, x: f64, y: f64) -> f64 {
        self.noise.periodic2(x, y, self.period_x, self.period_y)
    }
}

#[inline]
fn lattice(v: f64) -> usize {
    (v as i64 & 255) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> impl Iterator<Item = (f64, f64)> {
        (0..40).flat_map(|i| (0..40).map(move |j| (i as f64 * 0.37 - 7.0, j as f64 * 0.53 - 9.0)))
    }

    #[test]
    fn seeded_table_is_a_permutation() {
        let p = Permutation::seeded(256);
        let mut v = p.table[..256].to_vec();
        v.sort_unstable();
        assert!(v.iter().enumerate().all(|(i, b)| *b as usize == i));
    }

    #[test]
    fn seeded_table_is_stable_per_seed() {
        assert_eq!(Permutation::seeded(7).table, Permutation::seeded(7).table);
        assert_ne!(Permutation::seeded(7).table, Permutation::seeded(8).table);
    }

    #[test]
    fn noise2_is_zero_at_origin_and_bounded() {
        let n = Simplex::from_seed(None);
        assert_eq!(n.noise2(0.0, 0.0), 0.0);
        for (x, y) in grid() {
            let v = n.noise2(x, y);
            assert!(v.abs() <= 1.0, "noise2({x},{y}) = {v}");
        }
    }

    #[test]
    fn noise_is_deterministic() {
        let a = Simplex::from_seed(Some(3));
        let b = Simplex::from_seed(Some(3));
        for (x, y) in grid() {
            assert_eq!(a.noise2(x, y), b.noise2(x, y));
            assert_eq!(a.periodic2(x, y, 4.0, 4.0), b.periodic2(x, y, 4.0, 4.0));
        }
    }

    #[test]
    fn noise2_varies() {
        let n = Simplex::from_seed(Some(256));
        let distinct = grid().map(|(x, y)| (n.noise2(x, y) * 1e6) as i64).collect::<std::collections::HashSet<_>>();
        assert!(distinct.len() > 100);
    }

    #[test]
    fn periodic_repeats_on_both_axes() {
        let n = Simplex::from_seed(None);
        for (x, y) in grid() {
            let base = n.periodic2(x, y, 16.0, 16.0);
            assert!((base - n.periodic2(x + 16.0, y, 16.0, 16.0)).abs() < 1e-9);
            assert!((base - n.periodic2(x, y + 16.0, 16.0, 16.0)).abs() < 1e-9);
            assert!((base - n.periodic2(x - 32.0, y + 48.0, 16.0, 16.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn tiled_field_matches_periodic2() {
        let field = Tiled { noise: Simplex::from_seed(Some(1)), period_x: 5.0, period_y: 3.0 };
        assert_eq!(field.sample(1.25, 2.5), field.noise.periodic2(1.25, 2.5, 5.0, 3.0));
    }
}
