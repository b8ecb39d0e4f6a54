//! Range fractal.
//!
//! A wrapping value matrix is filled coarse to fine. Every new point is drawn
//! between the lowest and highest of its already-filled neighbours, which
//! gives mountain, cloud and vegetation-like mixtures of two materials.
//! Sampling interpolates the matrix by distance, so the output is smooth and
//! tiles without help.

use super::{Capabilities, Generator, PointSampler};
use crate::rng::DeterministicRng;

const MATRIX_SCALE: u32 = 8;
const MATRIX_SIZE: usize = 1 << MATRIX_SCALE;

/// Rangefrac generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rangefrac;

#[derive(Debug, Clone)]
struct RangefracState {
    data: Vec<f64>,
}

#[inline]
fn wrap(coord: i64) -> usize {
    coord.rem_euclid(MATRIX_SIZE as i64) as usize
}

#[inline]
fn cell(x: i64, y: i64) -> usize {
    wrap(y) * MATRIX_SIZE + wrap(x)
}

const NEIGHBOURS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

fn generate(rng: &mut DeterministicRng) -> Vec<f64> {
    let mut data = vec![0.0; MATRIX_SIZE * MATRIX_SIZE];
    // Step size at which each cell was filled; 0 means not yet.
    let mut level = vec![0usize; MATRIX_SIZE * MATRIX_SIZE];

    let mut step = MATRIX_SIZE / 2;
    while step > 0 {
        let s = step as i64;
        for y in (0..MATRIX_SIZE).step_by(step) {
            for x in (0..MATRIX_SIZE).step_by(step) {
                let here = y * MATRIX_SIZE + x;
                if level[here] >= step {
                    continue;
                }

                let mut min: f64 = 1.0;
                let mut max: f64 = 0.0;
                for (nx, ny) in NEIGHBOURS {
                    let n = cell(x as i64 + nx * s, y as i64 + ny * s);
                    if level[n] > step {
                        min = min.min(data[n]);
                        max = max.max(data[n]);
                    }
                }

                let mut value = rng.frand_between(min, max);
                if step >= MATRIX_SIZE / 2 {
                    // The seed points bound the whole image; push them
                    // towards the extremes for stronger contrast.
                    let rounded = if value > 0.5 { 1.0 } else { 0.0 };
                    value = (rounded + value) / 2.0;
                }
                data[here] = value;
                level[here] = step;
            }
        }
        step /= 2;
    }
    data
}

impl Generator for Rangefrac {
    fn name(&self) -> &'static str {
        "rangefrac"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::new(true, true)
    }

    fn init(&self, rng: &mut DeterministicRng) -> Box<dyn PointSampler> {
        Box::new(RangefracState {
            data: generate(rng),
        })
    }
}

impl RangefracState {
    fn weight(mx: i64, my: i64, x: f64, y: f64) -> f64 {
        let size = MATRIX_SIZE as f64;
        let distance = (mx as f64 - x * size).hypot(my as f64 - y * size);
        (1.0 - distance).max(0.0)
    }
}

impl PointSampler for RangefracState {
    fn sample(&self, x: f64, y: f64) -> f64 {
        if !x.is_finite() || !y.is_finite() {
            return 0.0;
        }
        let size = MATRIX_SIZE as f64;
        let tweaker = 0.5 / size;
        let small_x = (x * size - tweaker).floor() as i64;
        let small_y = (y * size - tweaker).floor() as i64;

        let mut total_weight = 0.0;
        let mut total = 0.0;
        for (mx, my) in [
            (small_x, small_y),
            (small_x + 1, small_y),
            (small_x, small_y + 1),
            (small_x + 1, small_y + 1),
        ] {
            let weight = Self::weight(mx, my, x, y);
            total += self.data[cell(mx, my)] * weight;
            total_weight += weight;
        }

        if total_weight > 0.0 {
            total / total_weight
        } else {
            self.data[cell(small_x, small_y)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_values_in_range() {
        let data = generate(&mut DeterministicRng::new(77));
        assert_eq!(data.len(), MATRIX_SIZE * MATRIX_SIZE);
        assert!(data.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_seed_points_pushed_to_extremes() {
        let data = generate(&mut DeterministicRng::new(5));
        let half = MATRIX_SIZE / 2;
        for (x, y) in [(0, 0), (half, 0), (0, half), (half, half)] {
            let v = data[y * MATRIX_SIZE + x];
            assert!(v <= 0.25 || v >= 0.5, "seed point {} not pushed", v);
        }
    }

    #[test]
    fn test_sample_hits_matrix_points() {
        let state = RangefracState {
            data: generate(&mut DeterministicRng::new(8)),
        };
        let v = state.sample(10.0 / MATRIX_SIZE as f64, 20.0 / MATRIX_SIZE as f64);
        assert!((v - state.data[20 * MATRIX_SIZE + 10]).abs() < 1e-9);
    }

    #[test]
    fn test_wraps_at_tile_edges() {
        let state = Rangefrac.init(&mut DeterministicRng::new(31));
        for i in 0..16 {
            let y = i as f64 / 16.0 + 0.013;
            let a = state.sample(0.0, y);
            let b = state.sample(1.0, y);
            assert!((a - b).abs() < 1e-9);
        }
    }
}
