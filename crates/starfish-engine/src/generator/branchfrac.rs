//! Branching ray fractal.
//!
//! A tree of rays grows from the tile centre: every ray sprouts two or three
//! shorter children at its tip, down to a fixed depth or until the ray
//! budget is spent. The value of a point is `1 / (10 d + 1)` for its distance
//! `d` to the nearest ray, with a round glow past the ends of each ray.

use std::f64::consts::PI;

use super::{Capabilities, Generator, PointSampler};
use crate::rng::DeterministicRng;

const MAX_RAYS: usize = 128;
const MAX_DEPTH: u32 = 5;
const MIN_BRANCHES: usize = 2;
const MAX_BRANCHES: usize = 4;
const BRANCH_SCALE: f64 = 0.7;
const ROOT_LENGTH: f64 = 0.2;
const CLOSE_ENOUGH: f64 = 0.0001;

/// Branchfrac generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Branchfrac;

#[derive(Debug, Clone)]
struct Ray {
    x: f64,
    y: f64,
    angle: f64,
    length: f64,
    depth: u32,
    children: Vec<usize>,
}

impl Ray {
    /// Distance from `(x, y)` to this ray segment.
    fn distance(&self, x: f64, y: f64) -> f64 {
        let dx = self.x - x;
        let dy = self.y - y;
        let hyp = dy.hypot(dx);
        let angle = (dy / dx).atan() + self.angle;
        let mut distance = (angle.cos() * hyp).abs();
        let mut leg = angle.sin() * hyp;
        if self.x < x {
            leg = -leg;
        }
        if leg < 0.0 {
            distance = distance.hypot(leg);
        }
        if leg > self.length {
            distance = distance.hypot(leg - self.length);
        }
        distance
    }
}

#[derive(Debug, Clone)]
struct Tree {
    rays: Vec<Ray>,
}

impl Tree {
    fn grow(rng: &mut DeterministicRng) -> Self {
        let root = Ray {
            x: 0.5,
            y: 0.5,
            angle: rng.frand(PI * 2.0),
            length: ROOT_LENGTH,
            depth: 0,
            children: Vec::new(),
        };
        let mut tree = Tree {
            rays: Vec::with_capacity(MAX_RAYS),
        };
        tree.rays.push(root);
        tree.make_leaves(0, rng);
        tree
    }

    fn make_leaves(&mut self, parent: usize, rng: &mut DeterministicRng) {
        let count = rng.gen_range(MIN_BRANCHES..MAX_BRANCHES);
        for _ in 0..count {
            if self.rays.len() >= MAX_RAYS {
                return;
            }
            let (x, y, length, depth) = {
                let p = &self.rays[parent];
                (
                    p.x - p.angle.sin() * p.length,
                    p.y - p.angle.cos() * p.length,
                    p.length * BRANCH_SCALE,
                    p.depth + 1,
                )
            };
            let index = self.rays.len();
            self.rays.push(Ray {
                x,
                y,
                angle: rng.frand(PI),
                length,
                depth,
                children: Vec::new(),
            });
            self.rays[parent].children.push(index);
            if depth < MAX_DEPTH {
                self.make_leaves(index, rng);
            }
        }
    }

    fn nearest(&self, index: usize, x: f64, y: f64) -> f64 {
        let ray = &self.rays[index];
        let mut best = ray.distance(x, y);
        if best > CLOSE_ENOUGH && ray.depth < MAX_DEPTH {
            for &child in &ray.children {
                best = best.min(self.nearest(child, x, y));
            }
        }
        best
    }
}

impl Generator for Branchfrac {
    fn name(&self) -> &'static str {
        "branchfrac"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::new(true, true)
    }

    fn init(&self, rng: &mut DeterministicRng) -> Box<dyn PointSampler> {
        Box::new(Tree::grow(rng))
    }
}

impl PointSampler for Tree {
    fn sample(&self, x: f64, y: f64) -> f64 {
        let d = self.nearest(0, x, y);
        1.0 / (d * 10.0 + 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_respects_budgets() {
        for seed in 0..10 {
            let tree = Tree::grow(&mut DeterministicRng::new(seed));
            assert!(tree.rays.len() <= MAX_RAYS);
            assert!(tree.rays.iter().all(|r| r.depth <= MAX_DEPTH));
            assert!(tree
                .rays
                .iter()
                .all(|r| r.children.len() < MAX_BRANCHES));
        }
    }

    #[test]
    fn test_children_start_at_parent_tip() {
        let tree = Tree::grow(&mut DeterministicRng::new(3));
        let root = &tree.rays[0];
        for &c in &root.children {
            let child = &tree.rays[c];
            assert!((child.x - (root.x - root.angle.sin() * root.length)).abs() < 1e-12);
            assert!((child.length - root.length * BRANCH_SCALE).abs() < 1e-12);
        }
    }

    #[test]
    fn test_ray_origin_is_brightest() {
        let tree = Tree::grow(&mut DeterministicRng::new(8));
        let v = tree.sample(0.5 + 1e-12, 0.5);
        assert!(v > 0.99, "got {}", v);
    }

    #[test]
    fn test_values_in_range() {
        let tree = Branchfrac.init(&mut DeterministicRng::new(17));
        for i in 0..50 {
            let v = tree.sample(i as f64 / 50.0, 0.2 + i as f64 / 80.0);
            assert!(v > 0.0 && v <= 1.0, "got {}", v);
        }
    }
}
