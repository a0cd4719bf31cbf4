//! Target-position generators, one per shape.
//!
//! Every generator is a closed-form function of the particle index and a few
//! uniform samples, except the heart, which rejection-samples an implicit
//! surface. Targets are written into a flat `[x, y, z, x, y, z, ...]` buffer so
//! they can be handed to the GPU without repacking.

use crate::constants::*;
use crate::error::{CoreError, CoreResult};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Shape {
    #[default]
    Heart,
    Sphere,
    Flower,
    Buddha,
    Dna,
    Knot,
    Galaxy,
    Fireworks,
}

impl Shape {
    pub const ALL: [Shape; 8] = [
        Shape::Heart,
        Shape::Sphere,
        Shape::Flower,
        Shape::Buddha,
        Shape::Dna,
        Shape::Knot,
        Shape::Galaxy,
        Shape::Fireworks,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Shape::Heart => "heart",
            Shape::Sphere => "sphere",
            Shape::Flower => "flower",
            Shape::Buddha => "buddha",
            Shape::Dna => "dna",
            Shape::Knot => "knot",
            Shape::Galaxy => "galaxy",
            Shape::Fireworks => "fireworks",
        }
    }

    /// Human-facing label for the settings panel.
    pub fn label(self) -> &'static str {
        match self {
            Shape::Heart => "Heart",
            Shape::Sphere => "Saturn",
            Shape::Flower => "Flower",
            Shape::Buddha => "Buddha",
            Shape::Dna => "DNA",
            Shape::Knot => "Torus knot",
            Shape::Galaxy => "Galaxy",
            Shape::Fireworks => "Fireworks",
        }
    }

    /// Angular rate (rad/s about Y) at which the target field spins, if any.
    pub fn spin_rate(self) -> Option<f32> {
        match self {
            Shape::Dna => Some(DNA_SPIN_RATE),
            Shape::Galaxy => Some(GALAXY_SPIN_RATE),
            _ => None,
        }
    }

    /// Generate `count` targets into a fresh flat buffer of length `3 * count`.
    pub fn generate<R: Rng + ?Sized>(self, count: usize, rng: &mut R) -> Vec<f32> {
        let mut out = vec![0.0; count * 3];
        self.generate_into(&mut out, rng);
        out
    }

    /// Overwrite `out` (length must be a multiple of 3) with targets for this shape.
    pub fn generate_into<R: Rng + ?Sized>(self, out: &mut [f32], rng: &mut R) {
        match self {
            Shape::Heart => fill_heart(out, rng),
            Shape::Sphere => fill_with(out, rng, sphere),
            Shape::Flower => fill_with(out, rng, flower),
            Shape::Buddha => fill_with(out, rng, buddha),
            Shape::Dna => fill_with(out, rng, dna),
            Shape::Knot => fill_with(out, rng, knot),
            Shape::Galaxy => fill_with(out, rng, galaxy),
            Shape::Fireworks => fill_with(out, rng, fireworks),
        }
    }
}

fn fill_with<R: Rng + ?Sized>(
    out: &mut [f32],
    rng: &mut R,
    point: fn(usize, usize, &mut R) -> Vec3,
) {
    let count = out.len() / 3;
    for (i, slot) in out.chunks_exact_mut(3).enumerate() {
        slot.copy_from_slice(&point(i, count, rng).to_array());
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shape {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Shape::ALL
            .into_iter()
            .find(|shape| shape.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownShape(s.to_string()))
    }
}

// ---------------- heart ----------------

const HEART_SAMPLE_SCALE: f32 = 1.2;
const HEART_SCALE_XY: f32 = 6.0;
const HEART_SCALE_Z: f32 = 2.5;

/// Implicit heart surface; a point `(u, v, w)` is inside when this is `<= 0`.
#[inline]
pub fn heart_surface(u: f32, v: f32, w: f32) -> f32 {
    let u2 = u * u;
    let v2 = v * v;
    let w3 = w * w * w;
    let a = u2 + 2.25 * v2 + w * w - 1.0;
    a * a * a - u2 * w3 - 0.1125 * v2 * w3
}

/// Map a scaled heart target back to the sampling frame `(u, v, w)`.
#[inline]
pub fn heart_unscale(p: Vec3) -> (f32, f32, f32) {
    (p.x / HEART_SCALE_XY, p.z / HEART_SCALE_Z, p.y / HEART_SCALE_XY)
}

fn heart_candidate<R: Rng + ?Sized>(rng: &mut R) -> Option<Vec3> {
    let u = (rng.gen::<f32>() * 3.0 - 1.5) * HEART_SAMPLE_SCALE;
    let v = (rng.gen::<f32>() * 3.0 - 1.5) * HEART_SAMPLE_SCALE;
    let w = (rng.gen::<f32>() * 2.5 - 1.0) * HEART_SAMPLE_SCALE;
    (heart_surface(u, v, w) <= 0.0)
        .then(|| Vec3::new(u * HEART_SCALE_XY, w * HEART_SCALE_XY, v * HEART_SCALE_Z))
}

fn fill_heart<R: Rng + ?Sized>(out: &mut [f32], rng: &mut R) {
    let count = out.len() / 3;
    let mut budget = count.saturating_mul(HEART_ATTEMPTS_PER_POINT);
    let mut accepted = 0;
    while accepted < count && budget > 0 {
        budget -= 1;
        if let Some(p) = heart_candidate(rng) {
            out[accepted * 3..accepted * 3 + 3].copy_from_slice(&p.to_array());
            accepted += 1;
        }
    }
    if accepted < count {
        // The origin lies inside the surface, so the fallback still satisfies it.
        log::warn!(
            "[shape] heart sampling gave up after {} of {} points; parking the rest at the origin",
            accepted,
            count
        );
        out[accepted * 3..].fill(0.0);
    }
}

// ---------------- closed-form shapes ----------------

#[inline]
fn unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    Vec3::new(
        phi.sin() * theta.cos(),
        phi.sin() * theta.sin(),
        phi.cos(),
    )
}

#[inline]
fn jitter<R: Rng + ?Sized>(rng: &mut R, amount: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * amount
}

/// Index at which the sphere's ring population begins.
#[inline]
pub fn ring_start(count: usize) -> usize {
    count * RING_FRACTION_NUM / RING_FRACTION_DEN
}

fn sphere<R: Rng + ?Sized>(i: usize, count: usize, rng: &mut R) -> Vec3 {
    if i < ring_start(count) {
        return unit_sphere(rng) * SPHERE_RADIUS;
    }
    let radius = RING_INNER_RADIUS + rng.gen::<f32>() * RING_WIDTH;
    let angle = rng.gen::<f32>() * TAU;
    let rx = radius * angle.cos();
    let rz = radius * angle.sin();
    let ry = jitter(rng, RING_HEIGHT_JITTER);
    let (sin_t, cos_t) = RING_TILT.sin_cos();
    Vec3::new(rx, ry * cos_t - rz * sin_t, ry * sin_t + rz * cos_t)
}

fn flower<R: Rng + ?Sized>(i: usize, _count: usize, _rng: &mut R) -> Vec3 {
    let angle = i as f32 * 137.5_f32.to_radians();
    let r = 0.4 * (i as f32).sqrt() * 0.6;
    Vec3::new(r * angle.cos(), (r * 0.6).sin() * 4.0 - 3.0, r * angle.sin())
}

fn buddha<R: Rng + ?Sized>(_i: usize, _count: usize, rng: &mut R) -> Vec3 {
    // (probability ceiling, radius, vertical scale, vertical offset)
    const SHELLS: [(f32, f32, f32, f32); 3] = [
        (0.25, 2.8, 1.0, 7.5),
        (0.65, 5.0, 1.1, 0.0),
        (1.0, 7.5, 0.4, -4.5),
    ];
    let p = rng.gen::<f32>();
    let (_, radius, y_scale, y_offset) = SHELLS
        .iter()
        .copied()
        .find(|(ceiling, ..)| p < *ceiling)
        .unwrap_or(SHELLS[2]);
    let s = unit_sphere(rng) * radius;
    Vec3::new(s.x, s.y * y_scale + y_offset, s.z)
}

fn dna<R: Rng + ?Sized>(i: usize, count: usize, rng: &mut R) -> Vec3 {
    let strand = if i % 2 == 0 { 1.0 } else { -1.0 };
    let f = i as f32 / count as f32;
    let t = f * PI * 12.0 + strand * PI;
    let radius = 4.0;
    Vec3::new(
        t.cos() * radius + jitter(rng, 0.5),
        (f - 0.5) * 24.0,
        t.sin() * radius + jitter(rng, 0.5),
    )
}

fn knot<R: Rng + ?Sized>(i: usize, count: usize, rng: &mut R) -> Vec3 {
    let (p, q, scale) = (2.0_f32, 3.0_f32, 3.2_f32);
    let t = (i as f32 / count as f32) * TAU * 3.0;
    let r = (q * t).cos() + 2.0;
    Vec3::new(
        scale * r * (p * t).cos() + jitter(rng, 1.0),
        scale * -(q * t).sin() + jitter(rng, 1.0),
        scale * r * (p * t).sin() + jitter(rng, 1.0),
    )
}

fn galaxy<R: Rng + ?Sized>(i: usize, _count: usize, rng: &mut R) -> Vec3 {
    const ARMS: usize = 4;
    let radius = rng.gen::<f32>() * 16.0;
    let arm_angle = TAU / ARMS as f32 * (i % ARMS) as f32;
    let angle = radius * 0.8 + arm_angle;
    let height = (-radius * 0.3).exp() * 4.0;
    Vec3::new(
        angle.cos() * radius + jitter(rng, 0.5),
        jitter(rng, height),
        angle.sin() * radius + jitter(rng, 0.5),
    )
}

fn fireworks<R: Rng + ?Sized>(_i: usize, _count: usize, rng: &mut R) -> Vec3 {
    let r = rng.gen::<f32>().powf(0.3) * 15.0;
    unit_sphere(rng) * r
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn shape_names_round_trip_through_from_str() {
        for shape in Shape::ALL {
            assert_eq!(shape.name().parse::<Shape>().unwrap(), shape);
        }
        assert_eq!(" Galaxy ".parse::<Shape>().unwrap(), Shape::Galaxy);
        assert!(matches!(
            "torus".parse::<Shape>(),
            Err(CoreError::UnknownShape(_))
        ));
    }

    #[test]
    fn origin_is_inside_heart() {
        assert!(heart_surface(0.0, 0.0, 0.0) <= 0.0);
    }

    #[test]
    fn only_dna_and_galaxy_spin() {
        let spinning: Vec<Shape> = Shape::ALL
            .into_iter()
            .filter(|s| s.spin_rate().is_some())
            .collect();
        assert_eq!(spinning, vec![Shape::Dna, Shape::Galaxy]);
    }

    #[test]
    fn flower_is_deterministic_per_index() {
        let mut a = StdRng::seed_from_u64(1);
        let mut b = StdRng::seed_from_u64(2);
        assert_eq!(
            Shape::Flower.generate(64, &mut a),
            Shape::Flower.generate(64, &mut b)
        );
    }

    #[test]
    fn ring_start_is_seventy_percent() {
        assert_eq!(ring_start(10_000), 7_000);
        assert_eq!(ring_start(25_000), 17_500);
        assert_eq!(ring_start(0), 0);
    }

    #[test]
    fn empty_set_generates_nothing() {
        let mut rng = StdRng::seed_from_u64(3);
        for shape in Shape::ALL {
            assert!(shape.generate(0, &mut rng).is_empty());
        }
    }
}
