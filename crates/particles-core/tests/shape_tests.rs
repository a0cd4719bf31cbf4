// Integration tests for the target-position generators.

use glam::Vec3;
use particles_core::shape::{heart_surface, heart_unscale, ring_start};
use particles_core::Shape;
use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn points(buf: &[f32]) -> Vec<Vec3> {
    buf.chunks_exact(3).map(Vec3::from_slice).collect()
}

#[test]
fn every_shape_yields_exactly_n_finite_points() {
    let mut rng = StdRng::seed_from_u64(11);
    for shape in Shape::ALL {
        for n in [1, 7, 5000] {
            let buf = shape.generate(n, &mut rng);
            assert_eq!(buf.len(), n * 3, "{shape} with {n} points");
            assert!(
                buf.iter().all(|v| v.is_finite()),
                "{shape} produced a non-finite coordinate"
            );
        }
    }
}

#[test]
fn heart_points_satisfy_the_surface_inequality() {
    let buf = Shape::Heart.generate(20_000, &mut StdRng::seed_from_u64(12));
    for p in points(&buf) {
        let (u, v, w) = heart_unscale(p);
        assert!(
            heart_surface(u, v, w) <= 1e-4,
            "point {p:?} lies outside the heart"
        );
    }
}

#[test]
fn heart_is_not_collapsed_to_origin() {
    let buf = Shape::Heart.generate(2000, &mut StdRng::seed_from_u64(13));
    let spread = points(&buf).iter().map(|p| p.length()).fold(0.0, f32::max);
    assert!(spread > 3.0);
}

#[test]
fn sphere_splits_into_shell_and_tilted_ring() {
    let n = 4000;
    let buf = Shape::Sphere.generate(n, &mut StdRng::seed_from_u64(14));
    let pts = points(&buf);
    let split = ring_start(n);
    for p in &pts[..split] {
        assert!((p.length() - 9.0).abs() < 1e-3, "shell point {p:?}");
    }
    let (sin_t, cos_t) = 0.4_f32.sin_cos();
    for p in &pts[split..] {
        // undo the tilt about X
        let ry = p.y * cos_t + p.z * sin_t;
        let rz = -p.y * sin_t + p.z * cos_t;
        let radius = (p.x * p.x + rz * rz).sqrt();
        assert!((12.0 - 1e-3..=20.0 + 1e-3).contains(&radius), "ring radius {radius}");
        assert!(ry.abs() <= 0.25 + 1e-4, "ring height {ry}");
    }
}

#[test]
fn buddha_points_lie_on_one_of_three_shells() {
    let buf = Shape::Buddha.generate(3000, &mut StdRng::seed_from_u64(15));
    let shells = [(2.8, 1.0, 7.5), (5.0, 1.1, 0.0), (7.5, 0.4, -4.5)];
    let mut hits = [0usize; 3];
    for p in points(&buf) {
        let idx = shells.iter().position(|&(r, sy, oy): &(f32, f32, f32)| {
            let y = (p.y - oy) / sy;
            ((p.x * p.x + y * y + p.z * p.z).sqrt() - r).abs() < 1e-3
        });
        hits[idx.expect("point on no shell")] += 1;
    }
    // 0.25 / 0.40 / 0.35 split, loosely
    assert!(hits[0] > 600 && hits[0] < 900, "{hits:?}");
    assert!(hits[1] > 1050 && hits[1] < 1350, "{hits:?}");
    assert!(hits[2] > 900 && hits[2] < 1200, "{hits:?}");
}

#[test]
fn dna_strands_ramp_linearly_in_height() {
    let n = 1000;
    let buf = Shape::Dna.generate(n, &mut StdRng::seed_from_u64(16));
    let pts = points(&buf);
    assert!((pts[0].y + 12.0).abs() < 1e-4);
    for (i, p) in pts.iter().enumerate() {
        let expected = (i as f32 / n as f32 - 0.5) * 24.0;
        assert!((p.y - expected).abs() < 1e-3);
        let r = (p.x * p.x + p.z * p.z).sqrt();
        assert!(r > 3.6 && r < 4.4, "radius {r}");
    }
}

#[test]
fn fireworks_stay_inside_ball() {
    let buf = Shape::Fireworks.generate(5000, &mut StdRng::seed_from_u64(17));
    let pts = points(&buf);
    assert!(pts.iter().all(|p| p.length() <= 15.0 + 1e-3));
    // r = u^0.3 * 15 puts most of the mass near the surface
    let outer = pts.iter().filter(|p| p.length() > 7.5).count();
    assert!(outer > pts.len() * 3 / 4);
}

#[test]
fn galaxy_flattens_with_radius() {
    let buf = Shape::Galaxy.generate(8000, &mut StdRng::seed_from_u64(18));
    for p in points(&buf) {
        let r = (p.x * p.x + p.z * p.z).sqrt();
        assert!(r < 16.5);
        assert!(p.y.abs() <= 2.0 + 1e-4);
    }
}

#[test]
fn heart_gives_up_at_the_origin_when_nothing_is_accepted() {
    // A constant near-1.0 stream maps every candidate outside the surface.
    let mut rng = StepRng::new(u64::MAX, 0);
    let buf = Shape::Heart.generate(1000, &mut rng);
    assert_eq!(buf.len(), 3000);
    assert!(buf.iter().all(|v| *v == 0.0));
    let (u, v, w) = heart_unscale(Vec3::ZERO);
    assert!(heart_surface(u, v, w) <= 0.0);
}
