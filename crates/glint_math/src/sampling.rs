//! Random sampling and vector helpers.
//!
//! Every routine takes the random source explicitly so callers control
//! seeding. Render workers each hold their own generator; nothing here
//! touches global or thread-local state.

use crate::Vec3;
use rand::{Rng, RngCore};

/// Uniform f32 in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform f32 in [min, max).
#[inline]
pub fn random_range(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + (max - min) * gen_f32(rng)
}

/// Vector with each component uniform in [min, max).
pub fn random_vector(rng: &mut dyn RngCore, min: f32, max: f32) -> Vec3 {
    Vec3::new(
        random_range(rng, min, max),
        random_range(rng, min, max),
        random_range(rng, min, max),
    )
}

/// Uniform point strictly inside the unit sphere.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    // Rejection sampling from the enclosing cube
    loop {
        let p = random_vector(rng, -1.0, 1.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Uniform direction on the surface of the unit sphere.
///
/// Added to a surface normal this gives a cosine-weighted (Lambertian)
/// distribution over the hemisphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_in_unit_sphere(rng);
        let len_sq = p.length_squared();
        // Very short vectors lose precision when normalized
        if len_sq > 1e-12 {
            return p / len_sq.sqrt();
        }
    }
}

/// Uniform point inside the unit disk in the XY plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            random_range(rng, -1.0, 1.0),
            random_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// True if every component is close to zero.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.length_squared() < 1e-8
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with unit normal `n`.
///
/// `etai_over_etat` is the ratio of refractive indices (incident over
/// transmitted). The result is split into components perpendicular and
/// parallel to the normal.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_range_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let x = random_range(&mut rng, 0.1, 0.4);
            assert!((0.1..0.4).contains(&x), "{x} out of range");
        }
    }

    #[test]
    fn test_unit_sphere_samples() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..1000 {
            assert!(random_in_unit_sphere(&mut rng).length_squared() < 1.0);
            assert!((random_unit_vector(&mut rng).length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_unit_disk_samples() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let p = random_in_unit_disk(&mut rng);
            assert_eq!(p.z, 0.0);
            assert!(p.length_squared() < 1.0);
        }
    }

    #[test]
    fn test_unit_vector_is_not_biased_to_one_side() {
        let mut rng = StdRng::seed_from_u64(4);
        let mean = (0..20_000)
            .map(|_| random_unit_vector(&mut rng))
            .fold(Vec3::ZERO, |acc, v| acc + v)
            / 20_000.0;
        assert!(mean.length() < 0.05, "mean direction {mean:?}");
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(v, Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_same_medium_is_straight() {
        let uv = Vec3::new(1.0, -1.0, 0.0).normalize();
        let out = refract(uv, Vec3::Y, 1.0);
        assert!((out - uv).length() < 1e-5);
    }

    #[test]
    fn test_refract_obeys_snell() {
        let uv = Vec3::new(0.5, -1.0, 0.0).normalize();
        let ratio = 1.0 / 1.5;
        let out = refract(uv, Vec3::Y, ratio);

        let sin_in = uv.cross(Vec3::Y).length();
        let sin_out = out.normalize().cross(Vec3::Y).length();
        assert!((sin_in * ratio - sin_out).abs() < 1e-4);
        assert!((out.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_near_zero() {
        assert!(near_zero(Vec3::splat(1e-5)));
        assert!(!near_zero(Vec3::new(0.0, 0.01, 0.0)));
    }
}
