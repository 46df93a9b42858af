//! Procedural scene population.
//!
//! Scatters spheres resting on the ground plane `y = 0` across a square
//! region, using rejection sampling so that no two spheres intersect.

use std::sync::Arc;

use crate::{
    Color, Dielectric, Footprint, HitRecord, Hittable, HittableList, Lambertian, Material, Metal,
    Ray, RenderError, Sphere,
};
use glint_core::SceneSettings;
use glint_math::{gen_f32, random_range, random_vector, Interval, Vec3};
use rand::RngCore;

/// Candidate positions tried for one sphere before generation gives up.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 50;

/// Index of refraction used for generated glass spheres.
const GLASS_IOR: f32 = 1.5;

/// A built scene: the spheres to render and where they sit.
pub struct Scene {
    world: HittableList,
    footprints: Vec<Footprint>,
    base_count: usize,
    requested: usize,
}

impl Scene {
    /// All objects in the scene.
    pub fn world(&self) -> &HittableList {
        &self.world
    }

    /// Occupied space of every sphere, base objects first.
    pub fn footprints(&self) -> &[Footprint] {
        &self.footprints
    }

    /// Number of spheres placed by the generator (excludes base objects).
    pub fn placed(&self) -> usize {
        self.footprints.len() - self.base_count
    }

    /// Number of spheres the generator was asked to place.
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// False if generation ran out of room before placing every sphere.
    pub fn is_complete(&self) -> bool {
        self.placed() == self.requested
    }

    /// Populate a scene from config-file settings.
    pub fn from_settings(
        settings: &SceneSettings,
        base_objects: Vec<Sphere>,
        rng: &mut dyn RngCore,
    ) -> Result<Self, RenderError> {
        build_random_scene(
            base_objects,
            settings.sphere_count,
            Interval::new(-settings.bounds, settings.bounds),
            Interval::new(settings.radius_min, settings.radius_max),
            rng,
        )
    }
}

impl Hittable for Scene {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        self.world.hit(ray, ray_t, rec)
    }
}

/// Add up to `count` random spheres to `base_objects`.
///
/// Each sphere gets one radius drawn from `radius_range` and rests on
/// the ground (`y = radius`). Its `x` and `z` are drawn from `bounds`;
/// a candidate position that would clip into any sphere already in the
/// scene is redrawn; after [`MAX_PLACEMENT_ATTEMPTS`] failures generation stops
/// and the scene is returned with fewer spheres than requested.
///
/// Materials are roughly 60% diffuse, 30% metal and 10% glass.
pub fn build_random_scene(
    base_objects: Vec<Sphere>,
    count: usize,
    bounds: Interval,
    radius_range: Interval,
    rng: &mut dyn RngCore,
) -> Result<Scene, RenderError> {
    if bounds.is_empty() || !bounds.size().is_finite() {
        return Err(RenderError::InvalidConfig(format!(
            "placement bounds [{}, {}] are empty or unbounded",
            bounds.min, bounds.max
        )));
    }
    if radius_range.is_empty()
        || radius_range.min.is_nan()
        || radius_range.min <= 0.0
        || !radius_range.max.is_finite()
    {
        return Err(RenderError::InvalidConfig(format!(
            "radius range [{}, {}] must be positive and non-empty",
            radius_range.min, radius_range.max
        )));
    }

    let base_count = base_objects.len();
    let mut world = HittableList::new();
    let mut footprints = Vec::with_capacity(base_count + count);

    for sphere in base_objects {
        footprints.push(sphere.footprint());
        world.add(Box::new(sphere));
    }

    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(GLASS_IOR));

    'spheres: for index in 0..count {
        // Radius is fixed per sphere; only the position is redrawn
        let radius = random_range(rng, radius_range.min, radius_range.max);
        let mut attempts = 0;
        let center = loop {
            if attempts == MAX_PLACEMENT_ATTEMPTS {
                log::warn!(
                    "No room for sphere {} after {} attempts, stopping at {} of {}",
                    index + 1,
                    MAX_PLACEMENT_ATTEMPTS,
                    index,
                    count
                );
                break 'spheres;
            }
            attempts += 1;

            let center = Vec3::new(
                random_range(rng, bounds.min, bounds.max),
                radius,
                random_range(rng, bounds.min, bounds.max),
            );

            if !footprints.iter().any(|f| f.clips(center, radius)) {
                break center;
            }
        };

        let material = random_material(rng, &glass);
        let sphere = Sphere::new(center, radius, material)?;
        footprints.push(sphere.footprint());
        world.add(Box::new(sphere));
    }

    let scene = Scene {
        world,
        footprints,
        base_count,
        requested: count,
    };
    log::info!(
        "Scene has {} spheres ({} base, {} of {} generated)",
        scene.world.len(),
        base_count,
        scene.placed(),
        count
    );

    Ok(scene)
}

fn random_material(rng: &mut dyn RngCore, glass: &Arc<dyn Material>) -> Arc<dyn Material> {
    let choice = gen_f32(rng);
    if choice < 0.6 {
        Arc::new(Lambertian::new(random_vector(rng, 0.0, 1.0)))
    } else if choice < 0.9 {
        let albedo = random_vector(rng, 0.6, 1.0);
        let fuzz = random_range(rng, 0.0, 0.5);
        Arc::new(Metal::new(albedo, fuzz))
    } else {
        Arc::clone(glass)
    }
}

/// The fixed objects of the demonstration scene.
///
/// A large grey sphere serves as the ground; its top sits at `y = 0`.
pub fn demo_base_objects() -> Result<Vec<Sphere>, RenderError> {
    Ok(vec![
        Sphere::new(
            Vec3::new(2.0, 1.0, 4.0),
            1.0,
            Arc::new(Lambertian::new(Color::new(0.9, 0.1, 0.1))),
        )?,
        Sphere::new(
            Vec3::new(0.0, -1000.0, -1.0),
            1000.0,
            Arc::new(Lambertian::new(Color::splat(0.5))),
        )?,
        Sphere::new(
            Vec3::new(0.0, 1.0, 2.0),
            1.0,
            Arc::new(Dielectric::new(GLASS_IOR)),
        )?,
        Sphere::new(
            Vec3::new(0.0, 1.0, -2.0),
            1.0,
            Arc::new(Metal::new(Color::splat(0.8), 0.8)),
        )?,
        Sphere::new(
            Vec3::new(2.0, 1.0, -6.0),
            1.0,
            Arc::new(Metal::new(Color::splat(0.8), 0.0)),
        )?,
    ])
}
