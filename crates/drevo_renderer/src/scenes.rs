//! Ready-made scenes and cameras.

use crate::error::Result;
use crate::random::gen_f32;
use crate::{Camera, CameraSettings, Color, Material, Primitive, Scene};
use drevo_math::Vec3;
use rand::RngCore;

/// Centers of the three large feature spheres in [`random_scene`].
const FEATURE_CENTERS: [Vec3; 3] = [
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(-4.0, 1.0, 0.0),
    Vec3::new(4.0, 1.0, 0.0),
];

/// Small spheres are kept at least this far from the feature spheres.
const FEATURE_CLEARANCE: f32 = 1.25;

/// A huge ground sphere, a grid of small randomly placed spheres and three
/// large spheres: glass in the middle, matte on the left, mirror on the right.
///
/// With `floating` set, small spheres are lifted above the plane
/// `x + 2y = 0` instead of resting on the ground.
pub fn random_scene(floating: bool, rng: &mut dyn RngCore) -> Result<Scene> {
    let mut scene = Scene::new();

    scene.add(Primitive::sphere(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Material::diffuse(Color::new(0.5, 0.5, 0.5)),
    )?);

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f32(rng);

            let x = a as f32 + 0.9 * gen_f32(rng);
            let y = if floating {
                ((-x - 1.0) / 4.0 + gen_f32(rng)).max(0.2)
            } else {
                0.2
            };
            let z = b as f32 + 0.9 * gen_f32(rng);
            let center = Vec3::new(x, y, z);

            // Prevent intersecting the feature spheres
            if FEATURE_CENTERS
                .iter()
                .any(|feature| (center - *feature).length() <= FEATURE_CLEARANCE)
            {
                continue;
            }
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                Material::diffuse(Color::new(gen_f32(rng), 0.0, 0.0))
            } else if choose_mat < 0.95 {
                let albedo = Color::new(
                    0.5 * (1.0 + gen_f32(rng)),
                    0.5 * gen_f32(rng),
                    0.5 * gen_f32(rng),
                );
                Material::reflective(albedo, 0.5 * gen_f32(rng))
            } else {
                Material::dielectric(1.5)?
            };

            scene.add(Primitive::sphere(center, 0.2, material)?);
        }
    }

    let [glass, matte, mirror] = FEATURE_CENTERS;
    scene.add(Primitive::sphere(glass, 1.0, Material::dielectric(1.5)?)?);
    scene.add(Primitive::sphere(
        matte,
        1.0,
        Material::diffuse(Color::new(0.2, 0.2, 0.2)),
    )?);
    scene.add(Primitive::sphere(
        mirror,
        1.0,
        Material::reflective(Color::new(0.7, 0.6, 0.5), 0.0),
    )?);

    log::info!(
        "Built {} scene with {} spheres",
        if floating { "floating" } else { "random" },
        scene.len()
    );
    Ok(scene)
}

/// One matte sphere of radius 0.5 centered at (0, 0, -1).
pub fn single_sphere() -> Result<Scene> {
    let sphere = Primitive::sphere(
        Vec3::new(0.0, 0.0, -1.0),
        0.5,
        Material::diffuse(Color::new(0.8, 0.3, 0.3)),
    )?;
    Ok(Scene::new().with(sphere))
}

/// Camera framing [`random_scene`] from slightly above the ground.
pub fn default_camera(width: u32, height: u32) -> Result<Camera> {
    let look_from = Vec3::new(7.8, 1.5, 1.95);
    let look_at = Vec3::new(0.0, 1.0, 0.0);
    let focus_dist = (look_from - look_at).length();

    CameraSettings::new()
        .with_resolution(width, height)
        .with_position(look_from, look_at, Vec3::Y)
        .with_lens(45.0, 0.0, focus_dist)
        .build()
}

/// Pinhole camera at the origin looking down -Z, framing [`single_sphere`].
pub fn single_sphere_camera(width: u32, height: u32) -> Result<Camera> {
    CameraSettings::new()
        .with_resolution(width, height)
        .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
        .with_lens(90.0, 0.0, 1.0)
        .build()
}
