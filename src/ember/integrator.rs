use nalgebra::{Vector3, Vector4};
use rand::Rng;

use crate::ember::ray::Ray;
use crate::ember::scene::Scene;
use crate::ember::shading;
use crate::ember::trace::trace_ray;

pub const MAX_BOUNCES: usize = 5;

// 구 표면 위의 점을 그대로 다음 광선의 시작점으로 쓰면 부동소수점 오차로 자기 자신과 다시 만남
pub const SURFACE_OFFSET: f32 = 0.0001;

pub fn background(ambient: bool) -> Vector3<f32> {
    if ambient {
        Vector3::new(0.6, 0.7, 0.9)
    } else {
        Vector3::zeros()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PathSample {
    pub radiance: Vector3<f32>,
    pub throughput: Vector3<f32>,
    pub bounces: usize,
}

impl PathSample {
    pub fn to_rgba(&self) -> Vector4<f32> {
        Vector4::new(self.radiance.x, self.radiance.y, self.radiance.z, 1.0)
    }
}

/// 픽셀 하나에 대한 광선 하나를 따라가며 빛을 모음. DirectX의 RayGen 쉐이더와 같은 역할.
pub fn trace_path<R: Rng>(
    mut ray: Ray,
    scene: &Scene,
    ambient_background: bool,
    rng: &mut R,
) -> PathSample {
    let mut light = Vector3::zeros();
    let mut throughput = Vector3::repeat(1.0);
    let mut bounces = 0;

    for _ in 0..MAX_BOUNCES {
        let Some(hit) = trace_ray(&ray, &scene.spheres) else {
            light += background(ambient_background).component_mul(&throughput);
            break;
        };
        bounces += 1;

        let material = scene.material_of(&scene.spheres[hit.sphere_index]);
        let bounce = shading::scatter(&ray.direction, &hit.normal, material, rng);

        // 방출광은 이번 albedo를 곱하기 전의 처리량으로 줄어듦
        light += bounce.emission.component_mul(&throughput);

        // 처리량은 줄어들거나 그대로일 뿐 절대 늘어나지 않음. 에너지 보존!
        throughput.component_mul_assign(&bounce.attenuation);

        ray.origin = hit.position + hit.normal.scale(SURFACE_OFFSET);
        ray.direction = bounce.direction;
    }

    PathSample {
        radiance: light.map(|channel| if channel.is_nan() { 0.0 } else { channel }),
        throughput,
        bounces,
    }
}

pub fn per_pixel<R: Rng>(ray: Ray, scene: &Scene, ambient_background: bool, rng: &mut R) -> Vector4<f32> {
    trace_path(ray, scene, ambient_background, rng).to_rgba()
}
