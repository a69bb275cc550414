use nalgebra::{Unit, Vector3};
use rand::Rng;

use crate::ember::scene::Material;
use crate::util::random_in_unit_sphere;

/// 한 번 튕길 때의 재질 반응
#[derive(Debug, Clone, Copy)]
pub struct Bounce {
    pub direction: Vector3<f32>,
    pub attenuation: Vector3<f32>,
    pub emission: Vector3<f32>,
}

pub fn scatter<R: Rng>(
    incoming: &Vector3<f32>,
    normal: &Unit<Vector3<f32>>,
    material: &Material,
    rng: &mut R,
) -> Bounce {
    Bounce {
        direction: reflect_ray(incoming, normal, material, rng),
        // albedo가 [0, 1]을 벗어나도 처리량이 1을 넘지 않도록 함
        attenuation: material.albedo.map(|channel| channel.clamp(0.0, 1.0)),
        emission: material.emission(),
    }
}

// 입사각 = 반사각. 완전히 평평한 표면을 가정함
pub fn reflect(incoming: &Vector3<f32>, normal: &Unit<Vector3<f32>>) -> Vector3<f32> {
    incoming - normal.scale(2.0 * incoming.dot(&normal.into_inner()))
}

// 람베르트 반사. |p| < 1 이므로 normal + p 는 0이 될 수 없음
pub fn diffuse_direction<R: Rng>(normal: &Unit<Vector3<f32>>, rng: &mut R) -> Vector3<f32> {
    (normal.into_inner() + random_in_unit_sphere(rng)).normalize()
}

/// metallic 값으로 난반사 방향과 거울 반사 방향을 선형 보간함. (0 = 난반사, 1 = 거울)
pub fn reflect_ray<R: Rng>(
    incoming: &Vector3<f32>,
    normal: &Unit<Vector3<f32>>,
    material: &Material,
    rng: &mut R,
) -> Vector3<f32> {
    let mirror = reflect(incoming, normal);
    let diffuse = diffuse_direction(normal, rng);

    diffuse.lerp(&mirror, material.metallic)
}
