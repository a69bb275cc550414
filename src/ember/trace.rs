use nalgebra::{Point3, Unit, Vector3};

use crate::ember::ray::Ray;
use crate::ember::scene::Sphere;

// 빛의 경로에 대한 정보만 담고, 색상 계산은 나중에 함
#[derive(Debug, Clone, Copy)]
pub struct HitPayload {
    pub distance: f32,
    pub sphere_index: usize,
    pub position: Point3<f32>,
    pub normal: Unit<Vector3<f32>>,
}

/// 광선과 가장 가까이서 만나는 구를 찾음. 만나는게 없으면 None.
pub fn trace_ray(ray: &Ray, spheres: &[Sphere]) -> Option<HitPayload> {
    if ray.is_degenerate() {
        return None;
    }

    let mut closest: Option<(usize, f32)> = None;
    for (index, sphere) in spheres.iter().enumerate() {
        if sphere.radius <= 0.0 {
            continue;
        }

        // o = 빔 시작 (구 중심 기준), d = 빔 방향, r = 구 반지름
        // (d.d) t^2 + 2 (o.d) t + (o.o - r^2) = 0
        let origin = ray.origin - sphere.position;

        let first = ray.direction.magnitude_squared();
        let second = 2.0 * origin.dot(&ray.direction);
        let third = origin.magnitude_squared() - sphere.radius.powi(2);

        // 판별식
        let discriminant = second.powi(2) - 4.0 * first * third;
        if discriminant < 0.0 {
            continue;
        }

        // first > 0 이므로 작은 근이 언제나 더 가까운 교점
        let distance = (-second - discriminant.sqrt()) / (2.0 * first);
        if distance.is_nan() || distance <= 0.0 {
            continue;
        }

        match closest {
            Some((_, previous)) if previous <= distance => {}
            _ => closest = Some((index, distance)),
        }
    }

    closest.map(|(index, distance)| closest_hit(ray, distance, index, &spheres[index]))
}

pub fn closest_hit(ray: &Ray, distance: f32, sphere_index: usize, sphere: &Sphere) -> HitPayload {
    let local_origin = ray.origin - sphere.position;
    let local_position = local_origin + ray.direction * distance;

    HitPayload {
        distance,
        sphere_index,
        position: sphere.position + local_position,
        normal: Unit::new_normalize(local_position),
    }
}
