use nalgebra::{Point3, Vector3};

use crate::ember::error::RenderError;

/// 렌더링 중에는 읽기 전용. 구와 재질을 순서대로 담음.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub spheres: Vec<Sphere>,
    pub materials: Vec<Material>,
}

#[derive(Debug, Clone)]
pub struct Sphere {
    pub position: Point3<f32>,
    pub radius: f32,
    pub material_index: usize,
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            radius: 0.5,
            material_index: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Material {
    pub albedo: Vector3<f32>,
    // 지금은 반사 방향에 쓰이지 않음. metallic만 방향을 결정함
    pub roughness: f32,
    pub metallic: f32,
    pub emission_color: Vector3<f32>,
    pub emission_power: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            albedo: Vector3::new(1.0, 1.0, 1.0),
            roughness: 1.0,
            metallic: 0.0,
            emission_color: Vector3::zeros(),
            emission_power: 0.0,
        }
    }
}

impl Material {
    pub fn emission(&self) -> Vector3<f32> {
        self.emission_color * self.emission_power
    }
}

impl Scene {
    /// 모든 구의 재질 번호가 재질 목록 안에 있는지 확인함.
    pub fn validate(&self) -> Result<(), RenderError> {
        let count = self.materials.len();
        match self
            .spheres
            .iter()
            .enumerate()
            .find(|(_, sphere)| sphere.material_index >= count)
        {
            Some((index, sphere)) => Err(RenderError::InvalidMaterial {
                sphere: index,
                material: sphere.material_index,
                count,
            }),
            None => Ok(()),
        }
    }

    pub fn material_of(&self, sphere: &Sphere) -> &Material {
        &self.materials[sphere.material_index]
    }

    /// 분홍 구 하나, 바닥 역할의 큰 구 하나, 빛을 내는 주황 구 하나
    pub fn demo() -> Self {
        let materials = vec![
            Material {
                albedo: Vector3::new(1.0, 0.0, 1.0),
                roughness: 0.0,
                ..Default::default()
            },
            Material {
                albedo: Vector3::new(0.2, 0.3, 1.0),
                roughness: 0.1,
                ..Default::default()
            },
            Material {
                albedo: Vector3::new(0.8, 0.5, 0.2),
                roughness: 0.1,
                emission_color: Vector3::new(0.8, 0.5, 0.2),
                emission_power: 2.0,
                ..Default::default()
            },
        ];

        let spheres = vec![
            Sphere {
                position: Point3::new(0.0, 0.0, 0.0),
                radius: 1.0,
                material_index: 0,
            },
            Sphere {
                position: Point3::new(2.0, 0.0, 0.0),
                radius: 1.0,
                material_index: 2,
            },
            Sphere {
                position: Point3::new(0.0, -101.0, 0.0),
                radius: 100.0,
                material_index: 1,
            },
        ];

        Self { spheres, materials }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emission_is_color_times_power() {
        let material = Material {
            emission_color: Vector3::new(0.5, 0.25, 1.0),
            emission_power: 4.0,
            ..Default::default()
        };
        assert_eq!(material.emission(), Vector3::new(2.0, 1.0, 4.0));
    }

    #[test]
    fn test_demo_scene_is_valid() {
        assert!(Scene::demo().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_first_bad_reference() {
        let mut scene = Scene::demo();
        scene.spheres[1].material_index = 7;
        scene.spheres[2].material_index = 9;

        match scene.validate() {
            Err(RenderError::InvalidMaterial {
                sphere,
                material,
                count,
            }) => {
                assert_eq!(sphere, 1);
                assert_eq!(material, 7);
                assert_eq!(count, 3);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_empty_scene_is_valid() {
        assert!(Scene::default().validate().is_ok());
    }
}
