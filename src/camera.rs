use nalgebra::{Isometry3, Perspective3, Point3, Unit, UnitQuaternion, Vector3};
use rayon::prelude::*;

/// 렌더러가 카메라에게서 필요로 하는 것: 눈의 위치와 픽셀마다의 광선 방향.
/// 방향 표는 행 우선(row * width + column)으로 이미지 크기와 같아야 함.
pub trait Camera {
    fn position(&self) -> Point3<f32>;
    fn ray_directions(&self) -> &[Vector3<f32>];
}

pub struct PerspectiveCamera {
    projection: Perspective3<f32>,
    view: Isometry3<f32>,

    vertical_fov: f32,
    near: f32,
    far: f32,

    position: Point3<f32>,
    forward: Unit<Vector3<f32>>,

    rays: Vec<Vector3<f32>>,
    viewport_size: (u32, u32),
}

impl PerspectiveCamera {
    pub fn new(vertical_fov: f32, near: f32, far: f32, width: u32, height: u32) -> Self {
        let position = Point3::new(0.0, 0.0, 6.0);
        let forward = Unit::new_unchecked(Vector3::new(0.0, 0.0, -1.0));

        let mut to_return = Self {
            projection: Perspective3::new(1.0, vertical_fov, near, far),
            view: Isometry3::look_at_rh(&position, &(position + forward.into_inner()), &Vector3::y_axis()),
            vertical_fov,
            near,
            far,
            position,
            forward,
            rays: vec![],
            viewport_size: (width, height),
        };

        to_return.reevaluate_projection();
        to_return.reevaluate_rays();

        to_return
    }

    pub fn forward(&self) -> Unit<Vector3<f32>> {
        self.forward
    }

    pub fn viewport_size(&self) -> (u32, u32) {
        self.viewport_size
    }

    pub fn rotation_speed(&self) -> f32 {
        0.7
    }

    pub fn movement_speed(&self) -> f32 {
        5.0
    }

    // 크기가 같으면 아무것도 안 함
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if self.viewport_size == (width, height) {
            return false;
        }
        self.viewport_size = (width, height);

        self.reevaluate_projection();
        self.reevaluate_rays();
        true
    }

    pub fn set_position(&mut self, position: Point3<f32>) -> bool {
        if self.position == position {
            return false;
        }
        self.position = position;

        self.reevaluate_view();
        true
    }

    pub fn set_forward(&mut self, forward: Vector3<f32>) -> bool {
        let Some(forward) = Unit::try_new(forward, f32::EPSILON) else {
            return false;
        };
        if forward == self.forward {
            return false;
        }
        self.forward = forward;

        self.reevaluate_view();
        self.reevaluate_rays();
        true
    }

    /// 시선 기준 (오른쪽, 위, 앞) 으로 움직임. 움직였으면 true, 누적을 초기화하는 건 호출하는 쪽의 몫.
    pub fn translate(&mut self, local_delta: Vector3<f32>, time_step: f32) -> bool {
        if local_delta == Vector3::zeros() {
            return false;
        }

        let up: Unit<Vector3<f32>> = Vector3::y_axis();
        let right = self.forward.cross(&up.into_inner());

        let step = self.movement_speed() * time_step;
        let delta = right * local_delta.x + up.into_inner() * local_delta.y + self.forward.into_inner() * local_delta.z;
        self.set_position(self.position + delta * step)
    }

    // 마우스 이동량 기준. 아래로 움직이면 pitch가 양수
    pub fn rotate(&mut self, pitch_delta: f32, yaw_delta: f32) -> bool {
        if pitch_delta == 0.0 && yaw_delta == 0.0 {
            return false;
        }

        let up: Unit<Vector3<f32>> = Vector3::y_axis();
        let Some(right) = Unit::try_new(self.forward.cross(&up.into_inner()), f32::EPSILON) else {
            return false;
        };

        let pitch = pitch_delta * self.rotation_speed();
        let yaw = yaw_delta * self.rotation_speed();

        let q = UnitQuaternion::from_axis_angle(&right, -pitch) * UnitQuaternion::from_axis_angle(&up, -yaw);

        let mut forward = q * self.forward;
        forward.renormalize_fast();
        self.set_forward(forward.into_inner())
    }

    fn reevaluate_projection(&mut self) {
        let (width, height) = self.viewport_size;
        if width == 0 || height == 0 {
            return;
        }

        let aspect = width as f32 / height as f32;
        self.projection = Perspective3::new(aspect, self.vertical_fov, self.near, self.far);
    }

    fn reevaluate_view(&mut self) {
        let target = self.position + self.forward.into_inner();
        self.view = Isometry3::look_at_rh(&self.position, &target, &Vector3::y_axis());
    }

    fn reevaluate_rays(&mut self) {
        let (width, height) = self.viewport_size;
        let projection = &self.projection;
        let view = &self.view;

        // 0번 줄이 이미지의 맨 위. 픽셀 중심을 지나도록 0.5를 더함
        self.rays = (0..width as usize * height as usize)
            .into_par_iter()
            .map(|index| {
                let x = (index % width as usize) as f32;
                let y = (index / width as usize) as f32;

                let ndc_x = (x + 0.5) / width as f32 * 2.0 - 1.0;
                let ndc_y = 1.0 - (y + 0.5) / height as f32 * 2.0;

                let target = projection.unproject_point(&Point3::new(ndc_x, ndc_y, 1.0));
                view.inverse_transform_vector(&target.coords.normalize())
            })
            .collect();
    }
}

impl Camera for PerspectiveCamera {
    fn position(&self) -> Point3<f32> {
        self.position
    }

    fn ray_directions(&self) -> &[Vector3<f32>] {
        &self.rays
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(width: u32, height: u32) -> PerspectiveCamera {
        PerspectiveCamera::new(45.0f32.to_radians(), 0.1, 100.0, width, height)
    }

    #[test]
    fn test_one_direction_per_pixel() {
        let camera = camera(8, 4);
        assert_eq!(camera.ray_directions().len(), 32);
        for direction in camera.ray_directions() {
            assert!((direction.norm() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_center_pixel_looks_forward() {
        let camera = camera(9, 9);
        let center = camera.ray_directions()[4 * 9 + 4];
        assert!((center - camera.forward().into_inner()).norm() < 1e-4);
    }

    #[test]
    fn test_top_row_looks_up_and_left_column_looks_left() {
        let camera = camera(9, 9);
        let top_left = camera.ray_directions()[0];
        let bottom_right = camera.ray_directions()[80];

        assert!(top_left.y > 0.0 && top_left.x < 0.0);
        assert!(bottom_right.y < 0.0 && bottom_right.x > 0.0);
    }

    #[test]
    fn test_resize_recomputes_rays() {
        let mut camera = camera(4, 4);
        assert!(!camera.resize(4, 4));
        assert!(camera.resize(6, 2));
        assert_eq!(camera.ray_directions().len(), 12);

        assert!(camera.resize(0, 0));
        assert!(camera.ray_directions().is_empty());
    }

    #[test]
    fn test_translate_moves_along_forward() {
        let mut camera = camera(2, 2);
        let start = camera.position();

        assert!(!camera.translate(Vector3::zeros(), 1.0));
        assert!(camera.translate(Vector3::new(0.0, 0.0, 1.0), 0.1));

        let moved = camera.position() - start;
        assert!((moved - camera.forward().into_inner() * 0.5).norm() < 1e-5);
    }

    #[test]
    fn test_rotate_turns_forward() {
        let mut camera = camera(3, 3);
        let before = camera.forward();
        let rays_before = camera.ray_directions().to_vec();

        assert!(camera.rotate(0.0, 0.5));
        assert!((camera.forward().into_inner() - before.into_inner()).norm() > 1e-3);
        assert!((camera.forward().norm() - 1.0).abs() < 1e-4);
        assert_ne!(camera.ray_directions(), rays_before.as_slice());
    }
}
