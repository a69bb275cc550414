use nalgebra::{Point3, Vector3};

// 방향은 정규화되어 있지 않아도 됨. 교차 계산에서 a = |d|^2 로 처리함
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self { origin, direction }
    }

    // 길이가 0이거나 NaN/무한대가 섞인 방향은 어떤 물체와도 만나지 않는 것으로 침
    pub fn is_degenerate(&self) -> bool {
        let length = self.direction.magnitude_squared();
        !length.is_finite() || length <= f32::MIN_POSITIVE
    }
}
