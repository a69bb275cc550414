use nalgebra::Vector4;

/// 픽셀마다 지금까지 나온 샘플의 합, 그리고 나눌 프레임 수.
#[derive(Debug, Clone)]
pub struct AccumulationBuffer {
    sums: Vec<Vector4<f32>>,
    frame_index: u32,
}

impl AccumulationBuffer {
    pub fn new(pixel_count: usize) -> Self {
        Self {
            sums: vec![Vector4::zeros(); pixel_count],
            frame_index: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.sums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    // 새로 할당하면 당연히 처음부터 다시 모음
    pub fn reallocate(&mut self, pixel_count: usize) {
        self.sums = vec![Vector4::zeros(); pixel_count];
        self.frame_index = 1;
    }

    pub fn reset(&mut self) {
        self.frame_index = 1;
        self.clear();
    }

    pub fn clear(&mut self) {
        self.sums.fill(Vector4::zeros());
    }

    pub fn accumulate(&mut self, index: usize, sample: &Vector4<f32>) {
        accumulate(&mut self.sums[index], sample);
    }

    pub fn resolve(&self, index: usize) -> Vector4<f32> {
        resolve(&self.sums[index], self.frame_index)
    }

    pub fn sum(&self, index: usize) -> Vector4<f32> {
        self.sums[index]
    }

    pub fn sums(&self) -> &[Vector4<f32>] {
        &self.sums
    }

    pub(crate) fn sums_mut(&mut self) -> &mut [Vector4<f32>] {
        &mut self.sums
    }

    // 누적을 끄면 매 프레임이 첫 프레임인 것처럼 취급함
    pub fn advance(&mut self, accumulate: bool) {
        if accumulate {
            self.frame_index = self.frame_index.saturating_add(1);
        } else {
            self.frame_index = 1;
        }
    }
}

impl Default for AccumulationBuffer {
    fn default() -> Self {
        Self::new(0)
    }
}

pub(crate) fn accumulate(sum: &mut Vector4<f32>, sample: &Vector4<f32>) {
    *sum += sample;
}

pub(crate) fn resolve(sum: &Vector4<f32>, frame_index: u32) -> Vector4<f32> {
    *sum / frame_index as f32
}
