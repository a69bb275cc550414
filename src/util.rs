use nalgebra::Vector3;
use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeBounds;

pub fn random_vec<T, R, G>(rng: &mut G, range: R) -> Vector3<T>
where
    T: SampleUniform,
    R: RangeBounds<T> + SampleRange<T> + Clone,
    G: Rng,
{
    Vector3::new(
        rng.gen_range(range.clone()),
        rng.gen_range(range.clone()),
        rng.gen_range(range),
    )
}

// 기각 샘플링. 정육면체에서 뽑다가 구 안에 들어오면 채택
pub fn random_in_unit_sphere<G: Rng>(rng: &mut G) -> Vector3<f32> {
    loop {
        let candidate = random_vec(rng, -1.0f32..1.0);
        if candidate.magnitude_squared() < 1.0 {
            return candidate;
        }
    }
}

/// (시드, 프레임, 줄) 마다 독립적인 난수 생성기. 줄 단위 작업끼리 상태를 공유하지 않음.
pub fn row_rng(seed: u64, frame: u64, row: u64) -> SmallRng {
    SmallRng::seed_from_u64(splitmix64(splitmix64(seed ^ frame).wrapping_add(row)))
}

fn splitmix64(value: u64) -> u64 {
    let mut z = value.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
