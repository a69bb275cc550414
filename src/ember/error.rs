use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("sphere {sphere} references material {material}, but the scene only has {count} materials")]
    InvalidMaterial {
        sphere: usize,
        material: usize,
        count: usize,
    },

    #[error("camera provides {actual} ray directions, expected {expected} for a {width}x{height} image")]
    CameraMismatch {
        expected: usize,
        actual: usize,
        width: u32,
        height: u32,
    },

    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}
