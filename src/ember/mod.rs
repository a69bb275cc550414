use std::time::{Duration, Instant};

use log::{debug, trace, warn};
use nalgebra::{Point3, Vector3, Vector4};
use rayon::prelude::*;

use crate::camera::Camera;
use crate::ember::accumulation::AccumulationBuffer;
use crate::ember::error::RenderError;
use crate::ember::integrator::per_pixel;
use crate::ember::output::OutputImage;
use crate::ember::ray::Ray;
use crate::ember::scene::Scene;
use crate::util::row_rng;
use crate::{clamp_color, vec4_to_rgba};

pub mod accumulation;
pub mod error;
pub mod integrator;
pub mod output;
pub mod ray;
pub mod scene;
pub mod shading;
pub mod trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub accumulate: bool,
    pub parallel: bool,
    pub ambient_background: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            accumulate: true,
            parallel: true,
            ambient_background: true,
        }
    }
}

pub struct Ember {
    final_image: OutputImage,
    accumulation: AccumulationBuffer,
    pub settings: Settings,
    seed: u64,
    // 지금까지 렌더링한 프레임 수. 누적을 꺼도 계속 올라가서 매 프레임 다른 난수를 씀
    frame_serial: u64,
    last_render_time: Duration,
}

impl Default for Ember {
    fn default() -> Self {
        Self::new()
    }
}

impl Ember {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            final_image: OutputImage::default(),
            accumulation: AccumulationBuffer::default(),
            settings: Default::default(),
            seed,
            frame_serial: 0,
            last_render_time: Duration::ZERO,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if self.final_image.size() == (width, height) {
            return;
        }

        self.final_image = OutputImage::new(width, height);
        self.accumulation.reallocate(self.final_image.pixel_count());
        debug!("resized output to {}x{}", width, height);
    }

    pub fn reset_accumulation(&mut self) {
        self.accumulation.reset();
        debug!("accumulation reset");
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn final_image(&self) -> &OutputImage {
        &self.final_image
    }

    pub fn accumulation(&self) -> &AccumulationBuffer {
        &self.accumulation
    }

    pub fn frame_index(&self) -> u32 {
        self.accumulation.frame_index()
    }

    pub fn last_render_time(&self) -> Duration {
        self.last_render_time
    }

    /// 이미지 전체를 한 번 그림. 모든 줄이 끝나야 돌아옴.
    pub fn render<C: Camera + ?Sized>(&mut self, scene: &Scene, camera: &C) -> Result<(), RenderError> {
        let start = Instant::now();
        let settings = self.settings;

        if let Err(error) = scene.validate() {
            warn!("refusing to render: {}", error);
            return Err(error);
        }

        let (width, height) = self.final_image.size();
        let directions = camera.ray_directions();
        if directions.len() != self.final_image.pixel_count() {
            let error = RenderError::CameraMismatch {
                expected: self.final_image.pixel_count(),
                actual: directions.len(),
                width,
                height,
            };
            warn!("refusing to render: {}", error);
            return Err(error);
        }

        if self.final_image.pixel_count() == 0 {
            return Ok(());
        }

        if self.accumulation.frame_index() == 1 {
            self.accumulation.clear();
        }

        let frame = Frame {
            scene,
            origin: camera.position(),
            directions,
            width: width as usize,
            frame_index: self.accumulation.frame_index(),
            ambient_background: settings.ambient_background,
            seed: self.seed,
            frame_serial: self.frame_serial,
        };

        // 줄마다 서로 겹치지 않는 메모리에만 씀. 잠금 필요 없음
        let pixels = self.final_image.pixels_mut();
        let sums = self.accumulation.sums_mut();
        if settings.parallel {
            pixels
                .par_chunks_mut(frame.width)
                .zip(sums.par_chunks_mut(frame.width))
                .enumerate()
                .for_each(|(y, (pixels, sums))| frame.render_row(y, pixels, sums));
        } else {
            pixels
                .chunks_mut(frame.width)
                .zip(sums.chunks_mut(frame.width))
                .enumerate()
                .for_each(|(y, (pixels, sums))| frame.render_row(y, pixels, sums));
        }

        self.accumulation.advance(settings.accumulate);
        self.frame_serial = self.frame_serial.wrapping_add(1);
        self.last_render_time = start.elapsed();

        trace!(
            "frame {} (accumulation index {}) rendered in {:?}",
            self.frame_serial,
            frame.frame_index,
            self.last_render_time
        );
        Ok(())
    }
}

// 한 프레임 동안 모든 줄이 함께 읽는 값들
struct Frame<'a> {
    scene: &'a Scene,
    origin: Point3<f32>,
    directions: &'a [Vector3<f32>],
    width: usize,
    frame_index: u32,
    ambient_background: bool,
    seed: u64,
    frame_serial: u64,
}

impl Frame<'_> {
    fn render_row(&self, y: usize, pixels: &mut [u32], sums: &mut [Vector4<f32>]) {
        let mut rng = row_rng(self.seed, self.frame_serial, y as u64);

        for (x, (pixel, sum)) in pixels.iter_mut().zip(sums.iter_mut()).enumerate() {
            let ray = Ray::new(self.origin, self.directions[y * self.width + x]);
            let color = per_pixel(ray, self.scene, self.ambient_background, &mut rng);

            accumulation::accumulate(sum, &color);
            let averaged = accumulation::resolve(sum, self.frame_index);

            *pixel = vec4_to_rgba(&clamp_color(&averaged));
        }
    }
}
