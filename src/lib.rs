use std::env;
use std::path::PathBuf;

use log::{info, warn};
use nalgebra::{Point3, Vector4};

pub mod camera;
pub mod ember;
pub mod util;

pub use crate::camera::{Camera, PerspectiveCamera};
pub use crate::ember::error::RenderError;
pub use crate::ember::output::OutputImage;
pub use crate::ember::scene::{Material, Scene, Sphere};
pub use crate::ember::{Ember, Settings};

/// [0, 1] 범위의 RGBA를 (A << 24) | (B << 16) | (G << 8) | R 로 묶음. 메모리상 순서는 R, G, B, A.
pub fn vec4_to_rgba(color: &Vector4<f32>) -> u32 {
    let r = (color.x * 255.0) as u8;
    let g = (color.y * 255.0) as u8;
    let b = (color.z * 255.0) as u8;
    let a = (color.w * 255.0) as u8;

    u32::from_le_bytes([r, g, b, a])
}

pub fn unpack_rgba(pixel: u32) -> [u8; 4] {
    pixel.to_le_bytes()
}

// NaN은 0으로, 나머지는 [0, 1]로 자름. 무한대도 여기서 1이 됨
pub fn clamp_color(color: &Vector4<f32>) -> Vector4<f32> {
    color.map(|channel| if channel.is_nan() { 0.0 } else { channel.clamp(0.0, 1.0) })
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub width: u32,
    pub height: u32,
    pub frames: u32,
    pub seed: Option<u64>,
    pub output: PathBuf,
    pub settings: Settings,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 360,
            frames: 64,
            seed: None,
            output: PathBuf::from("ember.png"),
            settings: Settings::default(),
        }
    }
}

impl RunConfig {
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Self {
        let mut config = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--width" => parse_into(&mut config.width, &arg, args.next()),
                "--height" => parse_into(&mut config.height, &arg, args.next()),
                "--frames" => parse_into(&mut config.frames, &arg, args.next()),
                "--seed" => {
                    let mut seed = 0;
                    parse_into(&mut seed, &arg, args.next());
                    config.seed = Some(seed);
                }
                "--output" | "-o" => match args.next() {
                    Some(path) => config.output = PathBuf::from(path),
                    None => warn!("{} needs a value", arg),
                },
                "--sequential" => config.settings.parallel = false,
                "--no-accumulate" => config.settings.accumulate = false,
                "--no-sky" => config.settings.ambient_background = false,
                _ => warn!("ignoring unknown argument {}", arg),
            }
        }

        config
    }
}

fn parse_into<T: std::str::FromStr>(target: &mut T, flag: &str, value: Option<String>) {
    match value.as_deref().map(str::parse::<T>) {
        Some(Ok(parsed)) => *target = parsed,
        _ => warn!("{} needs a valid value, keeping the default", flag),
    }
}

/// 창 없이 데모 장면을 여러 프레임 누적해서 그린 뒤 결과를 돌려줌.
pub fn render_headless(config: &RunConfig) -> Result<OutputImage, RenderError> {
    let scene = Scene::demo();
    let mut camera = PerspectiveCamera::new(45.0f32.to_radians(), 0.1, 100.0, config.width, config.height);
    camera.set_position(Point3::new(1.0, 0.3, 6.0));

    let mut ember = match config.seed {
        Some(seed) => Ember::with_seed(seed),
        None => Ember::new(),
    };
    ember.settings = config.settings;
    ember.resize(config.width, config.height);

    for frame in 0..config.frames {
        ember.render(&scene, &camera)?;
        if (frame + 1) % 16 == 0 {
            info!(
                "frame {}/{} took {:.2}ms",
                frame + 1,
                config.frames,
                ember.last_render_time().as_secs_f64() * 1000.0
            );
        }
    }

    Ok(ember.final_image().clone())
}

pub fn run() -> Result<(), RenderError> {
    // 이미 로거가 있으면 그대로 씀
    let _ = env_logger::try_init();

    let config = RunConfig::from_args(env::args().skip(1));
    info!(
        "rendering {}x{} for {} frames into {}",
        config.width,
        config.height,
        config.frames,
        config.output.display()
    );

    let image = render_headless(&config)?;
    image.save_png(&config.output)?;

    info!("saved {}", config.output.display());
    Ok(())
}
