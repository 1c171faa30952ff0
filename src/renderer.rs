//! Per-pixel ray casting into a [`Frame`].
//!
//! One primary ray per pixel, no bounces. The synchronous [`Renderer::render`]
//! walks the pixel grid column by column; [`Renderer::render_parallel`]
//! spreads the same work over the rayon pool and can be cancelled.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use image::Rgba;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rayon::prelude::*;
use serde::Deserialize;

use crate::camera::{Camera, SamplingPlane};
use crate::error::{RaycastError, Result};
use crate::frame::Frame;
use crate::hittable::{Color, SceneQuery};
use crate::interval::Interval;
use crate::light::Light;
use crate::shading::ShadingModel;

/// How shaded colors are stored in the frame.
///
/// The lighting sum can exceed 1 (ambient + diffuse + a white highlight).
/// Background colors are always stored exactly as configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorPolicy {
    /// Clamp every channel to [0, 1] before storage.
    #[default]
    Clamp,
    /// Store the raw sum; meaningful for HDR output such as EXR.
    Hdr,
}

impl ColorPolicy {
    /// Apply the policy to a shaded color.
    pub fn apply(&self, color: Color) -> Color {
        match self {
            ColorPolicy::Clamp => color.clamp(
                Color::splat(Interval::UNIT.min),
                Color::splat(Interval::UNIT.max),
            ),
            ColorPolicy::Hdr => color,
        }
    }
}

/// Shared flag that stops a parallel render early.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A fresh, not-yet-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Remaining pixels are abandoned.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Settings for a render pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Renderer {
    /// Lighting model applied to hits
    pub shading: ShadingModel,
    /// Storage policy for shaded colors
    pub color_policy: ColorPolicy,
    /// Draw a terminal progress bar while rendering
    pub show_progress: bool,
}

impl Renderer {
    /// Blinn-Phong, clamped colors, no progress bar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the scene on the calling thread.
    ///
    /// Every pixel of the returned frame is written exactly once.
    pub fn render<S>(
        &self,
        camera: &Camera,
        light: &Light,
        scene: &S,
        width: u32,
        height: u32,
    ) -> Result<Frame>
    where
        S: SceneQuery + ?Sized,
    {
        let plane = self.prepare(camera, light, width, height)?;
        let mut frame = Frame::new(width, height)?;

        info!("Rendering {}x{} image on the calling thread...", width, height);
        let start = Instant::now();
        let pb = self.progress_bar(frame.len());

        for x in 0..width {
            for y in 0..height {
                let color = self.pixel_color(&plane, x, y, camera, light, scene);
                frame.set(x, y, color);
                pb.inc(1);
            }
        }

        pb.finish();
        info!("Image rendered in {:.2?}", start.elapsed());
        Ok(frame)
    }

    /// Renders the scene using the rayon thread pool.
    ///
    /// Each pixel is computed and written by exactly one worker. If `cancel`
    /// fires before every pixel is written, the partial frame is dropped and
    /// `Cancelled` is returned.
    pub fn render_parallel<S>(
        &self,
        camera: &Camera,
        light: &Light,
        scene: &S,
        width: u32,
        height: u32,
        cancel: Option<&CancelToken>,
    ) -> Result<Frame>
    where
        S: SceneQuery + ?Sized,
    {
        let plane = self.prepare(camera, light, width, height)?;
        let mut frame = Frame::new(width, height)?;
        let total = frame.len();

        info!(
            "Rendering {}x{} image using {} CPU cores...",
            width,
            height,
            rayon::current_num_threads()
        );
        let start = Instant::now();
        let pb = self.progress_bar(total);
        let written = AtomicUsize::new(0);

        frame.pixels_mut().par_bridge().for_each(|(x, y, pixel)| {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                return;
            }
            let color = self.pixel_color(&plane, x, y, camera, light, scene);
            *pixel = Rgba(color.to_array());
            written.fetch_add(1, Ordering::Relaxed);
            pb.inc(1);
        });

        let written = written.into_inner();
        if written < total {
            pb.abandon();
            info!("Render cancelled after {}/{} pixels", written, total);
            return Err(RaycastError::Cancelled);
        }

        pb.finish();
        info!("Image rendered in {:.2?}", start.elapsed());
        Ok(frame)
    }

    /// Validate inputs and build the pixel-to-ray mapping.
    fn prepare(
        &self,
        camera: &Camera,
        light: &Light,
        width: u32,
        height: u32,
    ) -> Result<SamplingPlane> {
        let plane = camera.sampling_plane(width, height)?;
        light.validate()?;
        debug!(
            "Shading {:?} with {:?} colors, ambient {}, specular exponent {}",
            self.shading, self.color_policy, light.ambient, light.specular_exponent
        );
        Ok(plane)
    }

    /// Cast the ray for pixel `(x, y)` and color it.
    fn pixel_color<S>(
        &self,
        plane: &SamplingPlane,
        x: u32,
        y: u32,
        camera: &Camera,
        light: &Light,
        scene: &S,
    ) -> Color
    where
        S: SceneQuery + ?Sized,
    {
        let ray = plane.ray(x, y);
        match scene.intersect(&ray) {
            Some(hit) => self.color_policy.apply(self.shading.shade(&hit, camera, light)),
            None => camera.background,
        }
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len as u64);
        let style = ProgressStyle::default_bar()
            .template("{bar:40} {pos}/{len} ETA: {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb
    }
}

/// Render with the default [`Renderer`]: Blinn-Phong, clamped, synchronous.
pub fn render<S>(
    camera: &Camera,
    light: &Light,
    scene: &S,
    width: u32,
    height: u32,
) -> Result<Frame>
where
    S: SceneQuery + ?Sized,
{
    Renderer::new().render(camera, light, scene, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3A, Vec4};

    use crate::hittable::{HitRecord, HittableList};
    use crate::ray::Ray;

    /// Reports a fixed hit for rays left of x = 0 and counts queries.
    struct HalfScene {
        queries: AtomicUsize,
    }

    impl SceneQuery for HalfScene {
        fn intersect(&self, ray: &Ray) -> Option<HitRecord> {
            self.queries.fetch_add(1, Ordering::Relaxed);
            (ray.origin.x < 0.0).then(|| HitRecord {
                point: ray.origin + ray.direction,
                normal: -ray.direction,
                t: 1.0,
                color: Vec4::new(0.0, 1.0, 0.0, 1.0),
            })
        }
    }

    #[test]
    fn test_color_policy() {
        let c = Vec4::new(2.1, -0.5, 0.5, 1.2);
        assert_eq!(ColorPolicy::Clamp.apply(c), Vec4::new(1.0, 0.0, 0.5, 1.0));
        assert_eq!(ColorPolicy::Hdr.apply(c), c);
    }

    #[test]
    fn test_every_pixel_queried_once() {
        let scene = HalfScene {
            queries: AtomicUsize::new(0),
        };
        let frame = render(&Camera::new(), &Light::default(), &scene, 7, 3).unwrap();
        assert_eq!((frame.width(), frame.height()), (7, 3));
        assert_eq!(scene.queries.load(Ordering::Relaxed), 21);
    }

    #[test]
    fn test_every_pixel_queried_once_in_parallel() {
        let scene = HalfScene {
            queries: AtomicUsize::new(0),
        };
        let frame = Renderer::new()
            .render_parallel(&Camera::new(), &Light::default(), &scene, 7, 3, None)
            .unwrap();
        assert_eq!((frame.width(), frame.height()), (7, 3));
        assert_eq!(scene.queries.load(Ordering::Relaxed), 21);
    }

    #[test]
    fn test_miss_is_background_exactly() {
        let mut camera = Camera::new();
        camera.background = Vec4::new(0.2, 0.3, 0.4, 0.5);
        let frame = render(&camera, &Light::default(), &HittableList::new(), 4, 4).unwrap();
        for (_, _, c) in frame.pixels() {
            assert_eq!(c, camera.background);
        }
    }

    #[test]
    fn test_left_half_hit_right_half_background() {
        let scene = HalfScene {
            queries: AtomicUsize::new(0),
        };
        let camera = Camera::new();
        let frame = render(&camera, &Light::default(), &scene, 4, 2).unwrap();
        // px for x = 0, 1 is negative; x = 2 maps to 0.0 exactly
        assert_ne!(frame.pixel(0, 0), camera.background);
        assert_ne!(frame.pixel(1, 1), camera.background);
        assert_eq!(frame.pixel(2, 0), camera.background);
        assert_eq!(frame.pixel(3, 1), camera.background);
    }

    #[test]
    fn test_zero_width_fails_before_querying() {
        let scene = HalfScene {
            queries: AtomicUsize::new(0),
        };
        let result = render(&Camera::new(), &Light::default(), &scene, 0, 5);
        assert!(matches!(result, Err(RaycastError::InvalidDimensions { width: 0, height: 5 })));
        assert_eq!(scene.queries.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_zero_height_fails_before_querying() {
        let scene = HalfScene {
            queries: AtomicUsize::new(0),
        };
        let result = render(&Camera::new(), &Light::default(), &scene, 5, 0);
        assert!(matches!(result, Err(RaycastError::InvalidDimensions { width: 5, height: 0 })));

        let result =
            Renderer::new().render_parallel(&Camera::new(), &Light::default(), &scene, 5, 0, None);
        assert!(matches!(result, Err(RaycastError::InvalidDimensions { width: 5, height: 0 })));
        assert_eq!(scene.queries.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_invalid_light_rejected() {
        let light = Light {
            position: Vec3A::ZERO,
            ambient: 2.0,
            specular_exponent: 10.0,
        };
        let result = render(&Camera::new(), &light, &HittableList::new(), 2, 2);
        assert!(matches!(result, Err(RaycastError::InvalidLight(_))));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let scene = HalfScene {
            queries: AtomicUsize::new(0),
        };
        let renderer = Renderer::new();
        let camera = Camera::new();
        let light = Light::default();
        let a = renderer.render(&camera, &light, &scene, 9, 5).unwrap();
        let b = renderer.render_parallel(&camera, &light, &scene, 9, 5, None).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_cancelled_render_returns_no_frame() {
        let token = CancelToken::new();
        token.cancel();
        let result = Renderer::new().render_parallel(
            &Camera::new(),
            &Light::default(),
            &HittableList::new(),
            8,
            8,
            Some(&token),
        );
        assert!(matches!(result, Err(RaycastError::Cancelled)));
    }
}
