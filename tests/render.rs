use glam::{Vec3A, Vec4};
use orthocast::{
    render, save, Camera, CancelToken, ColorPolicy, HitRecord, HittableList, Light, Plane,
    RaycastError, Ray, Renderer, SceneQuery,
};

const RED: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);

fn close(a: Vec4, b: Vec4, eps: f32) -> bool {
    (a - b).abs().max_element() < eps
}

/// Red plane far in front of a default camera.
fn far_red_plane() -> HittableList {
    let mut world = HittableList::new();
    world.add(Box::new(Plane::new(Vec3A::new(0.0, 0.0, 1000.0), Vec3A::NEG_Z, RED)));
    world
}

/// Hits only rays starting below the camera's horizontal center line.
struct LowerHalf;

impl SceneQuery for LowerHalf {
    fn intersect(&self, ray: &Ray) -> Option<HitRecord> {
        (ray.origin.y < 0.0).then(|| HitRecord {
            point: ray.at(1.0),
            normal: -ray.direction,
            t: 1.0,
            color: RED,
        })
    }
}

#[test]
fn test_flat_plane_light_at_camera_unclamped() {
    let camera = Camera::new();
    let light = Light::new(camera.position, 0.1, 10.0).unwrap();
    let renderer = Renderer {
        color_policy: ColorPolicy::Hdr,
        ..Renderer::new()
    };

    let frame = renderer.render(&camera, &light, &far_red_plane(), 2, 2).unwrap();

    assert_eq!((frame.width(), frame.height()), (2, 2));
    for (x, y, c) in frame.pixels() {
        // ambient 0.1 + diffuse 1 + white specular 1^10
        assert!(close(c, Vec4::new(2.1, 1.0, 1.0, 2.1), 1e-4), "pixel ({x}, {y}) = {c:?}");
    }
}

#[test]
fn test_flat_plane_light_at_camera_clamped() {
    let camera = Camera::new();
    let light = Light::new(camera.position, 0.1, 10.0).unwrap();

    let frame = render(&camera, &light, &far_red_plane(), 2, 2).unwrap();

    for (_, _, c) in frame.pixels() {
        assert!(close(c, Vec4::ONE, 1e-6), "{c:?}");
    }
}

#[test]
fn test_light_behind_surface_leaves_ambient() {
    // Camera and light both behind the plane: the half vector faces away
    // from the camera-facing normal.
    let mut world = HittableList::new();
    world.add(Box::new(Plane::new(Vec3A::new(0.0, 0.0, 5.0), Vec3A::NEG_Z, RED)));
    let camera = Camera::new();
    let light = Light::new(Vec3A::new(0.0, 0.0, 100.0), 0.3, 10.0).unwrap();

    let frame = Renderer::new().render(&camera, &light, &world, 3, 3).unwrap();
    for (x, y, c) in frame.pixels() {
        assert!(close(c, RED * 0.3, 1e-5), "pixel ({x}, {y}) = {c:?}");
    }
}

#[test]
fn test_zero_width_is_invalid_dimensions() {
    let result = render(&Camera::new(), &Light::default(), &far_red_plane(), 0, 2);
    assert!(matches!(result, Err(RaycastError::InvalidDimensions { width: 0, height: 2 })));
}

#[test]
fn test_parallel_render_matches_sequential() {
    let camera = Camera::new();
    let light = Light::default();
    let world = far_red_plane();
    let renderer = Renderer::new();

    let sequential = renderer.render(&camera, &light, &world, 16, 9).unwrap();
    let parallel = renderer
        .render_parallel(&camera, &light, &world, 16, 9, Some(&CancelToken::new()))
        .unwrap();
    assert_eq!(sequential, parallel);
}

#[test]
fn test_png_written_upright_with_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Textures").join("nested").join("Texture_4x4.png");

    let camera = Camera::new();
    let frame = render(&camera, &Light::default(), &LowerHalf, 4, 4).unwrap();
    save(&frame, &path).unwrap();

    let png = image::open(&path).unwrap().to_rgba8();
    assert_eq!(png.dimensions(), (4, 4));
    // Top row of the file is the top of the sampling plane: background
    assert_eq!(png.get_pixel(0, 0).0, [0, 0, 0, 255]);
    // Bottom row was hit and shaded red
    let bottom = png.get_pixel(0, 3).0;
    assert!(bottom[0] > 0);
}

#[test]
fn test_exr_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hdr").join("render.exr");

    let frame = render(&Camera::new(), &Light::default(), &far_red_plane(), 3, 2).unwrap();
    save(&frame, &path).unwrap();

    let meta = std::fs::metadata(&path).unwrap();
    assert!(meta.len() > 0);
}

#[test]
fn test_unwritable_destination_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let frame = render(&Camera::new(), &Light::default(), &far_red_plane(), 2, 2).unwrap();
    let result = save(&frame, blocker.join("out.png"));
    assert!(matches!(result, Err(RaycastError::Io(_))), "{result:?}");
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let frame = render(&Camera::new(), &Light::default(), &far_red_plane(), 2, 2).unwrap();
    let result = save(&frame, dir.path().join("out.bmp"));
    assert!(matches!(result, Err(RaycastError::UnsupportedFormat(_))));
}
