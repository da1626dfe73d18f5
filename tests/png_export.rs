use egui::{Pos2, Rect, Vec2};
use futures::executor::block_on;
use splash::{CanvasSurface, DisplayMode, ExportError, ExportTarget};

fn sized_surface(mode: DisplayMode, target: ExportTarget, width: f32, height: f32) -> CanvasSurface {
    let mut surface = CanvasSurface::new(mode, target);
    surface.handle_viewport_resize(Rect::from_min_size(Pos2::new(0.0, 67.0), Vec2::new(width, height)));
    surface
}

#[test]
fn test_export_matches_surface_size_and_dark_background() {
    let surface = sized_surface(DisplayMode::Dark, ExportTarget::Memory, 120.0, 80.0);
    let outcome = block_on(surface.export_png().wait()).unwrap();

    assert_eq!(outcome.file_name, "img.png");
    let image = image::load_from_memory(&outcome.png).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (120, 80));
    assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 255]);
    assert_eq!(image.get_pixel(119, 79).0, [0, 0, 0, 255]);
}

#[test]
fn test_export_light_background() {
    let mut surface = sized_surface(DisplayMode::Dark, ExportTarget::Memory, 40.0, 30.0);
    surface.dispatch_action("Mode");

    let outcome = block_on(surface.export_png().wait()).unwrap();
    let image = image::load_from_memory(&outcome.png).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (40, 30));
    assert_eq!(image.get_pixel(20, 15).0, [255, 255, 255, 255]);
}

#[test]
fn test_save_action_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut surface = sized_surface(
        DisplayMode::Dark,
        ExportTarget::Directory(dir.path().to_owned()),
        24.0,
        12.0,
    );

    surface.dispatch_action("Save as PNG");
    let tasks = surface.take_pending_exports();
    assert_eq!(tasks.len(), 1);
    let outcome = tasks.into_iter().map(|task| block_on(task.wait())).next().unwrap().unwrap();

    let path = dir.path().join("img.png");
    assert_eq!(outcome.saved_to.as_deref(), Some(path.as_path()));
    let image = image::open(&path).unwrap();
    assert_eq!((image.width(), image.height()), (24, 12));
}

#[test]
fn test_poll_exports_drains_finished_tasks() {
    let mut surface = sized_surface(DisplayMode::Light, ExportTarget::Memory, 8.0, 8.0);
    surface.dispatch_action("Save as PNG");

    let mut results = Vec::new();
    for _ in 0..500 {
        results.extend(surface.poll_exports());
        if !surface.has_pending_exports() {
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(5));
    }
    assert_eq!(results.len(), 1);
    assert!(results[0].is_ok());
}

#[test]
fn test_unsized_surface_reports_failure() {
    let surface = CanvasSurface::default();
    let result = block_on(surface.export_png().wait());
    assert!(matches!(result, Err(ExportError::EmptySurface { width: 0, height: 0 })));
}

#[test]
fn test_write_failure_is_reported() {
    let surface = sized_surface(
        DisplayMode::Dark,
        ExportTarget::Directory("/nonexistent/splash/output".into()),
        4.0,
        4.0,
    );
    let result = block_on(surface.export_png().wait());
    assert!(matches!(result, Err(ExportError::Write { .. })));
}
