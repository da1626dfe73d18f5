use std::io::Cursor;
use std::path::PathBuf;

use egui::Color32;
use futures::channel::oneshot;
use image::ImageFormat;

use crate::error::{ExportError, ExportResult};
use crate::raster;
use crate::stroke::Stroke;

pub const DEFAULT_EXPORT_FILE_NAME: &str = "img.png";

/// Where a finished PNG goes
#[derive(Debug, Clone, PartialEq)]
pub enum ExportTarget {
    /// Keep the encoded bytes only
    Memory,
    /// Write `<dir>/<file name>` to disk
    Directory(PathBuf),
    /// Hand the file to the browser as a download
    Browser,
}

/// Owned copy of everything an export needs, taken on the UI thread
#[derive(Debug, Clone)]
pub struct SurfaceSnapshot {
    pub width: u32,
    pub height: u32,
    pub background: Color32,
    pub strokes: Vec<Stroke>,
}

/// A finished export
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
    /// Set when the target was a directory
    pub saved_to: Option<PathBuf>,
}

/// Handle to an export running off the UI thread
#[derive(Debug)]
pub struct ExportTask {
    receiver: oneshot::Receiver<ExportResult<ExportOutcome>>,
}

impl ExportTask {
    /// Non-blocking check, returns the result once it is available
    pub fn try_take(&mut self) -> Option<ExportResult<ExportOutcome>> {
        match self.receiver.try_recv() {
            Ok(Some(result)) => Some(result),
            Ok(None) => None,
            Err(oneshot::Canceled) => Some(Err(ExportError::Canceled)),
        }
    }

    /// Waits for the export to finish
    pub async fn wait(self) -> ExportResult<ExportOutcome> {
        self.receiver.await.unwrap_or(Err(ExportError::Canceled))
    }
}

/// Starts an export of `snapshot` and returns immediately.
pub fn spawn_export(snapshot: SurfaceSnapshot, file_name: String, target: ExportTarget) -> ExportTask {
    let (sender, receiver) = oneshot::channel();
    let job = move || {
        let result = run_export(&snapshot, &file_name, &target);
        if sender.send(result).is_err() {
            log::debug!("Export finished after its task was dropped");
        }
    };

    #[cfg(not(target_arch = "wasm32"))]
    {
        // A failed spawn drops `job` with its sender, which resolves the task as Canceled
        if let Err(err) = std::thread::Builder::new().name("png-export".to_owned()).spawn(job) {
            log::error!("Failed to start export worker: {}", err);
        }
    }

    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(async move { job() });
    }

    ExportTask { receiver }
}

/// Rasterize, encode and deliver
pub fn run_export(snapshot: &SurfaceSnapshot, file_name: &str, target: &ExportTarget) -> ExportResult<ExportOutcome> {
    let png = render_png(snapshot)?;
    log::info!(
        "Encoded {}x{} PNG with {} strokes ({} bytes)",
        snapshot.width,
        snapshot.height,
        snapshot.strokes.len(),
        png.len()
    );
    let saved_to = deliver(&png, file_name, target)?;
    Ok(ExportOutcome {
        file_name: file_name.to_owned(),
        width: snapshot.width,
        height: snapshot.height,
        png,
        saved_to,
    })
}

/// Encodes the snapshot as PNG bytes, background composited behind the strokes
pub fn render_png(snapshot: &SurfaceSnapshot) -> ExportResult<Vec<u8>> {
    if snapshot.width == 0 || snapshot.height == 0 {
        return Err(ExportError::EmptySurface {
            width: snapshot.width,
            height: snapshot.height,
        });
    }
    let mut pixmap = raster::blank_canvas(snapshot.width, snapshot.height, snapshot.background).ok_or(
        ExportError::Allocation {
            width: snapshot.width,
            height: snapshot.height,
        },
    )?;
    raster::paint_strokes(&mut pixmap, &snapshot.strokes);

    let mut png = Vec::new();
    raster::to_rgba_image(&pixmap).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}

fn deliver(png: &[u8], file_name: &str, target: &ExportTarget) -> ExportResult<Option<PathBuf>> {
    match target {
        ExportTarget::Memory => Ok(None),
        ExportTarget::Directory(dir) => {
            let path = dir.join(file_name);
            std::fs::write(&path, png).map_err(|source| ExportError::Write {
                path: path.clone(),
                source,
            })?;
            Ok(Some(path))
        }
        ExportTarget::Browser => {
            trigger_download(png, file_name)?;
            Ok(None)
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn trigger_download(png: &[u8], file_name: &str) -> ExportResult<()> {
    use eframe::wasm_bindgen::{JsCast as _, JsValue};

    let js_err = |err: JsValue| ExportError::Download(format!("{:?}", err));
    let window = web_sys::window().ok_or_else(|| ExportError::Download("no window".to_owned()))?;
    let document = window
        .document()
        .ok_or_else(|| ExportError::Download("no document".to_owned()))?;
    let body = document
        .body()
        .ok_or_else(|| ExportError::Download("no document body".to_owned()))?;

    let bytes = js_sys::Uint8Array::from(png);
    let parts = js_sys::Array::of1(&bytes);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_err)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

    let anchor = document
        .create_element("a")
        .map_err(js_err)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| ExportError::Download("created element is not an anchor".to_owned()))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    body.append_child(&anchor).map_err(js_err)?;
    anchor.click();
    body.remove_child(&anchor).map_err(js_err)?;
    web_sys::Url::revoke_object_url(&url).map_err(js_err)?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn trigger_download(_png: &[u8], _file_name: &str) -> ExportResult<()> {
    Err(ExportError::Download("browser downloads are only available on the web".to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::RevealTiming;
    use crate::stroke::PolarPoint;
    use egui::Pos2;

    fn snapshot(width: u32, height: u32, background: Color32) -> SurfaceSnapshot {
        SurfaceSnapshot {
            width,
            height,
            background,
            strokes: Vec::new(),
        }
    }

    #[test]
    fn test_render_png_dimensions_and_background() {
        let png = render_png(&snapshot(32, 24, Color32::WHITE)).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (32, 24));
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_render_png_paints_strokes() {
        let mut snap = snapshot(64, 64, Color32::BLACK);
        let shape = vec![
            PolarPoint::new(0.0, 20.0),
            PolarPoint::new(std::f32::consts::FRAC_PI_2, 20.0),
        ];
        snap.strokes.push(Stroke::new(
            Pos2::new(30.0, 30.0),
            shape,
            Color32::from_rgb(0xFF, 0x50, 0x1B),
            0.0,
            RevealTiming::default(),
        ));

        let png = render_png(&snap).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(35, 25).0, [0xFF, 0x50, 0x1B, 255]);
        assert_eq!(decoded.get_pixel(5, 5).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_empty_surface_rejected() {
        let err = render_png(&snapshot(0, 10, Color32::BLACK)).unwrap_err();
        assert!(matches!(err, ExportError::EmptySurface { width: 0, height: 10 }));
    }

    #[test]
    fn test_memory_export_completes() {
        let task = spawn_export(snapshot(8, 8, Color32::BLACK), "img.png".to_owned(), ExportTarget::Memory);
        let outcome = futures::executor::block_on(task.wait()).unwrap();
        assert_eq!(outcome.file_name, "img.png");
        assert_eq!((outcome.width, outcome.height), (8, 8));
        assert!(outcome.saved_to.is_none());
        assert!(!outcome.png.is_empty());
    }

    #[test]
    fn test_failed_export_reports_error() {
        let task = spawn_export(snapshot(0, 0, Color32::BLACK), "img.png".to_owned(), ExportTarget::Memory);
        let result = futures::executor::block_on(task.wait());
        assert!(matches!(result, Err(ExportError::EmptySurface { .. })));
    }
}
