//! Camera Capture
//!
//! `getUserMedia` wrapper for identity-verification photos. The live preview
//! is mirrored with CSS only; captured stills keep the sensor orientation.

use serde::Serialize;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, CanvasRenderingContext2d, DataTransfer, DomException, File, FilePropertyBag, HtmlCanvasElement,
    HtmlInputElement, HtmlVideoElement, MediaStream, MediaStreamConstraints, MediaStreamTrack,
};

pub const PHOTO_MIME: &str = "image/jpeg";
pub const PHOTO_QUALITY: f64 = 0.92;

/// Why the camera could not be used. `Display` is the alert text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CameraError {
    #[error("Camera access was denied. Please allow camera permission in your browser settings and try again.")]
    PermissionDenied,
    #[error("No camera was found on this device.")]
    DeviceNotFound,
    #[error("This browser does not support camera access.")]
    Unsupported,
    #[error("Could not access the camera: {0}")]
    Other(String),
}

impl CameraError {
    /// Classify a `DOMException` name from `getUserMedia`
    pub fn from_dom_name(name: &str, message: &str) -> Self {
        match name {
            "NotAllowedError" | "PermissionDeniedError" | "SecurityError" => CameraError::PermissionDenied,
            "NotFoundError" | "DevicesNotFoundError" | "OverconstrainedError" => CameraError::DeviceNotFound,
            _ => CameraError::Other(if message.is_empty() { name.to_string() } else { message.to_string() }),
        }
    }
}

impl From<JsValue> for CameraError {
    fn from(value: JsValue) -> Self {
        match value.dyn_ref::<DomException>() {
            Some(e) => CameraError::from_dom_name(&e.name(), &e.message()),
            None => CameraError::Other(value.as_string().unwrap_or_else(|| format!("{:?}", value))),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdealU32 {
    ideal: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoConstraints {
    facing_mode: &'static str,
    width: IdealU32,
    height: IdealU32,
}

/// Canvas size and 2D transform for a capture.
/// The canvas always takes the stream's native resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureGeometry {
    pub width: u32,
    pub height: u32,
    /// `setTransform(a, b, c, d, e, f)` arguments
    pub transform: [f64; 6],
}

impl CaptureGeometry {
    /// `mirrored` = keep the selfie-style flip seen in the preview
    pub fn new(native_width: u32, native_height: u32, mirrored: bool) -> Self {
        let transform = if mirrored {
            [-1.0, 0.0, 0.0, 1.0, native_width as f64, 0.0]
        } else {
            [1.0, 0.0, 0.0, 1.0, 0.0, 0.0]
        };
        Self {
            width: native_width,
            height: native_height,
            transform,
        }
    }
}

/// Frame dimensions of a playing video
pub trait VideoFrame {
    /// Intrinsic stream resolution (`videoWidth` x `videoHeight`)
    fn native_size(&self) -> (u32, u32);
    /// Size the element is laid out at
    fn display_size(&self) -> (u32, u32);
}

impl VideoFrame for HtmlVideoElement {
    fn native_size(&self) -> (u32, u32) {
        (self.video_width(), self.video_height())
    }

    fn display_size(&self) -> (u32, u32) {
        (self.client_width().max(0) as u32, self.client_height().max(0) as u32)
    }
}

impl CaptureGeometry {
    /// Unmirrored capture geometry at the frame's native resolution
    pub fn for_frame(frame: &impl VideoFrame) -> Result<Self, CameraError> {
        let (width, height) = frame.native_size();
        if width == 0 || height == 0 {
            return Err(CameraError::Other("the camera has not produced a frame yet".to_string()));
        }
        Ok(Self::new(width, height, false))
    }
}

/// Holds the live stream of one camera panel.
/// Streams that arrive after a release or close are handed back to be stopped.
#[derive(Debug)]
pub struct StreamSlot<S> {
    stream: Option<S>,
    pending: bool,
    closed: bool,
}

impl<S> Default for StreamSlot<S> {
    fn default() -> Self {
        Self { stream: None, pending: false, closed: false }
    }
}

impl<S> StreamSlot<S> {
    /// Mark an open request in flight. False once closed.
    pub fn begin_open(&mut self) -> bool {
        if self.closed {
            return false;
        }
        self.pending = true;
        true
    }

    /// Keep a freshly opened stream. Returns whatever must be stopped: the
    /// new stream if nobody is waiting for it, else any stream it replaces.
    pub fn adopt(&mut self, stream: S) -> Option<S> {
        if self.closed || !self.pending {
            return Some(stream);
        }
        self.pending = false;
        self.stream.replace(stream)
    }

    /// Drop the held stream and cancel any open in flight
    pub fn release(&mut self) -> Option<S> {
        self.pending = false;
        self.stream.take()
    }

    /// Release and refuse every later stream
    pub fn close(&mut self) -> Option<S> {
        self.closed = true;
        self.release()
    }

    pub fn is_live(&self) -> bool {
        self.stream.is_some()
    }
}

/// Request a front-facing stream, bind it to `video` and start playback
pub async fn open_camera(video: &HtmlVideoElement) -> Result<MediaStream, CameraError> {
    let window = web_sys::window().ok_or(CameraError::Unsupported)?;
    let devices = window.navigator().media_devices().map_err(|_| CameraError::Unsupported)?;

    let video_constraints = VideoConstraints {
        facing_mode: "user",
        width: IdealU32 { ideal: 1280 },
        height: IdealU32 { ideal: 720 },
    };
    let constraints = MediaStreamConstraints::new();
    constraints.set_audio(&JsValue::FALSE);
    constraints.set_video(
        &serde_wasm_bindgen::to_value(&video_constraints).map_err(|e| CameraError::Other(e.to_string()))?,
    );

    let promise = devices.get_user_media_with_constraints(&constraints)?;
    let stream: MediaStream = JsFuture::from(promise).await?.dyn_into()?;
    web_sys::console::log_1(&format!("[CAMERA] Stream opened: {}", stream.id()).into());

    video.set_src_object(Some(&stream));
    if let Ok(play) = video.play() {
        if let Err(e) = JsFuture::from(play).await {
            web_sys::console::warn_1(&format!("[CAMERA] Autoplay blocked: {:?}", e).into());
        }
    }
    Ok(stream)
}

/// Copy the current frame into an offscreen canvas at native resolution
pub fn capture_frame(video: &HtmlVideoElement) -> Result<HtmlCanvasElement, CameraError> {
    let geometry = CaptureGeometry::for_frame(video)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(CameraError::Unsupported)?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")?
        .dyn_into()
        .map_err(JsValue::from)?;
    canvas.set_width(geometry.width);
    canvas.set_height(geometry.height);

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(CameraError::Unsupported)?
        .dyn_into()
        .map_err(JsValue::from)?;
    let [a, b, c, d, e, f] = geometry.transform;
    ctx.set_transform(a, b, c, d, e, f)?;
    ctx.draw_image_with_html_video_element_and_dw_and_dh(
        video,
        0.0,
        0.0,
        geometry.width as f64,
        geometry.height as f64,
    )?;
    Ok(canvas)
}

/// Export a canvas to a JPEG blob
pub async fn canvas_to_blob(canvas: &HtmlCanvasElement) -> Result<Blob, CameraError> {
    let mut export_error = None;
    let promise = js_sys::Promise::new(&mut |resolve: js_sys::Function, reject: js_sys::Function| {
        let on_blob = Closure::once_into_js(move |blob: JsValue| {
            let _ = if blob.is_null() {
                reject.call1(&JsValue::NULL, &JsValue::from_str("canvas export produced no data"))
            } else {
                resolve.call1(&JsValue::NULL, &blob)
            };
        });
        if let Err(e) = canvas.to_blob_with_type_and_encoder_options(
            on_blob.unchecked_ref(),
            PHOTO_MIME,
            &JsValue::from_f64(PHOTO_QUALITY),
        ) {
            export_error = Some(e);
        }
    });
    if let Some(e) = export_error {
        return Err(e.into());
    }
    Ok(JsFuture::from(promise).await?.dyn_into()?)
}

/// Capture the current frame as a JPEG blob
pub async fn capture_photo(video: &HtmlVideoElement) -> Result<Blob, CameraError> {
    let canvas = capture_frame(video)?;
    let blob = canvas_to_blob(&canvas).await?;
    web_sys::console::log_1(
        &format!("[CAMERA] Captured {}x{} ({} bytes)", canvas.width(), canvas.height(), blob.size()).into(),
    );
    Ok(blob)
}

/// Put a captured photo into a file input so the enclosing form posts it
pub fn attach_to_file_input(blob: &Blob, input: &HtmlInputElement, file_name: &str) -> Result<(), CameraError> {
    let options = FilePropertyBag::new();
    options.set_type(PHOTO_MIME);
    let file = File::new_with_blob_sequence_and_options(&js_sys::Array::of1(blob), file_name, &options)?;
    let transfer = DataTransfer::new()?;
    transfer.items().add_with_file(&file)?;
    input.set_files(transfer.files().as_ref());
    Ok(())
}

/// Stop every track and detach the stream from the video element
pub fn stop_camera(stream: &MediaStream, video: Option<&HtmlVideoElement>) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
    if let Some(video) = video {
        video.set_src_object(None);
    }
    web_sys::console::log_1(&"[CAMERA] Stream stopped".into());
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeFrame {
        native: (u32, u32),
        display: (u32, u32),
    }

    impl VideoFrame for FakeFrame {
        fn native_size(&self) -> (u32, u32) {
            self.native
        }

        fn display_size(&self) -> (u32, u32) {
            self.display
        }
    }

    #[test]
    fn test_geometry_uses_native_resolution() {
        let frame = FakeFrame { native: (1280, 720), display: (320, 180) };
        let geometry = CaptureGeometry::for_frame(&frame).unwrap();
        assert_ne!((geometry.width, geometry.height), frame.display_size());
        assert_eq!((geometry.width, geometry.height), (1280, 720));
        assert_eq!(geometry.transform, [1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_geometry_portrait_sensor_in_landscape_box() {
        let frame = FakeFrame { native: (720, 1280), display: (640, 360) };
        let geometry = CaptureGeometry::for_frame(&frame).unwrap();
        assert_eq!((geometry.width, geometry.height), (720, 1280));
    }

    #[test]
    fn test_geometry_needs_a_frame() {
        let frame = FakeFrame { native: (0, 0), display: (640, 360) };
        assert!(matches!(CaptureGeometry::for_frame(&frame), Err(CameraError::Other(_))));
    }

    #[test]
    fn test_stream_slot_keeps_requested_stream() {
        let mut slot = StreamSlot::default();
        assert!(slot.begin_open());
        assert_eq!(slot.adopt("a"), None);
        assert!(slot.is_live());
        assert_eq!(slot.release(), Some("a"));
        assert!(!slot.is_live());
    }

    #[test]
    fn test_stream_slot_stops_stream_after_close() {
        // Unmounted while the permission prompt was still open
        let mut slot = StreamSlot::default();
        assert!(slot.begin_open());
        assert_eq!(slot.close(), None);
        assert_eq!(slot.adopt("late"), Some("late"));
        assert!(!slot.is_live());
        assert!(!slot.begin_open());
    }

    #[test]
    fn test_stream_slot_stops_stream_after_release() {
        let mut slot = StreamSlot::default();
        slot.begin_open();
        assert_eq!(slot.release(), None);
        assert_eq!(slot.adopt("late"), Some("late"));
        assert!(!slot.is_live());
    }

    #[test]
    fn test_stream_slot_replaces_previous_stream() {
        let mut slot = StreamSlot::default();
        slot.begin_open();
        slot.adopt("first");
        slot.begin_open();
        assert_eq!(slot.adopt("second"), Some("first"));
        assert_eq!(slot.close(), Some("second"));
    }

    #[test]
    fn test_geometry_mirrored_transform() {
        let geometry = CaptureGeometry::new(640, 480, true);
        assert_eq!((geometry.width, geometry.height), (640, 480));
        assert_eq!(geometry.transform, [-1.0, 0.0, 0.0, 1.0, 640.0, 0.0]);
    }

    #[test]
    fn test_dom_error_classification() {
        assert_eq!(CameraError::from_dom_name("NotAllowedError", "Permission denied"), CameraError::PermissionDenied);
        assert_eq!(CameraError::from_dom_name("NotFoundError", ""), CameraError::DeviceNotFound);
        assert_eq!(
            CameraError::from_dom_name("NotReadableError", "Device in use"),
            CameraError::Other("Device in use".to_string())
        );
        assert_eq!(CameraError::from_dom_name("AbortError", ""), CameraError::Other("AbortError".to_string()));
    }

    #[test]
    fn test_alert_text() {
        assert_eq!(CameraError::DeviceNotFound.to_string(), "No camera was found on this device.");
        assert!(CameraError::Other("busy".to_string()).to_string().ends_with("busy"));
    }
}
