//! Camera capture with exclusive stream ownership.
//!
//! A [`CaptureStream`] holds the device's media tracks. The tracks are
//! stopped exactly once: as soon as a frame has been captured (whether or
//! not the grab succeeded), when the stream is released explicitly, or when
//! it is dropped. The [`Camera`] controller owns at most one stream.
//!
//! [`CameraDevice`], [`MediaTrack`] and [`FrameSource`] are the seam a front
//! end with a live camera plugs its device into. The CLI has no camera and
//! loads photos with [`CapturedImage::from_file`] instead.

pub mod error;
pub mod image;

pub use error::CameraError;
pub use image::CapturedImage;

/// Which lens to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FacingMode {
    #[default]
    User,
    Environment,
}

impl FacingMode {
    pub fn flipped(self) -> Self {
        match self {
            FacingMode::User => FacingMode::Environment,
            FacingMode::Environment => FacingMode::User,
        }
    }
}

/// One track of a live capture stream.
pub trait MediaTrack: Send {
    fn stop(&mut self);
    fn is_live(&self) -> bool;
}

/// Produces still frames from an open stream.
pub trait FrameSource: Send {
    fn grab_frame(&mut self) -> Result<CapturedImage, CameraError>;
}

/// A camera that can be opened in either facing mode.
pub trait CameraDevice: Send {
    fn open(&mut self, facing: FacingMode) -> Result<CaptureStream, CameraError>;
}

/// An open camera stream.
pub struct CaptureStream {
    facing: FacingMode,
    source: Box<dyn FrameSource>,
    tracks: Vec<Box<dyn MediaTrack>>,
    released: bool,
}

impl CaptureStream {
    pub fn new(
        facing: FacingMode,
        source: Box<dyn FrameSource>,
        tracks: Vec<Box<dyn MediaTrack>>,
    ) -> Self {
        Self {
            facing,
            source,
            tracks,
            released: false,
        }
    }

    pub fn facing(&self) -> FacingMode {
        self.facing
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Grab one frame and release the stream.
    pub fn capture(mut self) -> Result<CapturedImage, CameraError> {
        let frame = self.source.grab_frame();
        self.release();
        frame
    }

    /// Stop every live track. Later calls do nothing.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        for track in self.tracks.iter_mut().filter(|t| t.is_live()) {
            track.stop();
        }
        self.released = true;
        tracing::debug!(facing = ?self.facing, tracks = self.tracks.len(), "Camera stream released");
    }
}

impl Drop for CaptureStream {
    fn drop(&mut self) {
        self.release();
    }
}

/// Owns the camera device and its current stream.
pub struct Camera<D: CameraDevice> {
    device: D,
    facing: FacingMode,
    stream: Option<CaptureStream>,
}

impl<D: CameraDevice> Camera<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            facing: FacingMode::default(),
            stream: None,
        }
    }

    pub fn facing(&self) -> FacingMode {
        self.facing
    }

    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    /// Open a stream in the current facing mode, unless one is open already.
    pub fn start(&mut self) -> Result<(), CameraError> {
        if self.stream.is_none() {
            self.stream = Some(self.device.open(self.facing)?);
        }
        Ok(())
    }

    /// Release the current stream, then open one facing the other way.
    pub fn switch_facing(&mut self) -> Result<(), CameraError> {
        self.stop();
        self.facing = self.facing.flipped();
        self.start()
    }

    /// Capture a frame from the open stream, consuming it.
    pub fn capture(&mut self) -> Result<CapturedImage, CameraError> {
        let stream = self.stream.take().ok_or(CameraError::NotStarted)?;
        stream.capture()
    }

    pub fn stop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.release();
        }
    }
}
