//! Rendering error types.

use thiserror::Error;

/// Errors that can occur during rendering operations.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Failed to create wgpu adapter.
    #[error("failed to create graphics adapter")]
    AdapterCreationFailed,

    /// Failed to create wgpu device.
    #[error("failed to create graphics device: {0}")]
    DeviceCreationFailed(#[from] wgpu::RequestDeviceError),

    /// Failed to create surface.
    #[error("failed to create surface: {0}")]
    SurfaceCreationFailed(#[from] wgpu::CreateSurfaceError),

    /// The surface reports no usable texture format.
    #[error("surface has no supported format")]
    SurfaceConfigurationFailed,

    /// The engine has no surface to present to.
    #[error("engine has no window surface")]
    NoSurface,

    /// The engine has no offscreen target to read back.
    #[error("engine has no offscreen target")]
    NoOffscreenTarget,

    /// Surface lost.
    #[error("surface lost")]
    SurfaceLost,

    /// Surface outdated.
    #[error("surface outdated")]
    SurfaceOutdated,

    /// Out of memory.
    #[error("out of memory")]
    OutOfMemory,

    /// Timeout waiting for GPU.
    #[error("timeout waiting for GPU")]
    Timeout,

    /// Acquiring the next surface texture failed for another reason.
    #[error("failed to acquire surface texture")]
    SurfaceAcquireFailed,

    /// Mapping a readback buffer failed.
    #[error("GPU buffer mapping failed")]
    BufferMapFailed,

    /// Image encoding or file output failed.
    #[error("image export failed: {0}")]
    ImageExport(#[from] image::ImageError),

    /// Unsupported output image extension.
    #[error("unsupported image format: {0}")]
    UnsupportedImageFormat(String),

    /// Pixel data does not match the image dimensions.
    #[error("invalid image data")]
    InvalidImageData,
}

/// A specialized Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;

impl From<wgpu::SurfaceError> for RenderError {
    fn from(err: wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost => RenderError::SurfaceLost,
            wgpu::SurfaceError::Outdated => RenderError::SurfaceOutdated,
            wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
            wgpu::SurfaceError::Timeout => RenderError::Timeout,
            wgpu::SurfaceError::Other => RenderError::SurfaceAcquireFailed,
        }
    }
}
