use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid frame size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("Invalid render configuration: {0}")]
    Config(String),
    #[error("Failed to create canvas")]
    Canvas,
    #[error("Nothing to render: trajectory is empty")]
    EmptyTrajectory,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PNG encoding failed: {0}")]
    Png(String),
    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
