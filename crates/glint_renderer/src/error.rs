use thiserror::Error;

/// Errors from setting up or finishing a render.
///
/// Tracing itself never fails; misses and absorption are ordinary results.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type RenderResult<T> = Result<T, RenderError>;
