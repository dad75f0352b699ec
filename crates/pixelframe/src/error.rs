use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("image not found or unreadable: {}", path.display())]
    ImageNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write image {}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("no images to process")]
    EmptyInput,

    /// Every item of a batch failed, so there is nothing to report.
    #[error("all {} item(s) failed", .errors.len())]
    NoResults { errors: Vec<String> },

    #[error(
        "region {w}x{h} at ({x}, {y}) is outside the {canvas_w}x{canvas_h} canvas"
    )]
    OutOfBounds {
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        canvas_w: u32,
        canvas_h: u32,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
