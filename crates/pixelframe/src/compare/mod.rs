pub mod batch;
pub mod diff;
pub mod normalize;

use serde::Serialize;

pub use self::diff::{DEFAULT_THRESHOLD, DiffResult, diff, diff_files};
pub use self::normalize::normalize;

/// Status of a single pair comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DiffStatus {
    Pass {
        similarity: f64,
    },
    Fail {
        similarity: f64,
        dimension_mismatch: Option<(u32, u32, u32, u32)>,
    },
    Error {
        message: String,
    },
}

impl DiffStatus {
    pub fn from_result(result: &DiffResult) -> Self {
        if result.passed {
            Self::Pass {
                similarity: result.similarity,
            }
        } else {
            Self::Fail {
                similarity: result.similarity,
                dimension_mismatch: result.dimension_mismatch,
            }
        }
    }
}
