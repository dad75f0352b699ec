//! Screenshot diffing and composite grids.
//!
//! - [`compare`]: pad two images to a common size, count exactly matching
//!   pixels, and render a red-on-faded diff image.
//! - [`composite`]: thumbnail screenshots into labeled cards and lay them out
//!   on a grid.
//!
//! Both work on [`canvas::Canvas`] values and hold no state between calls.

pub mod canvas;
pub mod compare;
pub mod composite;
pub mod error;
pub mod store;

pub use self::error::{Error, Result};
