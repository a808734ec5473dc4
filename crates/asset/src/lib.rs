//! Asset loading: Wavefront OBJ models flattened into GPU-ready buffers.

pub mod error;
pub mod obj;

pub use error::{ObjError, ObjResult};
pub use obj::{load_model, parse_model, parse_model_str};
