pub mod document;
pub mod html;

pub use document::*;
