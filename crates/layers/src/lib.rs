pub mod entry;
pub mod markers;
pub mod popup;
pub mod spread;

pub use entry::*;
pub use markers::*;
pub use popup::*;
pub use spread::*;
