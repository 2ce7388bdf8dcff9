mod backdrop;
mod bubbles;
mod geometry;
mod projection;

pub use backdrop::{Backdrop, Lod};
pub use bubbles::{BubbleChart, Tooltip};
pub use projection::Viewport;
