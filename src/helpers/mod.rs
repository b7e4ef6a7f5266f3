//! Helper functions shared by the renderer and the layouts

mod html;
mod toc;

pub use html::*;
pub use toc::*;
