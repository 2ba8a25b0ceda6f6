//! Library side of the `specview` binary: logging setup and the render pipeline.

pub mod logging;
pub mod pipeline;
