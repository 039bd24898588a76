pub mod chart;
pub mod cli;
pub mod error;
pub mod layout;
pub mod logging;
pub mod model;
pub mod plot;
pub mod render;
pub mod stats;
pub mod tables;

pub use error::{PlotError, Result};
