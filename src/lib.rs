pub mod aggregate;
pub mod chart;
pub mod cli;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod source;
pub mod util;
