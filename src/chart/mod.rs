pub mod figure;
pub mod html;

pub use figure::{build_figure, Figure};
pub use html::{default_artifact_path, open_artifact, write_artifact};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ChartStyle {
    /// Vertical stems from the floor, one per day.
    Bar,
    /// Floating markers sized and colored by commit count.
    Point,
}
