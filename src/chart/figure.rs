use serde::Serialize;
use serde_json::{json, Value};

use crate::chart::ChartStyle;
use crate::error::{PulseError, Result};
use crate::model::DateBucket;
use crate::util::{date_from_ordinal, day_label};

const COLOR_SCALE: &str = "Viridis";
const SCATTER3D: &str = "scatter3d";

pub const FRAME_DURATION_MS: u64 = 500;
pub const TRANSITION_MS: u64 = 300;
pub const TICK_STRIDE_DAYS: i64 = 30;

#[derive(Debug, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
    pub frames: Vec<Frame>,
}

#[derive(Debug, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub trace_type: &'static str,
    pub mode: &'static str,
    pub x: Vec<Option<i64>>,
    pub y: Vec<Option<f64>>,
    pub z: Vec<Option<f64>>,
    pub text: Vec<Option<String>>,
    pub hoverinfo: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
}

#[derive(Debug, Serialize)]
pub struct Marker {
    pub size: Vec<u32>,
    pub color: Vec<u32>,
    pub colorscale: &'static str,
    pub opacity: f64,
}

#[derive(Debug, Serialize)]
pub struct Line {
    pub color: Vec<u32>,
    pub colorscale: &'static str,
    pub width: f64,
}

#[derive(Debug, Serialize)]
pub struct Layout {
    pub title: Text,
    pub scene: Scene,
    pub updatemenus: Vec<UpdateMenu>,
}

#[derive(Debug, Serialize)]
pub struct Text {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct Scene {
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub zaxis: Axis,
    pub camera: Camera,
}

#[derive(Debug, Serialize)]
pub struct Axis {
    pub title: Text,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickmode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickvals: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticktext: Option<Vec<String>>,
}

impl Axis {
    fn plain(title: &str) -> Self {
        Self {
            title: Text {
                text: title.to_string(),
            },
            tickmode: None,
            tickvals: None,
            ticktext: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Camera {
    pub eye: Eye,
}

#[derive(Debug, Serialize)]
pub struct Eye {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Serialize)]
pub struct UpdateMenu {
    #[serde(rename = "type")]
    pub menu_type: &'static str,
    pub direction: &'static str,
    pub pad: Value,
    pub showactive: bool,
    pub x: f64,
    pub xanchor: &'static str,
    pub y: f64,
    pub yanchor: &'static str,
    pub buttons: Vec<Button>,
}

#[derive(Debug, Serialize)]
pub struct Button {
    pub label: &'static str,
    pub method: &'static str,
    pub args: Value,
}

#[derive(Debug, Serialize)]
pub struct Frame {
    pub name: String,
    pub data: Vec<Trace>,
}

/// Assemble the animated figure. The base trace holds the full dataset;
/// frame `k` replays buckets `0..=k`, growing the chart one day at a time.
pub fn build_figure(buckets: &[DateBucket], style: ChartStyle, title: &str) -> Result<Figure> {
    for bucket in buckets {
        if bucket.count == 0 {
            return Err(PulseError::InvalidCount {
                date: bucket.date,
                count: bucket.count,
            });
        }
    }

    let frames = (0..buckets.len())
        .map(|k| Frame {
            name: day_label(buckets[k].date),
            data: vec![bucket_trace(&buckets[..=k], style)],
        })
        .collect();

    Ok(Figure {
        data: vec![bucket_trace(buckets, style)],
        layout: layout(buckets, title),
        frames,
    })
}

fn bucket_trace(buckets: &[DateBucket], style: ChartStyle) -> Trace {
    match style {
        ChartStyle::Bar => stem_trace(buckets),
        ChartStyle::Point => point_trace(buckets),
    }
}

fn point_trace(buckets: &[DateBucket]) -> Trace {
    let counts: Vec<u32> = buckets.iter().map(|bucket| bucket.count).collect();
    Trace {
        trace_type: SCATTER3D,
        mode: "markers",
        x: buckets.iter().map(|bucket| Some(bucket.ordinal)).collect(),
        y: vec![Some(0.0); buckets.len()],
        z: counts.iter().map(|&count| Some(f64::from(count))).collect(),
        text: buckets
            .iter()
            .map(|bucket| Some(day_label(bucket.date)))
            .collect(),
        hoverinfo: "text+z",
        marker: Some(Marker {
            size: counts.clone(),
            color: counts,
            colorscale: COLOR_SCALE,
            opacity: 0.8,
        }),
        line: None,
    }
}

/// Vertical stems drawn as one line trace, with a null vertex between
/// days so consecutive stems are not joined.
fn stem_trace(buckets: &[DateBucket]) -> Trace {
    let mut x = Vec::with_capacity(buckets.len() * 3);
    let mut y = Vec::with_capacity(buckets.len() * 3);
    let mut z = Vec::with_capacity(buckets.len() * 3);
    let mut text = Vec::with_capacity(buckets.len() * 3);
    let mut color = Vec::with_capacity(buckets.len() * 3);

    for bucket in buckets {
        x.extend([Some(bucket.ordinal), Some(bucket.ordinal), None]);
        y.extend([Some(0.0), Some(0.0), None]);
        z.extend([Some(0.0), Some(f64::from(bucket.count)), None]);
        let label = day_label(bucket.date);
        text.extend([Some(label.clone()), Some(label), None]);
        color.extend([bucket.count; 3]);
    }

    Trace {
        trace_type: SCATTER3D,
        mode: "lines",
        x,
        y,
        z,
        text,
        hoverinfo: "text+z",
        marker: None,
        line: Some(Line {
            color,
            colorscale: COLOR_SCALE,
            width: 6.0,
        }),
    }
}

fn layout(buckets: &[DateBucket], title: &str) -> Layout {
    let (tickvals, ticktext) = tick_marks(buckets);
    Layout {
        title: Text {
            text: title.to_string(),
        },
        scene: Scene {
            xaxis: Axis {
                title: Text {
                    text: "Date".to_string(),
                },
                tickmode: Some("array"),
                tickvals: Some(tickvals),
                ticktext: Some(ticktext),
            },
            yaxis: Axis::plain(""),
            zaxis: Axis::plain("Number of Commits"),
            camera: Camera {
                eye: Eye {
                    x: 1.5,
                    y: 1.5,
                    z: 1.5,
                },
            },
        },
        updatemenus: vec![controls()],
    }
}

/// Date labels every [`TICK_STRIDE_DAYS`] across the bucket span. The span
/// end is exclusive, so a single-date chart gets no explicit ticks.
fn tick_marks(buckets: &[DateBucket]) -> (Vec<i64>, Vec<String>) {
    let (Some(first), Some(last)) = (buckets.first(), buckets.last()) else {
        return (Vec::new(), Vec::new());
    };

    let mut tickvals = Vec::new();
    let mut ticktext = Vec::new();
    let mut ordinal = first.ordinal;
    while ordinal < last.ordinal {
        if let Some(date) = date_from_ordinal(ordinal) {
            tickvals.push(ordinal);
            ticktext.push(day_label(date));
        }
        ordinal += TICK_STRIDE_DAYS;
    }
    (tickvals, ticktext)
}

fn controls() -> UpdateMenu {
    UpdateMenu {
        menu_type: "buttons",
        direction: "left",
        pad: json!({ "r": 10, "t": 87 }),
        showactive: false,
        x: 0.1,
        xanchor: "right",
        y: 0.0,
        yanchor: "top",
        buttons: vec![
            Button {
                label: "Play",
                method: "animate",
                args: json!([
                    null,
                    {
                        "frame": { "duration": FRAME_DURATION_MS, "redraw": true },
                        "fromcurrent": true,
                        "transition": { "duration": TRANSITION_MS }
                    }
                ]),
            },
            Button {
                label: "Pause",
                method: "animate",
                args: json!([
                    [null],
                    {
                        "frame": { "duration": 0, "redraw": true },
                        "mode": "immediate",
                        "transition": { "duration": 0 }
                    }
                ]),
            },
        ],
    }
}
