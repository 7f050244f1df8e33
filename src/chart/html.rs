use std::fs;
use std::path::{Path, PathBuf};

use crate::chart::figure::Figure;
use crate::error::Result;

const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

pub fn default_artifact_path() -> PathBuf {
    std::env::temp_dir().join("gitpulse.html")
}

/// The figure JSON is inlined into a script tag, so `</` sequences are
/// escaped to keep the payload from terminating the tag.
fn render_page(figure: &Figure) -> Result<String> {
    let payload = serde_json::to_string(figure)?.replace("</", r"<\/");
    let title = escape_html(&figure.layout.title.text);

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{PLOTLY_JS}"></script>
<style>html, body, #chart {{ margin: 0; height: 100%; }}</style>
</head>
<body>
<div id="chart"></div>
<script>
const figure = {payload};
Plotly.newPlot("chart", figure.data, figure.layout, {{ responsive: true }})
    .then(() => Plotly.addFrames("chart", figure.frames));
</script>
</body>
</html>
"#
    ))
}

pub fn write_artifact(path: &Path, figure: &Figure) -> Result<()> {
    fs::write(path, render_page(figure)?)?;
    Ok(())
}

/// Failure to open the browser is reported but never fails the run.
pub fn open_artifact(path: &Path) {
    if let Err(err) = open::that(path) {
        eprintln!("Warning: could not open browser: {err}");
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{build_figure, ChartStyle};
    use crate::model::DateBucket;
    use crate::util::day_ordinal;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn figure(title: &str) -> Figure {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let buckets = vec![DateBucket {
            date,
            count: 3,
            ordinal: day_ordinal(date),
        }];
        build_figure(&buckets, ChartStyle::Bar, title).unwrap()
    }

    #[test]
    fn page_embeds_figure_and_bootstraps_plotly() {
        let page = render_page(&figure("Activity")).unwrap();

        assert!(page.contains(PLOTLY_JS));
        assert!(page.contains("<title>Activity</title>"));
        assert!(page.contains(r#""type":"scatter3d""#));
        assert!(page.contains("Plotly.newPlot"));
        assert!(page.contains("Plotly.addFrames"));
    }

    #[test]
    fn embedded_json_cannot_terminate_the_script_tag() {
        let page = render_page(&figure("</script><b>x</b>")).unwrap();

        assert!(page.contains(r"<\/script>"));
        assert!(page.contains("&lt;/script&gt;"));
    }

    #[test]
    fn artifact_is_written_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.html");

        write_artifact(&path, &figure("Activity")).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("Plotly.newPlot"));
    }

    #[test]
    fn default_path_is_stable() {
        assert_eq!(
            default_artifact_path().file_name().and_then(|n| n.to_str()),
            Some("gitpulse.html")
        );
    }

    #[test]
    fn html_escaping_covers_markup_characters() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }
}
