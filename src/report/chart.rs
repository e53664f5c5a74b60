//! SVG box chart of posterior ranks: one column per team, a box spanning
//! the 25th to 75th percentile, whiskers from the 5th to the 95th and a
//! median marker.

use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

use super::TeamRank;
use crate::error::AppError;

const COLUMN_WIDTH: f64 = 28.0;
const BOX_WIDTH: f64 = 16.0;
const LEFT: f64 = 70.0;
const RIGHT: f64 = 20.0;
const TOP: f64 = 40.0;
const PLOT_HEIGHT: f64 = 480.0;
const BOTTOM: f64 = 60.0;

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Rank ticks: 1, then every fifth rank up to `max_rank`.
fn ticks(max_rank: usize) -> Vec<usize> {
    let mut ticks = vec![1];
    ticks.extend((5..=max_rank).step_by(5));
    if max_rank > 1 && !ticks.contains(&max_rank) {
        ticks.push(max_rank);
    }
    ticks
}

/// Renders the chart. Rank 1 sits at the bottom of the y axis.
pub fn render_chart(title: &str, ranks: &[TeamRank]) -> String {
    let max_rank = ranks.len().max(1);
    let width = LEFT + COLUMN_WIDTH * ranks.len() as f64 + RIGHT;
    let height = TOP + PLOT_HEIGHT + BOTTOM;
    let bottom = TOP + PLOT_HEIGHT;

    // Ranks 0.5..max+0.5 fill the plot area.
    let y = |rank: f64| bottom - (rank - 0.5) / max_rank as f64 * PLOT_HEIGHT;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}" font-family="sans-serif" font-size="11">"#
    );
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
    let _ = writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="14">{}</text>"#,
        width / 2.0,
        TOP / 2.0,
        escape(title)
    );

    for tick in ticks(max_rank) {
        let ty = y(tick as f64);
        let _ = writeln!(
            svg,
            r##"<line x1="{LEFT:.1}" y1="{ty:.1}" x2="{:.1}" y2="{ty:.1}" stroke="#e0e0e0"/>"##,
            width - RIGHT
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end">{tick}</text>"#,
            LEFT - 6.0,
            ty + 4.0
        );
    }
    let _ = writeln!(
        svg,
        r#"<text x="16" y="{:.1}" text-anchor="middle" transform="rotate(-90 16 {:.1})">Posterior of Ranks</text>"#,
        TOP + PLOT_HEIGHT / 2.0,
        TOP + PLOT_HEIGHT / 2.0
    );
    let _ = writeln!(
        svg,
        r#"<line x1="{LEFT:.1}" y1="{TOP:.1}" x2="{LEFT:.1}" y2="{bottom:.1}" stroke="black"/>"#
    );
    let _ = writeln!(
        svg,
        r#"<line x1="{LEFT:.1}" y1="{bottom:.1}" x2="{:.1}" y2="{bottom:.1}" stroke="black"/>"#,
        width - RIGHT
    );

    for (i, rank) in ranks.iter().enumerate() {
        let s = &rank.summary;
        let cx = LEFT + COLUMN_WIDTH * (i as f64 + 0.5);
        let half = BOX_WIDTH / 2.0;
        let _ = writeln!(svg, r#"<g class="team" data-team-id="{}">"#, rank.team.team_id);
        let _ = writeln!(
            svg,
            r#"<line x1="{cx:.1}" y1="{:.1}" x2="{cx:.1}" y2="{:.1}" stroke="black"/>"#,
            y(s.ci_high),
            y(s.ci_low)
        );
        let _ = writeln!(
            svg,
            r##"<rect x="{:.1}" y="{:.1}" width="{BOX_WIDTH:.1}" height="{:.1}" fill="#d3d3d3" stroke="black"/>"##,
            cx - half,
            y(s.q75),
            (y(s.q25) - y(s.q75)).max(1.0)
        );
        let _ = writeln!(
            svg,
            r#"<line x1="{:.1}" y1="{my:.1}" x2="{:.1}" y2="{my:.1}" stroke="black" stroke-width="2"/>"#,
            cx - half,
            cx + half,
            my = y(s.median)
        );
        let _ = writeln!(
            svg,
            r#"<text x="{cx:.1}" y="{:.1}" text-anchor="end" transform="rotate(-90 {cx:.1} {:.1})">{}</text>"#,
            bottom + 8.0,
            bottom + 8.0,
            escape(&rank.team.team_abbr)
        );
        let _ = writeln!(svg, "</g>");
    }

    svg.push_str("</svg>\n");
    svg
}

pub async fn write_chart(path: &Path, title: &str, ranks: &[TeamRank]) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, render_chart(title, ranks)).await?;
    info!("Wrote rank chart to {}", path.display());
    Ok(())
}
