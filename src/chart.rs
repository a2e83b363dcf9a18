//! Bar chart rendering with plotters.
//!
//! One chart per (metric, map) pair: bars drawn edge-to-edge in sorted
//! order, a shaded background band per agent-count (or congestion) block and
//! a thousands-separated y axis, mirroring what the experiment harness
//! reports look like.

use crate::aggregate::{congestion_pct, GroupKey};
use crate::record::RunRecord;
use crate::Result;
use itertools::Itertools;
use log::info;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

const CHART_SIZE: (u32, u32) = (1000, 500);
// Matplotlib default cycle colors, as used for the original report scripts.
const VARIANT_COLOR: RGBColor = RGBColor(31, 119, 180);
const BASELINE_COLOR: RGBColor = RGBColor(255, 127, 14);
const BAND_COLOR: RGBColor = RGBColor(211, 211, 211);

/// One contiguous block of bars sharing an agent count, with its centered
/// label text.
#[derive(Clone, Debug, PartialEq)]
pub struct Band {
    pub label: String,
    pub span: usize,
}

/// Bar values for one metric over sorted entries. Unsolved runs plot as zero
/// regardless of the stored metric value.
pub fn metric_values(entries: &[(&GroupKey, &RunRecord)], metric: &str) -> Result<Vec<i64>> {
    entries
        .iter()
        .map(|(_, record)| {
            if record.solved() {
                record.int(metric)
            } else {
                Ok(0)
            }
        })
        .collect()
}

/// Equal-size bands over `counts` (the per-bar agent counts in sorted
/// order), one per distinct count, labeled `n={count}`.
pub fn agent_bands(counts: &[i64]) -> Vec<Band> {
    let unique: Vec<i64> = counts.iter().copied().unique().collect();
    let span = if unique.is_empty() {
        0
    } else {
        counts.len() / unique.len()
    };
    unique
        .into_iter()
        .map(|n| Band {
            label: format!("n={n}"),
            span,
        })
        .collect()
}

/// Like [agent_bands], but labeled with the congestion percentage derived
/// from the map's open vertex count: `c={pct}% ({count})`.
pub fn congestion_bands(counts: &[i64], num_open_vertices: i64) -> Vec<Band> {
    let unique: Vec<i64> = counts.iter().copied().unique().collect();
    let span = if unique.is_empty() {
        0
    } else {
        counts.len() / unique.len()
    };
    unique
        .into_iter()
        .map(|n| Band {
            label: format!("c={:.0}% ({n})", congestion_pct(n, num_open_vertices)),
            span,
        })
        .collect()
}

/// Formats an integer with thousands separators: 1234567 -> "1,234,567".
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if n < 0 {
        format!("-{out}")
    } else {
        out
    }
}

/// Renders the overlay chart of the comparison report: the no-following
/// variant first, then the baseline at 70% alpha on top, with a legend.
pub fn render_comparison(
    path: &Path,
    map_name: &str,
    metric_label: &str,
    variant: &[i64],
    baseline: &[i64],
    bands: &[Band],
) -> Result<()> {
    draw(
        path,
        map_name,
        metric_label,
        bands,
        "n",
        &[
            Series {
                name: Some("No following (pLaCAM)"),
                values: variant,
                style: VARIANT_COLOR.filled(),
                legend_color: VARIANT_COLOR,
            },
            Series {
                name: Some("Baseline (LaCAM)"),
                values: baseline,
                style: BASELINE_COLOR.mix(0.7).filled(),
                legend_color: BASELINE_COLOR,
            },
        ],
    )
}

/// Renders the single-run chart of the congestion report.
pub fn render_single(
    path: &Path,
    map_name: &str,
    metric_label: &str,
    values: &[i64],
    bands: &[Band],
) -> Result<()> {
    draw(
        path,
        map_name,
        metric_label,
        bands,
        "c",
        &[Series {
            name: None,
            values,
            style: VARIANT_COLOR.mix(0.7).filled(),
            legend_color: VARIANT_COLOR,
        }],
    )
}

struct Series<'a> {
    name: Option<&'a str>,
    values: &'a [i64],
    style: ShapeStyle,
    legend_color: RGBColor,
}

fn draw(
    path: &Path,
    map_name: &str,
    metric_label: &str,
    bands: &[Band],
    band_unit: &str,
    series: &[Series<'_>],
) -> Result<()> {
    let n_bars = series.iter().map(|s| s.values.len()).max().unwrap_or(0);
    let max_val = series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .max()
        .unwrap_or(0);
    // 5% headroom above the tallest bar; a floor keeps all-zero maps
    // (nothing solved) renderable.
    let y_max = (max_val as f64 * 1.05).max(1.0);
    let instances_per_block = bands.first().map_or(0, |b| b.span);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Map: {map_name}"), ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..n_bars.max(1) as f64, 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(0)
        .x_desc(format!("{instances_per_block} instances per {band_unit}"))
        .y_desc(metric_label)
        .y_label_formatter(&|v| group_thousands(*v as i64))
        .draw()?;

    // Background bands go in before the bars so the bars stay on top.
    let mut start = 0usize;
    let label_font = ("sans-serif", 15)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    for band in bands {
        let end = start + band.span;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(start as f64, 0.0), (end as f64, y_max)],
            BAND_COLOR.mix(0.3).filled(),
        )))?;
        let center = (start + end) as f64 / 2.0;
        chart.draw_series(std::iter::once(Text::new(
            band.label.clone(),
            (center, y_max * 0.98),
            label_font.clone(),
        )))?;
        start = end;
    }

    for s in series {
        let bars = s.values.iter().enumerate().map(|(i, v)| {
            Rectangle::new([(i as f64, 0.0), ((i + 1) as f64, *v as f64)], s.style)
        });
        let drawn = chart.draw_series(bars)?;
        if let Some(name) = s.name {
            let color = s.legend_color;
            drawn.label(name).legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
            });
        }
    }

    if series.iter().any(|s| s.name.is_some()) {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::MiddleLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    info!("Saved {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{group_by_map, sorted_by_agents, MatchPolicy};
    use crate::record::normalize_rows;

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(-45000), "-45,000");
    }

    #[test]
    fn bands_partition_bars_into_equal_blocks() {
        let bands = agent_bands(&[10, 10, 20, 20]);
        assert_eq!(
            bands,
            vec![
                Band {
                    label: "n=10".into(),
                    span: 2
                },
                Band {
                    label: "n=20".into(),
                    span: 2
                },
            ]
        );
    }

    #[test]
    fn congestion_bands_carry_both_pct_and_count() {
        let bands = congestion_bands(&[10, 10, 20, 20], 200);
        assert_eq!(bands[0].label, "c=5% (10)");
        assert_eq!(bands[1].label, "c=10% (20)");
        assert_eq!(bands[0].span, 2);
    }

    #[test]
    fn unsolved_runs_plot_as_zero() {
        let header: Vec<String> = ["map_name", "scen", "num_agents", "solved", "soc"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let rows: Vec<Vec<String>> = vec![
            vec!["mapA".into(), "s1".into(), "10".into(), "1".into(), "42".into()],
            vec!["mapA".into(), "s2".into(), "10".into(), "0".into(), "99".into()],
        ];
        let records = normalize_rows(&header, &rows);
        let grouped =
            group_by_map(&records, &["mapA".to_string()], MatchPolicy::Substring).unwrap();
        let sorted = sorted_by_agents(&grouped["mapA"]);
        let values = metric_values(&sorted, "soc").unwrap();
        assert_eq!(values, vec![42, 0]);
    }
}
