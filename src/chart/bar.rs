//! Vertical bar chart rendering, shared by histograms and frequency charts.

use super::svg::{Anchor, SvgDocument};
use super::ChartConfig;

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 110.0;
/// The bottom margin never takes more than this share of the image height.
const MAX_BOTTOM_SHARE: f64 = 0.5;
/// Gap between the x axis and the start of a rotated label.
const LABEL_OFFSET: f64 = 14.0;
/// Vertical drop per character of a label rotated by 45 degrees.
const LABEL_CHAR_DROP: f64 = 4.5;
/// Room below the labels for the x axis title.
const AXIS_TITLE_ROOM: f64 = 30.0;
const Y_TICKS: usize = 5;
const MAX_X_LABELS: usize = 12;

/// A labelled bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: usize,
}

impl Bar {
    pub fn new(label: impl Into<String>, value: usize) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
    /// Draw bars edge to edge, as a histogram.
    pub contiguous: bool,
    /// Print each bar's value above it.
    pub annotate: bool,
}

impl BarChart {
    pub fn new(title: &str, x_label: &str, y_label: &str, bars: Vec<Bar>) -> Self {
        Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            bars,
            contiguous: false,
            annotate: true,
        }
    }

    /// Histogram styling: no gaps, no per-bar values.
    pub fn contiguous(mut self) -> Self {
        self.contiguous = true;
        self.annotate = false;
        self
    }

    /// Render to an SVG document string.
    pub fn render(&self, config: &ChartConfig) -> String {
        let mut doc = SvgDocument::new(config.width, config.height);
        doc.title(&self.title);

        let height = doc.height();
        let (margin_bottom, label_chars) = self.label_layout(height);
        let plot_w = (doc.width() - MARGIN_LEFT - MARGIN_RIGHT).max(1.0);
        let plot_h = (height - MARGIN_TOP - margin_bottom).max(1.0);
        let x0 = MARGIN_LEFT;
        let y0 = MARGIN_TOP + plot_h;

        // Axis titles
        doc.text(
            x0 + plot_w / 2.0,
            height - 15.0,
            12,
            Anchor::Middle,
            &self.x_label,
        );
        doc.rotated_text(
            20.0,
            MARGIN_TOP + plot_h / 2.0,
            12,
            Anchor::Middle,
            -90.0,
            &self.y_label,
        );

        if self.bars.is_empty() {
            doc.text(
                x0 + plot_w / 2.0,
                MARGIN_TOP + plot_h / 2.0,
                14,
                Anchor::Middle,
                "No data",
            );
            draw_axes(&mut doc, x0, y0, plot_w, plot_h);
            return doc.finish();
        }

        let max_value = self.bars.iter().map(|b| b.value).max().unwrap_or(0);
        let step = tick_step(max_value);
        let y_max = (step * Y_TICKS) as f64;

        // Grid and y tick labels
        for i in 0..=Y_TICKS {
            let value = step * i;
            let y = y0 - (value as f64 / y_max) * plot_h;
            if i > 0 {
                doc.line(x0, y, x0 + plot_w, y, "#e0e0e0");
            }
            doc.text(x0 - 8.0, y + 4.0, 11, Anchor::End, &value.to_string());
        }

        let slot = plot_w / self.bars.len() as f64;
        let (bar_w, pad) = if self.contiguous {
            (slot, 0.0)
        } else {
            (slot * 0.7, slot * 0.15)
        };
        let label_every = self.bars.len().div_ceil(MAX_X_LABELS).max(1);

        for (i, bar) in self.bars.iter().enumerate() {
            let x = x0 + slot * i as f64 + pad;
            let h = (bar.value as f64 / y_max) * plot_h;
            doc.rect(x, y0 - h, bar_w, h, &config.color);

            if self.annotate {
                doc.text(
                    x + bar_w / 2.0,
                    y0 - h - 4.0,
                    10,
                    Anchor::Middle,
                    &bar.value.to_string(),
                );
            }

            if i % label_every == 0 {
                let lx = if self.contiguous { x } else { x + bar_w / 2.0 };
                doc.rotated_text(
                    lx,
                    y0 + LABEL_OFFSET,
                    10,
                    Anchor::End,
                    -45.0,
                    &truncate(&bar.label, label_chars),
                );
            }
        }

        draw_axes(&mut doc, x0, y0, plot_w, plot_h);
        doc.finish()
    }

    /// Bottom margin tall enough for the longest x label, and the number of
    /// label characters that fit in it.
    fn label_layout(&self, height: f64) -> (f64, usize) {
        let longest = self
            .bars
            .iter()
            .map(|b| b.label.chars().count())
            .max()
            .unwrap_or(0);

        let needed = LABEL_OFFSET + longest as f64 * LABEL_CHAR_DROP + AXIS_TITLE_ROOM;
        let ceiling = (height * MAX_BOTTOM_SHARE).max(MARGIN_BOTTOM);
        let margin = needed.clamp(MARGIN_BOTTOM, ceiling);
        let fits = ((margin - LABEL_OFFSET - AXIS_TITLE_ROOM) / LABEL_CHAR_DROP) as usize;

        (margin, fits.max(1))
    }
}

fn draw_axes(doc: &mut SvgDocument, x0: f64, y0: f64, plot_w: f64, plot_h: f64) {
    doc.line(x0, y0, x0 + plot_w, y0, "#333333");
    doc.line(x0, y0, x0, y0 - plot_h, "#333333");
}

/// Integer tick step so that `Y_TICKS` steps cover `max_value`.
fn tick_step(max_value: usize) -> usize {
    max_value.div_ceil(Y_TICKS).max(1)
}

/// Shorten long labels with a trailing ellipsis.
fn truncate(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let mut out: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_step() {
        assert_eq!(tick_step(0), 1);
        assert_eq!(tick_step(3), 1);
        assert_eq!(tick_step(5), 1);
        assert_eq!(tick_step(6), 2);
        assert_eq!(tick_step(100), 20);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a_very_long_function_name", 10), "a_very_lo…");
    }

    #[test]
    fn test_render_bars() {
        let chart = BarChart::new(
            "Top Functions",
            "Function",
            "Count",
            vec![Bar::new("__call__", 2), Bar::new("fit", 1)],
        );
        let svg = chart.render(&ChartConfig::default());

        assert!(svg.contains("Top Functions"));
        assert!(svg.contains("__call__"));
        assert!(!svg.contains("No data"));
        // Background plus one rect per bar
        assert_eq!(svg.matches("<rect").count(), 3);
    }

    #[test]
    fn test_long_labels_drawn_in_full() {
        let name = "validate_username_against_ascii_pattern";
        let chart = BarChart::new(
            "Top Functions",
            "Function",
            "Count",
            vec![Bar::new(name, 3), Bar::new("fit", 1)],
        );
        let svg = chart.render(&ChartConfig::default());

        assert!(svg.contains(&format!(">{}</text>", name)));
        assert!(!svg.contains('…'));
    }

    #[test]
    fn test_label_layout() {
        let short = BarChart::new("t", "x", "y", vec![Bar::new("py", 1)]);
        assert_eq!(short.label_layout(500.0).0, MARGIN_BOTTOM);

        // Capped at half the height; longer labels are shortened to fit
        let long = BarChart::new("t", "x", "y", vec![Bar::new("f".repeat(200), 1)]);
        let (margin, fits) = long.label_layout(500.0);
        assert_eq!(margin, 250.0);
        assert_eq!(fits, 45);

        let svg = long.render(&ChartConfig::default());
        assert!(svg.contains(&format!(">{}…</text>", "f".repeat(44))));
    }

    #[test]
    fn test_render_empty_chart() {
        let chart = BarChart::new("Empty", "x", "y", Vec::new()).contiguous();
        let svg = chart.render(&ChartConfig::default());
        assert!(svg.contains("No data"));
        assert!(svg.contains("</svg>"));
    }
}
