//! Dual-axis session chart
//!
//! One x position per session. Interaction count is plotted against the left
//! axis and unique participants against the right axis, each with its own
//! padded range.

use std::fmt;

use crate::api::SessionAnalytics;

/// Vertical extent of one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    /// Fit a range around `values`, padded by 10% of the spread (or 1.0 when
    /// flat). Non-negative data never gets a negative lower bound.
    pub fn fit(values: &[f64]) -> Self {
        let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if !min.is_finite() || !max.is_finite() {
            return Self { min: 0.0, max: 1.0 };
        }

        let non_negative = min >= 0.0;
        let spread = max - min;
        let padding = if spread > 0.0 { spread * 0.1 } else { 1.0 };
        min -= padding;
        max += padding;

        if non_negative && min < 0.0 {
            min = 0.0;
        }

        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Position of `value` in `0.0..=1.0`, measured from the bottom
    pub fn normalize(&self, value: f64) -> f64 {
        if self.span() <= 0.0 {
            return 0.5;
        }
        ((value - self.min) / self.span()).clamp(0.0, 1.0)
    }

    /// Evenly spaced tick values from max down to min
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        if count == 0 {
            return Vec::new();
        }
        (0..=count)
            .map(|i| self.max - (i as f64 / count as f64) * self.span())
            .collect()
    }
}

/// One plotted line
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: &'static str,
    pub values: Vec<f64>,
    pub range: AxisRange,
}

impl Series {
    fn new(name: &'static str, values: Vec<f64>) -> Self {
        let range = AxisRange::fit(&values);
        Self {
            name,
            values,
            range,
        }
    }
}

/// Chart model for the analytics sessions
#[derive(Debug, Clone, PartialEq)]
pub struct DualAxisChart {
    pub labels: Vec<String>,
    pub left: Series,
    pub right: Series,
}

impl DualAxisChart {
    /// Build the chart; `None` when there are no sessions to plot
    pub fn from_sessions(sessions: &[SessionAnalytics]) -> Option<Self> {
        if sessions.is_empty() {
            return None;
        }

        Some(Self {
            labels: sessions.iter().map(|s| s.name.clone()).collect(),
            left: Series::new(
                "Interaction Count",
                sessions.iter().map(|s| s.interaction_count as f64).collect(),
            ),
            right: Series::new(
                "Unique Participants",
                sessions.iter().map(|s| s.unique_participants as f64).collect(),
            ),
        })
    }
}

const BAR_WIDTH: usize = 20;

fn bar(fraction: f64) -> String {
    let filled = (fraction * BAR_WIDTH as f64).round() as usize;
    format!("{:<width$}", "#".repeat(filled), width = BAR_WIDTH)
}

/// Terminal rendering: one row per session, a bar per axis
impl fmt::Display for DualAxisChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_width = self.labels.iter().map(|l| l.len()).max().unwrap_or(0).max(7);

        writeln!(
            f,
            "{:<lw$}  {:<bw$} {:>8}  {:<bw$} {:>8}",
            "Session",
            self.left.name,
            "",
            self.right.name,
            "",
            lw = label_width,
            bw = BAR_WIDTH
        )?;
        writeln!(f, "{}", "-".repeat(label_width + 2 * (BAR_WIDTH + 11)))?;

        for (i, label) in self.labels.iter().enumerate() {
            let left = self.left.values[i];
            let right = self.right.values[i];
            writeln!(
                f,
                "{:<lw$}  {} {:>8}  {} {:>8}",
                label,
                bar(self.left.range.normalize(left)),
                left,
                bar(self.right.range.normalize(right)),
                right,
                lw = label_width
            )?;
        }

        write!(
            f,
            "Left axis {:.1}..{:.1}, right axis {:.1}..{:.1}",
            self.left.range.min, self.left.range.max, self.right.range.min, self.right.range.max
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(name: &str, interactions: u64, unique: u64) -> SessionAnalytics {
        SessionAnalytics {
            id: name.to_lowercase(),
            name: name.to_string(),
            interaction_count: interactions,
            unique_participants: unique,
            average_sentiment: 0.5,
        }
    }

    #[test]
    fn test_range_padding() {
        let range = AxisRange::fit(&[10.0, 60.0]);
        assert_eq!(range, AxisRange { min: 5.0, max: 65.0 });

        let flat = AxisRange::fit(&[4.0, 4.0]);
        assert_eq!(flat, AxisRange { min: 3.0, max: 5.0 });
    }

    #[test]
    fn test_non_negative_data_keeps_zero_floor() {
        let range = AxisRange::fit(&[0.0, 5.0]);
        assert_eq!(range.min, 0.0);
        assert_eq!(range.max, 5.5);

        let negative = AxisRange::fit(&[-10.0, 10.0]);
        assert_eq!(negative.min, -12.0);
    }

    #[test]
    fn test_empty_range_and_normalize() {
        let range = AxisRange::fit(&[]);
        assert_eq!(range, AxisRange { min: 0.0, max: 1.0 });
        assert_eq!(range.normalize(0.5), 0.5);
        assert_eq!(range.normalize(9.0), 1.0);
        assert_eq!(range.ticks(2), vec![1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_axes_are_independent() {
        let sessions = vec![session("Keynote", 400, 12), session("Panel", 100, 30)];
        let chart = DualAxisChart::from_sessions(&sessions).unwrap();

        assert_eq!(chart.labels, vec!["Keynote", "Panel"]);
        assert_eq!(chart.left.values, vec![400.0, 100.0]);
        assert_eq!(chart.right.values, vec![12.0, 30.0]);
        assert_eq!(chart.left.range, AxisRange { min: 70.0, max: 430.0 });
        assert!((chart.right.range.min - 10.2).abs() < 1e-9);
        assert!((chart.right.range.max - 31.8).abs() < 1e-9);
    }

    #[test]
    fn test_no_sessions_no_chart() {
        assert!(DualAxisChart::from_sessions(&[]).is_none());
    }

    #[test]
    fn test_text_render_lists_every_session() {
        let chart =
            DualAxisChart::from_sessions(&[session("Keynote", 400, 12), session("Panel", 100, 30)])
                .unwrap();
        let text = chart.to_string();
        assert!(text.contains("Interaction Count"));
        assert!(text.contains("Keynote"));
        assert!(text.contains("Panel"));
        assert_eq!(text.lines().count(), 5);
    }
}
