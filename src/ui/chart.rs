//! Distance chart widget: line-and-point plot of distance per day.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::data::Stats;
use super::theme::Theme;

/// Number of tick labels on the distance axis (0 to max inclusive)
const Y_TICKS: usize = 5;

/// Most day labels that fit under the chart before sampling kicks in
const MAX_X_LABELS: usize = 12;

/// Plot geometry derived from the store contents.
///
/// Points are placed by position so consecutive entries are evenly spaced
/// no matter how far apart their days are; the x labels carry the days.
/// A lone point is centred between padded bounds, with blank labels either
/// side of its day so the axis has the two labels it needs to draw any.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub points: Vec<(f64, f64)>,
    pub x_min: f64,
    pub x_max: f64,
    pub y_max: f64,
    pub x_labels: Vec<String>,
    pub y_labels: Vec<String>,
}

impl ChartData {
    pub fn new(days: &[i64], distances: &[f64]) -> Self {
        let points: Vec<(f64, f64)> = distances
            .iter()
            .enumerate()
            .map(|(i, &d)| (i as f64, d))
            .collect();

        let max_distance = distances.iter().copied().fold(0.0, f64::max);
        let y_max = if max_distance > 0.0 { max_distance } else { 1.0 };

        let y_labels = (0..Y_TICKS)
            .map(|i| format!("{:.1}", y_max * i as f64 / (Y_TICKS - 1) as f64))
            .collect();

        let (x_min, x_max, x_labels) = match days {
            [day] => (-1.0, 1.0, vec![String::new(), day.to_string(), String::new()]),
            _ => (
                0.0,
                points.len().saturating_sub(1).max(1) as f64,
                day_labels(days),
            ),
        };

        ChartData {
            points,
            x_min,
            x_max,
            y_max,
            x_labels,
            y_labels,
        }
    }

    /// Whether a connecting line should be drawn (needs at least two points)
    pub fn has_line(&self) -> bool {
        self.points.len() > 1
    }
}

/// Day labels, sampled evenly when there are more than fit on the axis.
///
/// Labels are spaced evenly along the axis, so each sampled slot takes the
/// day of the nearest point.
fn day_labels(days: &[i64]) -> Vec<String> {
    let n = days.len();
    if n <= MAX_X_LABELS {
        return days.iter().map(|d| d.to_string()).collect();
    }
    let gaps = MAX_X_LABELS - 1;
    (0..MAX_X_LABELS)
        .map(|i| days[(i * (n - 1) + gaps / 2) / gaps].to_string())
        .collect()
}

/// Chart of distances over days with a summary line underneath
pub struct DistanceChart<'a> {
    days: &'a [i64],
    distances: &'a [f64],
    stats: &'a Stats,
    theme: &'a Theme,
}

impl<'a> DistanceChart<'a> {
    pub fn new(days: &'a [i64], distances: &'a [f64], stats: &'a Stats, theme: &'a Theme) -> Self {
        DistanceChart {
            days,
            distances,
            stats,
            theme,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let (border_style, title_style) = self.theme.panel_styles(focused);
        let block = Block::default()
            .title(" Distance per day (km) ")
            .borders(Borders::ALL)
            .border_style(border_style)
            .title_style(title_style);

        if self.distances.is_empty() {
            self.render_empty(frame, area, block);
            return;
        }

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Plot
                Constraint::Length(1), // Summary
            ])
            .split(inner);

        let data = ChartData::new(self.days, self.distances);

        let mut datasets = Vec::new();
        if data.has_line() {
            datasets.push(
                Dataset::default()
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(self.theme.chart_line))
                    .data(&data.points),
            );
        }
        datasets.push(
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(self.theme.chart_point))
                .data(&data.points),
        );

        let x_labels: Vec<Span> = data.x_labels.iter().map(|l| Span::raw(l.clone())).collect();
        let y_labels: Vec<Span> = data.y_labels.iter().map(|l| Span::raw(l.clone())).collect();

        let chart = Chart::new(datasets)
            .x_axis(
                Axis::default()
                    .style(self.theme.normal_style())
                    .bounds([data.x_min, data.x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .style(self.theme.normal_style())
                    .bounds([0.0, data.y_max])
                    .labels(y_labels),
            );
        frame.render_widget(chart, chunks[0]);

        let summary = Paragraph::new(self.stats.summary_line())
            .style(self.theme.title_style())
            .alignment(Alignment::Left);
        frame.render_widget(summary, chunks[1]);
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect, block: Block) {
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let message = Paragraph::new("No data")
            .style(Style::default().add_modifier(Modifier::DIM))
            .alignment(Alignment::Center);

        frame.render_widget(message, inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::compute_stats;
    use ratatui::{backend::TestBackend, symbols, Terminal};

    fn rendered_text(days: &[i64], distances: &[f64], width: u16, height: u16) -> String {
        let theme = Theme::default();
        let stats = compute_stats(distances);
        let chart = DistanceChart::new(days, distances, &stats, &theme);

        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| chart.render(f, f.area(), false))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_y_labels_span_zero_to_max() {
        let data = ChartData::new(&[1, 2, 3], &[2.0, 8.0, 4.0]);
        assert_eq!(data.y_max, 8.0);
        assert_eq!(data.y_labels, vec!["0.0", "2.0", "4.0", "6.0", "8.0"]);
        assert_eq!(data.x_labels, vec!["1", "2", "3"]);
        assert_eq!(data.x_max, 2.0);
        assert!(data.has_line());
    }

    #[test]
    fn test_all_zero_distances_use_unit_scale() {
        let data = ChartData::new(&[1, 2], &[0.0, 0.0]);
        assert_eq!(data.y_max, 1.0);
        assert_eq!(data.y_labels.len(), 5);
        assert_eq!(data.y_labels[4], "1.0");
    }

    #[test]
    fn test_single_entry_has_no_line() {
        let data = ChartData::new(&[7], &[3.5]);
        assert_eq!(data.points, vec![(0.0, 3.5)]);
        assert_eq!((data.x_min, data.x_max), (-1.0, 1.0));
        assert_eq!(data.x_labels, vec!["", "7", ""]);
        assert!(!data.has_line());
    }

    #[test]
    fn test_sampled_labels_take_nearest_day() {
        let days: Vec<i64> = (1..=24).collect();
        let data = ChartData::new(&days, &vec![1.0; 24]);
        // Slot 6 sits at position 12.55 of 0..23, nearest point is index 13
        assert_eq!(data.x_labels[6], "14");
        assert_eq!(data.x_labels[11], "24");
    }

    #[test]
    fn test_many_days_are_sampled() {
        let days: Vec<i64> = (1..=100).collect();
        let distances = vec![1.0; 100];
        let data = ChartData::new(&days, &distances);
        assert_eq!(data.x_labels.len(), MAX_X_LABELS);
        assert_eq!(data.x_labels.first().map(String::as_str), Some("1"));
        assert_eq!(data.x_labels.last().map(String::as_str), Some("100"));
    }

    #[test]
    fn test_empty_renders_placeholder() {
        let text = rendered_text(&[], &[], 40, 8);
        assert!(text.contains("No data"));
    }

    #[test]
    fn test_renders_summary_line() {
        let text = rendered_text(&[1, 2, 3, 4], &[1.0, 2.0, 3.0, 4.0], 100, 20);
        assert!(text.contains("Total: 10.00 km"));
        assert!(text.contains("Stdev: 1.29"));
    }

    fn point_count(text: &str) -> usize {
        text.matches(symbols::DOT).count()
    }

    #[test]
    fn test_single_entry_draws_point_and_day_label() {
        let text = rendered_text(&[42], &[3.5], 80, 16);
        assert_eq!(point_count(&text), 1, "single point should be drawn");
        assert!(text.contains("42"), "day label 42 missing");
        assert!(text.contains("Median: 3.50 km"));
    }

    #[test]
    fn test_largest_first_point_is_visible() {
        let text = rendered_text(&[1, 2, 3], &[9.0, 2.0, 4.0], 80, 16);
        assert_eq!(point_count(&text), 3);

        let text = rendered_text(&[42, 43], &[5.0, 1.0], 80, 16);
        assert_eq!(point_count(&text), 2);
        assert!(text.contains("42") && text.contains("43"));
    }
}
