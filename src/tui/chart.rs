//! Bar charts with min/max error bars and confidence-interval whiskers.

#![allow(clippy::missing_errors_doc)]

use crate::dns::{BenchReport, ResolverReport};
use crate::error::Result;
use crate::stats::Summary;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Context, Line},
        Block, BorderType, Borders, Paragraph,
    },
    Frame,
};

/// Half-width of the confidence-interval whisker caps, in bar units.
pub const CI_CAP: f64 = 0.2;

/// Half-width of the min/max error-bar caps, in bar units.
pub const ERROR_CAP: f64 = 0.1;

/// Half-width of a bar, in bar units.
const BAR_HALF_WIDTH: f64 = 0.4;

/// Headroom above the tallest element.
const Y_HEADROOM: f64 = 1.1;

/// One bar of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Axis label
    pub label: String,
    /// Bar height (mean latency)
    pub mean: f64,
    /// Error bar extent `(min, max)`, if drawn
    pub range: Option<(f64, f64)>,
    /// Confidence interval `(low, high)`
    pub ci: (f64, f64),
}

impl Bar {
    fn from_summary(label: impl Into<String>, summary: &Summary, with_range: bool) -> Self {
        Self {
            label: label.into(),
            mean: summary.mean,
            range: with_range.then_some((summary.min, summary.max)),
            ci: (summary.ci.low, summary.ci.high),
        }
    }
}

/// What a line segment represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Part of a min/max error bar
    Range,
    /// Part of a confidence-interval whisker
    Interval,
}

/// A straight line in chart coordinates (x in bar units, y in ms).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start x
    pub x1: f64,
    /// Start y
    pub y1: f64,
    /// End x
    pub x2: f64,
    /// End y
    pub y2: f64,
    /// Which whisker this line belongs to
    pub kind: SegmentKind,
}

impl Segment {
    fn vertical(x: f64, low: f64, high: f64, kind: SegmentKind) -> Self {
        Self {
            x1: x,
            y1: low,
            x2: x,
            y2: high,
            kind,
        }
    }

    fn cap(x: f64, y: f64, half_width: f64, kind: SegmentKind) -> Self {
        Self {
            x1: x - half_width,
            y1: y,
            x2: x + half_width,
            y2: y,
            kind,
        }
    }
}

/// Geometry of one chart, independent of the terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    /// Chart title
    pub title: String,
    /// X axis caption
    pub x_label: String,
    /// Bars in display order
    pub bars: Vec<Bar>,
    /// Bar fill color
    pub color: Color,
}

impl ChartModel {
    /// One bar per resolver that has a resolver-level statistic.
    #[must_use]
    pub fn overall(report: &BenchReport) -> Self {
        let bars = report
            .resolvers
            .iter()
            .filter_map(|r| {
                r.stat()
                    .map(|s| Bar::from_summary(r.server.label(), &s.summary, true))
            })
            .collect();

        Self {
            title: "Overall Average DNS Resolution Times with 95% Confidence Interval".into(),
            x_label: "DNS Providers".into(),
            bars,
            color: Color::LightBlue,
        }
    }

    /// One bar per successful domain of a single resolver.
    #[must_use]
    pub fn for_resolver(report: &ResolverReport) -> Self {
        let bars = report
            .domains
            .iter()
            .map(|d| Bar::from_summary(d.domain.clone(), &d.summary, false))
            .collect();

        Self {
            title: format!(
                "Average DNS Resolution Times for {} with 95% Confidence Interval",
                report.server
            ),
            x_label: "Domains".into(),
            bars,
            color: Color::LightGreen,
        }
    }

    /// Upper bound of the y axis.
    #[must_use]
    pub fn y_max(&self) -> f64 {
        let top = self
            .bars
            .iter()
            .map(|b| {
                let range_top = b.range.map_or(b.mean, |(_, max)| max);
                b.mean.max(range_top).max(b.ci.1)
            })
            .fold(0.0, f64::max);

        if top > 0.0 {
            top * Y_HEADROOM
        } else {
            1.0
        }
    }

    /// Error-bar and whisker segments, error bars first.
    ///
    /// Bar `i` is centered on `x = i`.
    #[must_use]
    pub fn segments(&self) -> Vec<Segment> {
        let mut segments = Vec::new();

        for (i, bar) in self.bars.iter().enumerate() {
            let x = i as f64;
            if let Some((min, max)) = bar.range {
                segments.push(Segment::vertical(x, min, max, SegmentKind::Range));
                segments.push(Segment::cap(x, min, ERROR_CAP, SegmentKind::Range));
                segments.push(Segment::cap(x, max, ERROR_CAP, SegmentKind::Range));
            }
        }

        for (i, bar) in self.bars.iter().enumerate() {
            let x = i as f64;
            let (low, high) = bar.ci;
            segments.push(Segment::cap(x, low, CI_CAP, SegmentKind::Interval));
            segments.push(Segment::cap(x, high, CI_CAP, SegmentKind::Interval));
            segments.push(Segment::vertical(x, low, high, SegmentKind::Interval));
        }

        segments
    }

    /// Whether there is anything to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Build the charts for a finished run: the overall chart, then one per
/// resolver when `verbose`.
#[must_use]
pub fn charts_for(report: &BenchReport, verbose: bool) -> Vec<ChartModel> {
    let mut charts = vec![ChartModel::overall(report)];
    if verbose {
        charts.extend(report.resolvers.iter().map(ChartModel::for_resolver));
    }
    charts.retain(|c| !c.is_empty());
    charts
}

/// Show each chart full-screen until a key is pressed.
///
/// `q`, `Esc`, `Enter`, `Space` and `→` advance to the next chart;
/// `Ctrl-C` skips the rest.
pub fn show(charts: &[ChartModel]) -> Result<()> {
    if charts.is_empty() {
        return Ok(());
    }

    let mut terminal = ratatui::init();
    let res = view_loop(&mut terminal, charts);
    ratatui::restore();
    res
}

fn view_loop(terminal: &mut ratatui::DefaultTerminal, charts: &[ChartModel]) -> Result<()> {
    let total = charts.len();

    for (idx, chart) in charts.iter().enumerate() {
        loop {
            terminal.draw(|f| draw(f, chart, idx, total))?;

            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(());
                }
                KeyCode::Char('q' | ' ') | KeyCode::Esc | KeyCode::Enter | KeyCode::Right => {
                    break;
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Render one chart into the whole frame.
pub fn draw(f: &mut Frame, chart: &ChartModel, idx: usize, total: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(1)])
        .split(f.area());

    draw_canvas(f, chart, chunks[0]);

    let footer = Paragraph::new(format!(
        "Chart {}/{}  |  bar: mean  white: min/max  red: 95% CI  |  [Enter] next  [Ctrl-C] quit",
        idx + 1,
        total
    ))
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, chunks[1]);
}

fn draw_canvas(f: &mut Frame, chart: &ChartModel, area: Rect) {
    let n = chart.bars.len().max(1) as f64;
    let y_max = chart.y_max();
    let y_min = -y_max * 0.08;
    let x_bounds = [-1.0, n - 0.5];

    // Braille cells hold two dots horizontally.
    let inner_width = f64::from(area.width.saturating_sub(2).max(1));
    let fill_step = (x_bounds[1] - x_bounds[0]) / (inner_width * 2.0);
    let label_chars = ((inner_width / (n + 0.5)) as usize).saturating_sub(1).max(1);

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(Span::styled(
                    format!(" {} ", chart.title),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ))
                .title_bottom(format!(" {} / Average Resolution Time (ms) ", chart.x_label)),
        )
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds([y_min, y_max])
        .paint(move |ctx| {
            for (i, bar) in chart.bars.iter().enumerate() {
                fill_bar(ctx, i as f64, bar.mean, fill_step, chart.color);
            }
            ctx.layer();

            for seg in chart.segments() {
                let color = match seg.kind {
                    SegmentKind::Range => Color::White,
                    SegmentKind::Interval => Color::Red,
                };
                ctx.draw(&Line::new(seg.x1, seg.y1, seg.x2, seg.y2, color));
            }

            for tick in [0.0, y_max / 2.0, y_max / Y_HEADROOM] {
                ctx.print(-1.0, tick, format!("{tick:.0}"));
            }
            for (i, bar) in chart.bars.iter().enumerate() {
                let label: String = bar.label.chars().take(label_chars).collect();
                ctx.print(i as f64 - BAR_HALF_WIDTH, y_min / 2.0, label);
            }
        });

    f.render_widget(canvas, area);
}

fn fill_bar(ctx: &mut Context<'_>, x: f64, height: f64, step: f64, color: Color) {
    if step <= 0.0 {
        return;
    }
    let mut left = x - BAR_HALF_WIDTH;
    while left <= x + BAR_HALF_WIDTH {
        ctx.draw(&Line::new(left, 0.0, left, height, color));
        left += step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::{DnsServer, DomainStat, ResolverStat};
    use crate::stats::StatsError;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn summary(samples: &[f64]) -> Summary {
        Summary::from_samples(samples).unwrap()
    }

    fn resolver(ip: &str, domain_means: &[(&str, &[f64])]) -> ResolverReport {
        let domains: Vec<DomainStat> = domain_means
            .iter()
            .map(|(d, s)| DomainStat {
                domain: (*d).to_string(),
                summary: summary(s),
            })
            .collect();
        let means: Vec<f64> = domains.iter().map(|d| d.summary.mean).collect();
        ResolverReport {
            server: DnsServer::new(ip, ip),
            overall: Summary::from_samples(&means).map(|summary| ResolverStat { summary }),
            domains,
            failures: vec![],
        }
    }

    fn bench() -> BenchReport {
        BenchReport::new(
            3,
            vec![
                resolver(
                    "1.1.1.1",
                    &[
                        ("a.example", &[10.0, 12.0, 14.0][..]),
                        ("b.example", &[20.0, 22.0, 24.0][..]),
                    ],
                ),
                resolver("8.8.8.8", &[("a.example", &[30.0, 31.0, 32.0][..])]),
            ],
        )
    }

    #[test]
    fn test_overall_skips_resolvers_without_stat() {
        let report = bench();
        assert_eq!(
            report.resolvers[1].overall,
            Err(StatsError::InsufficientSamples { n: 1 })
        );

        let chart = ChartModel::overall(&report);
        assert_eq!(chart.bars.len(), 1);
        assert_eq!(chart.bars[0].label, "DNS 1.1.1.1");
        assert_eq!(chart.bars[0].mean, 17.0);
        assert_eq!(chart.bars[0].range, Some((12.0, 22.0)));
    }

    #[test]
    fn test_resolver_chart_has_no_range_bars() {
        let report = bench();
        let chart = ChartModel::for_resolver(&report.resolvers[0]);
        assert_eq!(chart.bars.len(), 2);
        assert!(chart.bars.iter().all(|b| b.range.is_none()));
        assert!(chart
            .segments()
            .iter()
            .all(|s| s.kind == SegmentKind::Interval));
    }

    #[test]
    fn test_whisker_geometry() {
        let chart = ChartModel {
            title: "t".into(),
            x_label: "x".into(),
            bars: vec![
                Bar {
                    label: "a".into(),
                    mean: 10.0,
                    range: Some((5.0, 20.0)),
                    ci: (8.0, 12.0),
                },
                Bar {
                    label: "b".into(),
                    mean: 15.0,
                    range: Some((11.0, 19.0)),
                    ci: (14.0, 16.0),
                },
            ],
            color: Color::LightBlue,
        };

        let segments = chart.segments();
        assert_eq!(segments.len(), 12);

        let whiskers: Vec<_> = segments
            .iter()
            .filter(|s| s.kind == SegmentKind::Interval)
            .collect();
        assert_eq!(whiskers.len(), 6);

        // Second bar: caps at x = 1 +- 0.2, vertical from low to high.
        let second = &whiskers[3..];
        assert_eq!((second[0].x1, second[0].x2), (1.0 - CI_CAP, 1.0 + CI_CAP));
        assert_eq!((second[0].y1, second[0].y2), (14.0, 14.0));
        assert_eq!((second[1].y1, second[1].y2), (16.0, 16.0));
        assert_eq!((second[2].x1, second[2].x2), (1.0, 1.0));
        assert_eq!((second[2].y1, second[2].y2), (14.0, 16.0));

        assert!((chart.y_max() - 20.0 * Y_HEADROOM).abs() < 1e-9);
    }

    #[test]
    fn test_charts_for_verbosity() {
        let report = bench();
        assert_eq!(charts_for(&report, false).len(), 1);
        // Overall plus one per resolver.
        assert_eq!(charts_for(&report, true).len(), 3);
    }

    #[test]
    fn test_draw_renders_title() {
        let chart = ChartModel::overall(&bench());
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| draw(f, &chart, 0, 1)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Overall Average DNS Resolution Times"));
        assert!(text.contains("Chart 1/1"));
    }
}
