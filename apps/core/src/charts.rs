//! Chart view models: series, slices and bars built from payloads.

use crate::format::format_currency;
use crate::payload::{CategoryBreakdown, RegionBreakdown, TimeSeriesPayload};
use crate::region::RegionSelector;
use serde::Serialize;

/// An sRGB colour, independent of any rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

pub const REVENUE_COLOR: Rgb = Rgb(54, 162, 235);
pub const PROFIT_COLOR: Rgb = Rgb(75, 192, 192);

/// Slice colours, reused in order when there are more than six categories.
pub const CATEGORY_PALETTE: [Rgb; 6] = [
    Rgb(255, 99, 132),
    Rgb(54, 162, 235),
    Rgb(255, 206, 86),
    Rgb(75, 192, 192),
    Rgb(153, 102, 255),
    Rgb(255, 159, 64),
];

/// Revenue and profit over time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueChart {
    pub labels: Vec<String>,
    pub revenue: Vec<f64>,
    pub profit: Vec<f64>,
}

impl RevenueChart {
    pub fn build(data: &TimeSeriesPayload) -> Self {
        let mut chart = Self {
            labels: Vec::new(),
            revenue: Vec::new(),
            profit: Vec::new(),
        };
        for (date, revenue, profit) in data.points() {
            chart.labels.push(date.to_string());
            chart.revenue.push(revenue);
            chart.profit.push(profit);
        }
        chart
    }

    /// `(x, y)` pairs with the point index as `x`.
    pub fn revenue_points(&self) -> Vec<(f64, f64)> {
        indexed(&self.revenue)
    }

    pub fn profit_points(&self) -> Vec<(f64, f64)> {
        indexed(&self.profit)
    }

    /// Upper bound for the value axis; the axis always starts at zero.
    pub fn y_max(&self) -> f64 {
        self.revenue
            .iter()
            .chain(&self.profit)
            .copied()
            .fold(0.0, f64::max)
    }

    pub fn tooltip(&self, index: usize) -> Option<[String; 2]> {
        Some([
            format!("Revenue: {}", format_currency(*self.revenue.get(index)?)),
            format!("Profit: {}", format_currency(*self.profit.get(index)?)),
        ])
    }
}

fn indexed(values: &[f64]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| (index as f64, *value))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub value: f64,
    pub percentage: i64,
    pub color: Rgb,
}

impl Slice {
    pub fn tooltip(&self) -> String {
        format!(
            "{}: {} ({}%)",
            self.label,
            format_currency(self.value),
            self.percentage
        )
    }
}

/// Revenue share per category, drawn as a donut.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryChart {
    pub slices: Vec<Slice>,
}

impl CategoryChart {
    pub fn build(data: &CategoryBreakdown) -> Self {
        let total: f64 = data.records().map(|(_, value)| value).sum();
        let slices = data
            .records()
            .enumerate()
            .map(|(index, (label, value))| Slice {
                label: label.to_string(),
                value,
                percentage: slice_percentage(value, total),
                color: CATEGORY_PALETTE[index % CATEGORY_PALETTE.len()],
            })
            .collect();
        Self { slices }
    }

    pub fn total(&self) -> f64 {
        self.slices.iter().map(|slice| slice.value).sum()
    }
}

/// `round(100 * value / total)`; independent rounding means a chart's
/// percentages need not add up to exactly 100.
#[allow(clippy::cast_possible_truncation)]
pub fn slice_percentage(value: f64, total: f64) -> i64 {
    if total == 0.0 || !total.is_finite() {
        return 0;
    }
    (value / total * 100.0).round() as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarFill {
    Default,
    Highlight,
}

impl BarFill {
    pub const fn color(self) -> Rgb {
        match self {
            Self::Default => Rgb(54, 162, 235),
            Self::Highlight => Rgb(255, 215, 0),
        }
    }
}

pub fn bar_fill(region: &str, selected: &RegionSelector) -> BarFill {
    if selected.selects(region) {
        BarFill::Highlight
    } else {
        BarFill::Default
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionBar {
    pub region: String,
    pub revenue: f64,
    pub fill: BarFill,
}

impl RegionBar {
    pub fn tooltip(&self) -> String {
        format!("Revenue: {}", format_currency(self.revenue))
    }
}

/// Horizontal revenue bars, one per region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionChart {
    pub bars: Vec<RegionBar>,
}

impl RegionChart {
    pub fn build(data: &RegionBreakdown, selected: &RegionSelector) -> Self {
        let bars = data
            .records()
            .map(|(region, revenue)| RegionBar {
                region: region.to_string(),
                revenue,
                fill: bar_fill(region, selected),
            })
            .collect();
        Self { bars }
    }

    pub fn max_revenue(&self) -> f64 {
        self.bars.iter().map(|bar| bar.revenue).fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions() -> RegionBreakdown {
        RegionBreakdown {
            regions: vec!["West".into(), "South".into(), "Texas".into()],
            revenue: vec![300.0, 200.0, 100.0],
        }
    }

    #[test]
    fn selected_region_is_highlighted() {
        let chart = RegionChart::build(&regions(), &RegionSelector::parse("Texas"));
        let fills: Vec<_> = chart.bars.iter().map(|bar| bar.fill).collect();
        assert_eq!(
            fills,
            vec![BarFill::Default, BarFill::Default, BarFill::Highlight]
        );
    }

    #[test]
    fn all_selection_highlights_nothing() {
        let chart = RegionChart::build(&regions(), &RegionSelector::All);
        assert!(chart.bars.iter().all(|bar| bar.fill == BarFill::Default));

        let lowercase = RegionChart::build(&regions(), &RegionSelector::parse("texas"));
        assert!(lowercase.bars.iter().all(|bar| bar.fill == BarFill::Default));
    }

    #[test]
    fn slice_percentages_round_independently() {
        let data = CategoryBreakdown {
            categories: vec!["A".into(), "B".into(), "C".into()],
            revenue: vec![1.0, 1.0, 1.0],
        };
        let chart = CategoryChart::build(&data);
        let percentages: Vec<_> = chart.slices.iter().map(|slice| slice.percentage).collect();
        assert_eq!(percentages, vec![33, 33, 33]);
        assert_eq!(chart.slices[0].tooltip(), "A: $1 (33%)");
    }

    #[test]
    fn slice_percentage_handles_zero_total() {
        assert_eq!(slice_percentage(5.0, 0.0), 0);
        assert_eq!(slice_percentage(2.0, 3.0), 67);
        assert_eq!(slice_percentage(1.0, 8.0), 13);
    }

    #[test]
    fn palette_cycles_after_six_categories() {
        let data = CategoryBreakdown {
            categories: (0..7).map(|i| format!("C{i}")).collect(),
            revenue: vec![1.0; 7],
        };
        let chart = CategoryChart::build(&data);
        assert_eq!(chart.slices[6].color, CATEGORY_PALETTE[0]);
    }

    #[test]
    fn revenue_chart_tooltips_and_bounds() {
        let chart = RevenueChart::build(&TimeSeriesPayload {
            dates: vec!["Jan 2024".into(), "Feb 2024".into()],
            revenue: vec![1500.0, 2500.0],
            profit: vec![450.0, 750.0],
        });
        assert_eq!(chart.revenue_points(), vec![(0.0, 1500.0), (1.0, 2500.0)]);
        assert!((chart.y_max() - 2500.0).abs() < f64::EPSILON);
        assert_eq!(
            chart.tooltip(1),
            Some(["Revenue: $2,500".to_string(), "Profit: $750".to_string()])
        );
        assert_eq!(chart.tooltip(2), None);
    }
}
