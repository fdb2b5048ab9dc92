//! Series for the weight and food trend charts.

use chrono::NaiveDate;

use crate::models::{FoodLog, WeightLog};

/// Number of most recent entries a chart shows.
pub const CHART_WINDOW: usize = 7;

/// Padding added around the weight chart's value range.
const WEIGHT_DOMAIN_PADDING: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Line chart of kilograms
    Weight,
    /// Bar chart of grams
    Food,
}

impl ChartKind {
    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Weight => "体重の推移 (kg)",
            ChartKind::Food => "食事量の推移 (g)",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub date: NaiveDate,
    /// `MM/DD`
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub kind: ChartKind,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    fn from_values(kind: ChartKind, values: Vec<(NaiveDate, f64)>) -> Self {
        let skip = values.len().saturating_sub(CHART_WINDOW);
        let points = values
            .into_iter()
            .skip(skip)
            .map(|(date, value)| ChartPoint {
                label: date.format("%m/%d").to_string(),
                date,
                value,
            })
            .collect();
        Self { kind, points }
    }

    pub fn weight<'a>(logs: impl IntoIterator<Item = &'a WeightLog>) -> Self {
        Self::from_values(
            ChartKind::Weight,
            logs.into_iter().map(|l| (l.date, l.weight)).collect(),
        )
    }

    pub fn food<'a>(logs: impl IntoIterator<Item = &'a FoodLog>) -> Self {
        Self::from_values(
            ChartKind::Food,
            logs.into_iter().map(|l| (l.date, l.amount)).collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Value range of the y-axis. Weight charts are padded so small changes
    /// stay visible; bar charts start at zero.
    pub fn domain(&self) -> Option<(f64, f64)> {
        let min = self.points.iter().map(|p| p.value).reduce(f64::min)?;
        let max = self.points.iter().map(|p| p.value).reduce(f64::max)?;
        Some(match self.kind {
            ChartKind::Weight => (min - WEIGHT_DOMAIN_PADDING, max + WEIGHT_DOMAIN_PADDING),
            ChartKind::Food => (0.0, max),
        })
    }
}
