use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Plot kinds and the current selection
// ---------------------------------------------------------------------------

/// The three chart types offered by the plot-type dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotKind {
    #[default]
    Histogram,
    Scatter,
    BoxPlot,
}

impl PlotKind {
    pub const ALL: [PlotKind; 3] = [PlotKind::Histogram, PlotKind::Scatter, PlotKind::BoxPlot];

    pub fn label(self) -> &'static str {
        match self {
            PlotKind::Histogram => "Histogram",
            PlotKind::Scatter => "Scatter Plot",
            PlotKind::BoxPlot => "Box Plot",
        }
    }
}

/// What the user has picked in the side panel. Field names are resolved
/// against the dataset on every generate, so a stale name after a reload
/// degrades to the Invalid Selection placeholder instead of a panic.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub field_one: Option<String>,
    pub field_two: Option<String>,
    pub kind: PlotKind,
}

// ---------------------------------------------------------------------------
// ChartSpec – what to draw
// ---------------------------------------------------------------------------

/// One fixed-width histogram bin over `[start, end)` (the last bin is
/// closed on the right, as matplotlib does).
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Box-and-whisker summary. Whiskers sit at the most extreme data points
/// within 1.5×IQR of the quartiles; everything beyond is an outlier.
#[derive(Debug, Clone, PartialEq)]
pub struct FiveNumberSummary {
    pub whisker_low: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_high: f64,
}

/// Ephemeral description of a chart, handed to the renderer and dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartSpec {
    Histogram {
        field: String,
        bins: Vec<HistogramBin>,
    },
    Scatter {
        x_field: String,
        y_field: String,
        points: Vec<[f64; 2]>,
    },
    BoxPlot {
        field: String,
        summary: FiveNumberSummary,
        outliers: Vec<f64>,
    },
    /// Placeholder for any selection the branch table below rejects.
    InvalidSelection,
}

// ---------------------------------------------------------------------------
// Selection → ChartSpec
// ---------------------------------------------------------------------------

const HISTOGRAM_BINS: usize = 20;

/// Map the current selection to a chart description.
///
/// Branch table:
/// * Histogram – field one set, with numeric data
/// * Scatter   – both fields set and distinct
/// * Box plot  – field one set, with numeric data after dropping missing
/// * anything else – [`ChartSpec::InvalidSelection`], never an error
pub fn build_chart(dataset: Option<&Dataset>, selection: &Selection) -> ChartSpec {
    let Some(dataset) = dataset else {
        return ChartSpec::InvalidSelection;
    };

    match selection.kind {
        PlotKind::Histogram => histogram(dataset, selection.field_one.as_deref()),
        PlotKind::Scatter => scatter(
            dataset,
            selection.field_one.as_deref(),
            selection.field_two.as_deref(),
        ),
        PlotKind::BoxPlot => box_plot(dataset, selection.field_one.as_deref()),
    }
}

fn histogram(dataset: &Dataset, field: Option<&str>) -> ChartSpec {
    let Some(field) = field else {
        return ChartSpec::InvalidSelection;
    };
    let Some(column) = dataset.column(field) else {
        return ChartSpec::InvalidSelection;
    };

    let values = column.numeric_values();
    if values.is_empty() {
        return ChartSpec::InvalidSelection;
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in &values {
        min = min.min(v);
        max = max.max(v);
    }
    // A single distinct value still gets a full-width histogram.
    if min == max {
        min -= 0.5;
        max += 0.5;
    }

    let width = (max - min) / HISTOGRAM_BINS as f64;
    let mut bins: Vec<HistogramBin> = (0..HISTOGRAM_BINS)
        .map(|i| HistogramBin {
            start: min + width * i as f64,
            end: min + width * (i + 1) as f64,
            count: 0,
        })
        .collect();

    for &v in &values {
        let idx = (((v - min) / width) as usize).min(HISTOGRAM_BINS - 1);
        bins[idx].count += 1;
    }

    ChartSpec::Histogram {
        field: field.to_string(),
        bins,
    }
}

fn scatter(dataset: &Dataset, field_one: Option<&str>, field_two: Option<&str>) -> ChartSpec {
    let (Some(x_field), Some(y_field)) = (field_one, field_two) else {
        return ChartSpec::InvalidSelection;
    };
    if x_field == y_field {
        return ChartSpec::InvalidSelection;
    }
    let (Some(x_col), Some(y_col)) = (dataset.column(x_field), dataset.column(y_field)) else {
        return ChartSpec::InvalidSelection;
    };

    // One point per row where both cells are numeric.
    let points: Vec<[f64; 2]> = x_col
        .values
        .iter()
        .zip(y_col.values.iter())
        .filter_map(|(x, y)| Some([x.as_f64()?, y.as_f64()?]))
        .filter(|[x, y]| x.is_finite() && y.is_finite())
        .collect();

    ChartSpec::Scatter {
        x_field: x_field.to_string(),
        y_field: y_field.to_string(),
        points,
    }
}

fn box_plot(dataset: &Dataset, field: Option<&str>) -> ChartSpec {
    let Some(field) = field else {
        return ChartSpec::InvalidSelection;
    };
    let Some(column) = dataset.column(field) else {
        return ChartSpec::InvalidSelection;
    };

    // Missing cells are dropped before the five-number summary.
    let mut values = column.numeric_values();
    if values.is_empty() {
        return ChartSpec::InvalidSelection;
    }
    values.sort_by(|a, b| a.total_cmp(b));

    let q1 = percentile(&values, 0.25);
    let median = percentile(&values, 0.50);
    let q3 = percentile(&values, 0.75);
    let iqr = q3 - q1;
    let low_fence = q1 - 1.5 * iqr;
    let high_fence = q3 + 1.5 * iqr;

    // Whiskers reach the most extreme data still inside the fences.
    let whisker_low = values
        .iter()
        .copied()
        .find(|&v| v >= low_fence)
        .unwrap_or(q1);
    let whisker_high = values
        .iter()
        .rev()
        .copied()
        .find(|&v| v <= high_fence)
        .unwrap_or(q3);

    let outliers: Vec<f64> = values
        .iter()
        .copied()
        .filter(|&v| v < whisker_low || v > whisker_high)
        .collect();

    ChartSpec::BoxPlot {
        field: field.to_string(),
        summary: FiveNumberSummary {
            whisker_low,
            q1,
            median,
            q3,
            whisker_high,
        },
        outliers,
    }
}

/// Linear-interpolation percentile over sorted data (numpy's default).
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let idx = p * (sorted.len() - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = idx - lo as f64;
        sorted[lo] * (1.0 - frac) + sorted[hi] * frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Column, Value};

    fn numeric_dataset(name: &str, values: &[f64]) -> Dataset {
        let cells = values.iter().map(|&v| Value::Number(v)).collect();
        Dataset::from_columns(vec![Column::new(name, cells)]).unwrap()
    }

    fn selection(kind: PlotKind, one: Option<&str>, two: Option<&str>) -> Selection {
        Selection {
            field_one: one.map(str::to_string),
            field_two: two.map(str::to_string),
            kind,
        }
    }

    #[test]
    fn histogram_bins_span_observed_range() {
        let ds = numeric_dataset("a", &[1.0, 2.0, 2.0, 3.0, 100.0]);
        let sel = selection(PlotKind::Histogram, Some("a"), None);
        let ChartSpec::Histogram { field, bins } = build_chart(Some(&ds), &sel) else {
            panic!("expected histogram");
        };

        assert_eq!(field, "a");
        assert_eq!(bins.len(), 20);
        assert_eq!(bins[0].start, 1.0);
        assert!((bins[19].end - 100.0).abs() < 1e-9);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 5);
        // 1, 2, 2, 3 land in the first 4.95-wide bin; 100 in the last.
        assert_eq!(bins[0].count, 4);
        assert_eq!(bins[19].count, 1);
    }

    #[test]
    fn histogram_single_value_gets_unit_range() {
        let ds = numeric_dataset("a", &[5.0, 5.0, 5.0]);
        let sel = selection(PlotKind::Histogram, Some("a"), None);
        let ChartSpec::Histogram { bins, .. } = build_chart(Some(&ds), &sel) else {
            panic!("expected histogram");
        };
        assert_eq!(bins[0].start, 4.5);
        assert!((bins[19].end - 5.5).abs() < 1e-9);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
    }

    #[test]
    fn scatter_with_identical_fields_is_invalid() {
        let ds = numeric_dataset("a", &[1.0, 2.0]);
        let sel = selection(PlotKind::Scatter, Some("a"), Some("a"));
        assert_eq!(build_chart(Some(&ds), &sel), ChartSpec::InvalidSelection);
    }

    #[test]
    fn scatter_pairs_rows_and_skips_nonnumeric() {
        let ds = Dataset::from_columns(vec![
            Column::new(
                "x",
                vec![Value::Number(1.0), Value::Number(2.0), Value::Missing],
            ),
            Column::new(
                "y",
                vec![Value::Number(10.0), Value::Text("?".into()), Value::Number(30.0)],
            ),
        ])
        .unwrap();
        let sel = selection(PlotKind::Scatter, Some("x"), Some("y"));
        let ChartSpec::Scatter { points, .. } = build_chart(Some(&ds), &sel) else {
            panic!("expected scatter");
        };
        assert_eq!(points, vec![[1.0, 10.0]]);
    }

    #[test]
    fn box_plot_excludes_missing_values() {
        let ds = Dataset::from_columns(vec![Column::new(
            "a",
            vec![
                Value::Number(2.0),
                Value::Missing,
                Value::Number(1.0),
                Value::Number(3.0),
                Value::Missing,
                Value::Number(4.0),
                Value::Number(5.0),
            ],
        )])
        .unwrap();
        let sel = selection(PlotKind::BoxPlot, Some("a"), None);
        let ChartSpec::BoxPlot {
            summary, outliers, ..
        } = build_chart(Some(&ds), &sel)
        else {
            panic!("expected box plot");
        };
        // Summary over [1..5] only, the two missing cells dropped.
        assert_eq!(summary.q1, 2.0);
        assert_eq!(summary.median, 3.0);
        assert_eq!(summary.q3, 4.0);
        assert_eq!(summary.whisker_low, 1.0);
        assert_eq!(summary.whisker_high, 5.0);
        assert!(outliers.is_empty());
    }

    #[test]
    fn box_plot_flags_outliers_beyond_fences() {
        let ds = numeric_dataset("a", &[1.0, 2.0, 3.0, 4.0, 100.0]);
        let sel = selection(PlotKind::BoxPlot, Some("a"), None);
        let ChartSpec::BoxPlot {
            summary, outliers, ..
        } = build_chart(Some(&ds), &sel)
        else {
            panic!("expected box plot");
        };
        // IQR = 2, fences at [-1, 7]: 100 is an outlier, whisker stops at 4.
        assert_eq!(summary.whisker_high, 4.0);
        assert_eq!(outliers, vec![100.0]);
    }

    #[test]
    fn no_dataset_is_invalid_not_an_error() {
        for kind in PlotKind::ALL {
            let sel = selection(kind, Some("a"), Some("b"));
            assert_eq!(build_chart(None, &sel), ChartSpec::InvalidSelection);
        }
    }

    #[test]
    fn unset_or_stale_fields_are_invalid() {
        let ds = numeric_dataset("a", &[1.0]);
        let unset = selection(PlotKind::Histogram, None, None);
        assert_eq!(build_chart(Some(&ds), &unset), ChartSpec::InvalidSelection);

        let stale = selection(PlotKind::Histogram, Some("renamed"), None);
        assert_eq!(build_chart(Some(&ds), &stale), ChartSpec::InvalidSelection);
    }

    #[test]
    fn text_only_column_is_invalid_for_histogram() {
        let ds = Dataset::from_columns(vec![Column::new(
            "label",
            vec![Value::Text("x".into()), Value::Text("y".into())],
        )])
        .unwrap();
        let sel = selection(PlotKind::Histogram, Some("label"), None);
        assert_eq!(build_chart(Some(&ds), &sel), ChartSpec::InvalidSelection);
    }

    #[test]
    fn percentile_interpolates_linearly() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&values, 0.25), 1.75);
        assert_eq!(percentile(&values, 0.5), 2.5);
        assert_eq!(percentile(&values, 1.0), 4.0);
    }
}
