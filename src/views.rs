use crate::data::model::{ReadCount, ReadCountTable};

/// Number of equal-width histogram bins.
pub const HISTOGRAM_BINS: usize = 50;

/// Points at which the violin density is evaluated.
const DENSITY_SAMPLES: usize = 100;

// ---------------------------------------------------------------------------
// ViewSet – the three charts for one (dataset, sample set) pair
// ---------------------------------------------------------------------------

/// Everything the three charts draw, derived from one table.
///
/// The set always describes a single selection; the controller swaps it
/// as a whole, never chart by chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSet {
    pub dataset: String,
    pub sample_set: String,
    pub bar: BarView,
    pub histogram: HistogramView,
    pub violin: ViolinView,
    /// Rows as loaded, for the sample table.
    pub table: ReadCountTable,
}

impl ViewSet {
    pub fn derive(dataset: &str, sample_set: &str, table: ReadCountTable) -> Self {
        Self {
            dataset: dataset.to_string(),
            sample_set: sample_set.to_string(),
            bar: BarView::derive(dataset, &table),
            histogram: HistogramView::derive(dataset, &table),
            violin: ViolinView::derive(dataset, &table),
            table,
        }
    }
}

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

/// One bar per sample, ascending by reads.
#[derive(Debug, Clone, PartialEq)]
pub struct BarView {
    pub title: String,
    pub bars: Vec<ReadCount>,
}

impl BarView {
    pub fn derive(dataset: &str, table: &ReadCountTable) -> Self {
        Self {
            title: format!("Bar plot of number of reads for dataset {dataset}"),
            bars: table.sorted_by_reads(),
        }
    }

    pub fn samples(&self) -> impl Iterator<Item = &str> {
        self.bars.iter().map(|r| r.sample.as_str())
    }
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
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

/// Distribution of reads over [`HISTOGRAM_BINS`] bins.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramView {
    pub title: String,
    pub bins: Vec<HistogramBin>,
}

impl HistogramView {
    pub fn derive(dataset: &str, table: &ReadCountTable) -> Self {
        Self {
            title: format!("Hist plot of number of reads for dataset {dataset}"),
            bins: bin_values(&table.reads(), HISTOGRAM_BINS),
        }
    }

    /// Total number of observations across all bins.
    pub fn observations(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Split `[min, max]` of `values` into `n` equal-width bins.
///
/// Bins are half-open except the last, which also takes `max`. When all
/// values are equal the bins span one unit centred on that value.
pub fn bin_values(values: &[f64], n: usize) -> Vec<HistogramBin> {
    if values.is_empty() || n == 0 {
        return Vec::new();
    }
    let (min, max) = min_max(values);
    let (lo, hi) = if max > min {
        (min, max)
    } else {
        (min - 0.5, min + 0.5)
    };
    let span = hi - lo;
    let width = span / n as f64;

    let mut bins: Vec<HistogramBin> = (0..n)
        .map(|i| HistogramBin {
            start: lo + i as f64 * width,
            end: lo + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for &v in values {
        // one rounding step, so values on an interior edge open the upper bin
        let idx = (((v - lo) * n as f64 / span).floor() as usize).min(n - 1);
        bins[idx].count += 1;
    }
    bins
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

// ---------------------------------------------------------------------------
// Violin with box overlay
// ---------------------------------------------------------------------------

/// Five-number summary drawn as the box inside the violin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStats {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
}

impl BoxStats {
    /// Quartiles use linear interpolation; whiskers reach the furthest
    /// points within 1.5 IQR of the box.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        let (low_fence, high_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|&v| v >= low_fence)
            .unwrap_or(q1);
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_fence)
            .unwrap_or(q3);

        Some(Self {
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// `p`-quantile of sorted, non-empty data by linear interpolation.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * p;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

/// Reads distribution: every observation, its box summary and a density
/// outline.
#[derive(Debug, Clone, PartialEq)]
pub struct ViolinView {
    pub title: String,
    pub points: Vec<f64>,
    pub stats: Option<BoxStats>,
    /// `[value, density]` pairs, ascending by value.
    pub density: Vec<[f64; 2]>,
}

impl ViolinView {
    pub fn derive(dataset: &str, table: &ReadCountTable) -> Self {
        let points = table.reads();
        let stats = BoxStats::from_values(&points);
        let density = stats
            .map(|s| kernel_density(&points, &s))
            .unwrap_or_default();
        Self {
            title: format!("Violin plot of number of reads for dataset {dataset}"),
            points,
            stats,
            density,
        }
    }

    /// Largest density value, for scaling the outline to a fixed width.
    pub fn peak_density(&self) -> f64 {
        self.density.iter().map(|p| p[1]).fold(0.0, f64::max)
    }
}

/// Gaussian KDE evaluated over `[min - 2h, max + 2h]`.
fn kernel_density(values: &[f64], stats: &BoxStats) -> Vec<[f64; 2]> {
    let h = bandwidth(values, stats.iqr());
    let (min, max) = min_max(values);
    let (lo, hi) = (min - 2.0 * h, max + 2.0 * h);
    let step = (hi - lo) / (DENSITY_SAMPLES - 1) as f64;
    let norm = 1.0 / (values.len() as f64 * h * (2.0 * std::f64::consts::PI).sqrt());

    (0..DENSITY_SAMPLES)
        .map(|i| {
            let x = lo + i as f64 * step;
            let sum: f64 = values
                .iter()
                .map(|&v| {
                    let u = (x - v) / h;
                    (-0.5 * u * u).exp()
                })
                .sum();
            [x, sum * norm]
        })
        .collect()
}

/// Silverman's rule of thumb, with a fallback for degenerate samples.
fn bandwidth(values: &[f64], iqr: f64) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std = if values.len() > 1 {
        (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
    } else {
        0.0
    };
    let spread = if iqr > 0.0 { std.min(iqr / 1.349) } else { std };
    let h = 1.059 * spread * n.powf(-0.2);
    if h > 0.0 && h.is_finite() {
        h
    } else {
        (mean.abs() * 0.05).max(1.0)
    }
}
