//! Declarative plot directives.
//!
//! Solvers describe figures as data: panels with axes, sampled curves, point
//! markers, reference lines, and shaded regions. Rendering is left entirely to
//! the caller. Sample gaps (asymptotes, clipped values) are `None` and
//! serialize as `null`.

use ndarray as nd;
use serde::Serialize;

/// A complete figure.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlotDirective {
    pub title: String,
    pub panels: Vec<Panel>,
}

impl PlotDirective {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), panels: Vec::new() }
    }

    pub fn panel(mut self, panel: Panel) -> Self {
        self.panels.push(panel);
        self
    }
}

/// An axis label and optional fixed range.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Axis {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    Line,
    Dashed,
    /// Filled down to `y = 0`.
    Filled,
}

/// A sampled curve.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub style: Style,
    pub x: Vec<f64>,
    pub y: Vec<Option<f64>>,
}

impl Series {
    /// Sample `f` on the grid `x`. Non-finite values become gaps.
    pub fn sample<F>(label: impl Into<String>, style: Style, x: &nd::Array1<f64>, f: F)
        -> Self
    where F: Fn(f64) -> f64
    {
        Self {
            label: label.into(),
            style,
            x: x.to_vec(),
            y: x.iter().map(|xk| finite(f(*xk))).collect(),
        }
    }

    /// Like [`sample`][Self::sample], but values with `|y| > limit` also
    /// become gaps.
    pub fn sample_clipped<F>(
        label: impl Into<String>,
        style: Style,
        x: &nd::Array1<f64>,
        limit: f64,
        f: F,
    ) -> Self
    where F: Fn(f64) -> f64
    {
        Self::sample(label, style, x, |xk| clip(f(xk), limit))
    }

    /// A straight segment between two points.
    pub fn segment(label: impl Into<String>, style: Style, from: (f64, f64), to: (f64, f64))
        -> Self
    {
        Self {
            label: label.into(),
            style,
            x: vec![from.0, to.0],
            y: vec![Some(from.1), Some(to.1)],
        }
    }
}

/// A labeled point.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Marker {
    pub label: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A reference line spanning the panel.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Guide {
    pub orientation: Orientation,
    pub at: f64,
    pub label: String,
    pub style: Style,
}

/// A shaded vertical band `from <= x <= to`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Region {
    pub label: String,
    pub from: f64,
    pub to: f64,
}

/// One set of axes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Panel {
    pub title: String,
    pub x: Axis,
    pub y: Axis,
    pub series: Vec<Series>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<Marker>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub guides: Vec<Guide>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<Region>,
}

impl Panel {
    pub fn new(
        title: impl Into<String>,
        xlabel: impl Into<String>,
        ylabel: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            x: Axis { label: xlabel.into(), range: None },
            y: Axis { label: ylabel.into(), range: None },
            series: Vec::new(),
            markers: Vec::new(),
            guides: Vec::new(),
            regions: Vec::new(),
        }
    }

    pub fn xrange(mut self, lo: f64, hi: f64) -> Self {
        self.x.range = Some([lo, hi]);
        self
    }

    pub fn yrange(mut self, lo: f64, hi: f64) -> Self {
        self.y.range = Some([lo, hi]);
        self
    }

    pub fn series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn marker(mut self, label: impl Into<String>, x: f64, y: f64) -> Self {
        self.markers.push(Marker { label: label.into(), x, y });
        self
    }

    pub fn hline(mut self, at: f64, label: impl Into<String>, style: Style) -> Self {
        self.guides.push(
            Guide { orientation: Orientation::Horizontal, at, label: label.into(), style });
        self
    }

    pub fn vline(mut self, at: f64, label: impl Into<String>, style: Style) -> Self {
        self.guides.push(
            Guide { orientation: Orientation::Vertical, at, label: label.into(), style });
        self
    }

    pub fn region(mut self, label: impl Into<String>, from: f64, to: f64) -> Self {
        self.regions.push(Region { label: label.into(), from, to });
        self
    }
}

/// `n` evenly spaced sample points on `[lo, hi]`.
pub fn grid(lo: f64, hi: f64, n: usize) -> nd::Array1<f64> {
    nd::Array1::linspace(lo, hi, n.max(2))
}

fn finite(y: f64) -> Option<f64> { y.is_finite().then_some(y) }

fn clip(y: f64, limit: f64) -> f64 { if y.abs() > limit { f64::NAN } else { y } }
