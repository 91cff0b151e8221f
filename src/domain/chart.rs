//! Bar chart model for similarity scores
//!
//! The chart is described declaratively by [`BarChartSpec`] and owned by a
//! single [`ChartState`]. Replacing the chart always destroys the previous
//! instance before the new one is created, so at most one is ever live.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::search::{document_label, SearchResult};

pub const DATASET_LABEL: &str = "Cosine Similarity";

/// RGBA colour as written in CSS: `rgba(0, 123, 255, 0.5)` or `#007bff`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Composite this colour over an opaque background.
    ///
    /// Terminals have no alpha channel, so translucent fills are flattened first.
    pub fn over(&self, background: (u8, u8, u8)) -> (u8, u8, u8) {
        let alpha = self.a.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| -> u8 {
            (f32::from(fg) * alpha + f32::from(bg) * (1.0 - alpha)).round() as u8
        };
        (
            mix(self.r, background.0),
            mix(self.g, background.1),
            mix(self.b, background.2),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid colour `{0}`: expected rgba(r, g, b, a) or #rrggbb")]
pub struct ParseRgbaError(String);

impl FromStr for Rgba {
    type Err = ParseRgbaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRgbaError(s.to_string());
        let trimmed = s.trim();

        if let Some(hex) = trimmed.strip_prefix('#') {
            if hex.len() != 6 {
                return Err(err());
            }
            let channel =
                |i: usize| u8::from_str_radix(hex.get(i..i + 2).ok_or_else(err)?, 16).map_err(|_| err());
            return Ok(Rgba::new(channel(0)?, channel(2)?, channel(4)?, 1.0));
        }

        let inner = trimmed
            .strip_prefix("rgba(")
            .or_else(|| trimmed.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(err)?;
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        let (rgb, alpha) = match parts.as_slice() {
            [r, g, b] => ([*r, *g, *b], 1.0),
            [r, g, b, a] => ([*r, *g, *b], a.parse::<f32>().map_err(|_| err())?),
            _ => return Err(err()),
        };
        if !(0.0..=1.0).contains(&alpha) {
            return Err(err());
        }
        let channel = |v: &str| v.parse::<u8>().map_err(|_| err());
        Ok(Rgba::new(
            channel(rgb[0])?,
            channel(rgb[1])?,
            channel(rgb[2])?,
            alpha,
        ))
    }
}

impl TryFrom<String> for Rgba {
    type Error = ParseRgbaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(value: Rgba) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarStyle {
    pub fill: Rgba,
    pub border: Rgba,
    pub border_width: u16,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            fill: Rgba::new(0, 123, 255, 0.5),
            border: Rgba::new(0, 123, 255, 1.0),
            border_width: 1,
        }
    }
}

/// Declarative bar chart: one bar per document, single dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartSpec {
    pub labels: Vec<String>,
    pub dataset_label: String,
    pub values: Vec<f64>,
    pub begin_at_zero: bool,
    pub style: BarStyle,
}

impl BarChartSpec {
    /// Build the chart for a result list. Returns `None` when there is nothing to plot.
    pub fn from_results(results: &[SearchResult], style: BarStyle) -> Option<Self> {
        if results.is_empty() {
            return None;
        }
        let labels = (0..results.len()).map(document_label).collect();
        let values = results.iter().map(|r| r.similarity).collect();
        Some(Self {
            labels,
            dataset_label: DATASET_LABEL.to_string(),
            values,
            begin_at_zero: true,
            style,
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Lower bound of the y axis.
    pub fn y_min(&self) -> f64 {
        let min = self.values.iter().copied().fold(f64::INFINITY, f64::min);
        if self.begin_at_zero {
            min.min(0.0)
        } else {
            min
        }
    }
}

/// A live chart. Identified by a monotonically increasing id.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartInstance {
    pub id: u64,
    pub spec: BarChartSpec,
}

/// Outcome of [`ChartState::replace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartReplacement {
    pub destroyed: Option<u64>,
    pub created: u64,
}

/// Owner of the single chart instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartState {
    instance: Option<ChartInstance>,
    next_id: u64,
    destroyed: u64,
}

impl ChartState {
    pub fn current(&self) -> Option<&ChartInstance> {
        self.instance.as_ref()
    }

    /// Number of instances destroyed so far.
    pub fn destroyed_count(&self) -> u64 {
        self.destroyed
    }

    /// Number of instances created so far.
    pub fn created_count(&self) -> u64 {
        self.next_id
    }

    /// Destroy the live instance (if any), then create a new one from `spec`.
    pub fn replace(&mut self, spec: BarChartSpec) -> ChartReplacement {
        let destroyed = self.instance.take().map(|old| {
            log::debug!("Destroying chart #{}", old.id);
            self.destroyed += 1;
            old.id
        });

        self.next_id += 1;
        let id = self.next_id;
        log::debug!("Creating chart #{id} with {} bars", spec.len());
        self.instance = Some(ChartInstance { id, spec });

        ChartReplacement {
            destroyed,
            created: id,
        }
    }
}
