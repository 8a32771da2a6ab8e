//! Quality score types decoded from the model's structured block.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// A single score value, exactly as the service emitted it.
///
/// Scores are meant to be integers in `0..=100`, but nothing enforces that
/// after decoding: `140`, `72.5` or the string `"72"` pass through. Renderers
/// use [`Metric::clamped`] wherever a bounded value is required.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "RawMetric")]
pub struct Metric(serde_json::Number);

/// What a metric may look like on the wire.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawMetric {
    Number(serde_json::Number),
    Text(String),
}

impl TryFrom<RawMetric> for Metric {
    type Error = String;

    fn try_from(raw: RawMetric) -> Result<Self, Self::Error> {
        match raw {
            RawMetric::Number(n) => Ok(Metric(n)),
            RawMetric::Text(text) => text
                .trim()
                .parse::<serde_json::Number>()
                .map(Metric)
                .map_err(|_| format!("expected a number, got \"{text}\"")),
        }
    }
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl Metric {
    pub fn as_f64(&self) -> f64 {
        self.0.as_f64().unwrap_or(0.0)
    }

    /// The value if it is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        self.0.as_i64()
    }

    /// Rounded and clamped to `0..=100`.
    pub fn clamped(&self) -> u8 {
        let v = self.as_f64();
        if v.is_nan() {
            return 0;
        }
        v.round().clamp(0.0, 100.0) as u8
    }

    pub fn tier(&self) -> QualityTier {
        QualityTier::for_score(self.clamped())
    }
}

impl From<i64> for Metric {
    fn from(v: i64) -> Self {
        Metric(v.into())
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The five-field quality score. Either fully present or absent entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub overall: Metric,
    pub readability: Metric,
    pub performance: Metric,
    pub security: Metric,
    #[serde(rename = "bestPractices")]
    pub best_practices: Metric,
}

impl ScoreReport {
    /// Build a report from plain integers.
    pub fn new(
        overall: i64,
        readability: i64,
        performance: i64,
        security: i64,
        best_practices: i64,
    ) -> Self {
        Self {
            overall: overall.into(),
            readability: readability.into(),
            performance: performance.into(),
            security: security.into(),
            best_practices: best_practices.into(),
        }
    }

    /// The four sub-metrics in display order, with their labels.
    pub fn breakdown(&self) -> [(&'static str, &Metric); 4] {
        [
            ("Readability", &self.readability),
            ("Performance", &self.performance),
            ("Security", &self.security),
            ("Best Practices", &self.best_practices),
        ]
    }
}

/// Coarse verdict shown next to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl QualityTier {
    pub fn for_score(score: u8) -> Self {
        match score {
            80.. => QualityTier::Excellent,
            60..=79 => QualityTier::Good,
            40..=59 => QualityTier::Fair,
            _ => QualityTier::Poor,
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityTier::Excellent => write!(f, "Excellent"),
            QualityTier::Good => write!(f, "Good"),
            QualityTier::Fair => write!(f, "Fair"),
            QualityTier::Poor => write!(f, "Poor"),
        }
    }
}
