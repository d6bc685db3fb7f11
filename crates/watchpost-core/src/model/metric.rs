// ── Aggregate metrics ──

use std::fmt;

use indexmap::IndexMap;

/// Metric name → value, in the order the backend listed them.
pub type MetricsSnapshot = IndexMap<String, MetricValue>;

/// A displayable metric value: the backend sends either a number or a string.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Number(serde_json::Number),
    Text(String),
}

/// Magnitudes at or above this print in exponent form.
const EXPONENT_ABOVE: f64 = 1e21;
/// Nonzero magnitudes below this print in exponent form.
const EXPONENT_BELOW: f64 = 1e-6;

/// Shortest round-trip form of a float.
///
/// Plain decimal from `1e-6` up to `1e21`, exponent form (`1e-7`,
/// `1.5e+21`) outside that range. Whole values drop the fraction and zero
/// has no sign.
pub(crate) fn format_number(v: f64) -> String {
    if v.is_nan() {
        return "NaN".into();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.into();
    }
    if v == 0.0 {
        return "0".into();
    }

    let magnitude = v.abs();
    if (EXPONENT_BELOW..EXPONENT_ABOVE).contains(&magnitude) {
        return format!("{v}");
    }

    let exp = format!("{v:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    return write!(f, "{n}");
                }
                match n.as_f64() {
                    Some(v) => f.write_str(&format_number(v)),
                    None => write!(f, "{n}"),
                }
            }
        }
    }
}

impl From<&str> for MetricValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<u64> for MetricValue {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}
