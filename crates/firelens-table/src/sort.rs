//! Single-field document sorting
//!
//! Field values are compared with a total order that never panics:
//! values of different types order by type rank
//! (null < bool < number < string < array < object), numbers numerically,
//! strings case-insensitively with lowercase before uppercase on ties,
//! arrays element by element and objects by their JSON text.
//!
//! A document without the sort field sorts after every document that has
//! it when ascending, and before them when descending.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::cmp::Ordering;
use unicase::UniCase;

use firelens_core::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ascending => "A → Z",
            Self::Descending => "Z → A",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// The active sort
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn ascending(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Descending)
    }

    /// Compare two documents under this sort
    pub fn compare(&self, a: &Document, b: &Document) -> Ordering {
        let ordering = compare_field(a, b, &self.field);
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Stable in-place sort; a blank field leaves the order untouched
pub fn sort_documents(docs: &mut [&Document], spec: &SortSpec) {
    if spec.field.trim().is_empty() {
        return;
    }
    docs.sort_by(|a, b| spec.compare(a, b));
}

/// Ascending comparison of two documents by one field, missing last
pub fn compare_field(a: &Document, b: &Document, field: &str) -> Ordering {
    match (a.lookup(field), b.lookup(field)) {
        (Some(va), Some(vb)) => compare_values(&va, &vb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total order over JSON values
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b),
        (Value::String(a), Value::String(b)) => compare_strings(a, b),
        (Value::Array(a), Value::Array(b)) => {
            for (va, vb) in a.iter().zip(b.iter()) {
                let cmp = compare_values(va, vb);
                if cmp != Ordering::Equal {
                    return cmp;
                }
            }
            a.len().cmp(&b.len())
        }
        (Value::Object(_), Value::Object(_)) => a.to_string().cmp(&b.to_string()),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Numeric order, exact across integers and floats.
///
/// Integral values compare on their exact integer value. Any pair involving a
/// fractional or very large float compares as `f64`, which is exact there.
fn compare_numbers(a: &Number, b: &Number) -> Ordering {
    if let (Some(a), Some(b)) = (integer_value(a), integer_value(b)) {
        return a.cmp(&b);
    }
    let fa = a.as_f64().unwrap_or(f64::NAN);
    let fb = b.as_f64().unwrap_or(f64::NAN);
    fa.total_cmp(&fb)
}

fn integer_value(n: &Number) -> Option<i128> {
    if let Some(i) = n.as_i64() {
        return Some(i128::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(i128::from(u));
    }
    let f = n.as_f64()?;
    (f.fract() == 0.0 && f.abs() < 1e38).then_some(f as i128)
}

/// Case-insensitive order, lowercase first when the strings differ only in case
fn compare_strings(a: &str, b: &str) -> Ordering {
    UniCase::new(a)
        .cmp(&UniCase::new(b))
        .then_with(|| {
            for (ca, cb) in a.chars().zip(b.chars()) {
                if ca == cb {
                    continue;
                }
                return match (ca.is_lowercase(), cb.is_lowercase()) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    _ => ca.cmp(&cb),
                };
            }
            a.len().cmp(&b.len())
        })
}
