//! Attribute predicates.

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{AttrValue, Feature};

/// A boolean expression over feature attributes.
///
/// Serialized with an `op` tag so predicates can be written inline in TOML:
/// `{ op = "in", field = "ADM2_NAME", values = ["Alameda", "Marin"] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Predicate {
    /// Attribute equals a constant
    Eq { field: String, value: AttrValue },

    /// Attribute is a member of a set. The list is de-duplicated on build.
    In {
        field: String,
        #[serde(deserialize_with = "dedup_values")]
        values: Vec<AttrValue>,
    },

    /// All sub-predicates hold. An empty conjunction matches everything.
    And { all: Vec<Predicate> },
}

fn dedup(values: impl IntoIterator<Item = AttrValue>) -> Vec<AttrValue> {
    let mut out: Vec<AttrValue> = Vec::new();
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

fn dedup_values<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<AttrValue>, D::Error> {
    Vec::<AttrValue>::deserialize(deserializer).map(dedup)
}

impl Predicate {
    pub fn equals(field: &str, value: impl Into<AttrValue>) -> Self {
        Predicate::Eq {
            field: field.to_string(),
            value: value.into(),
        }
    }

    pub fn is_in<V, I>(field: &str, values: I) -> Self
    where
        V: Into<AttrValue>,
        I: IntoIterator<Item = V>,
    {
        Predicate::In {
            field: field.to_string(),
            values: dedup(values.into_iter().map(Into::into)),
        }
    }

    pub fn and(all: Vec<Predicate>) -> Self {
        Predicate::And { all }
    }

    /// Evaluate against a single feature
    pub fn matches(&self, feature: &Feature) -> bool {
        match self {
            Predicate::Eq { field, value } => feature.get(field) == value,
            Predicate::In { field, values } => {
                let actual = feature.get(field);
                values.iter().any(|v| v == actual)
            }
            Predicate::And { all } => all.iter().all(|p| p.matches(feature)),
        }
    }

    /// Every attribute name this predicate reads, in order of appearance
    pub fn fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Predicate::Eq { field, .. } | Predicate::In { field, .. } => {
                if !out.contains(&field.as_str()) {
                    out.push(field);
                }
            }
            Predicate::And { all } => {
                for p in all {
                    p.collect_fields(out);
                }
            }
        }
    }
}
