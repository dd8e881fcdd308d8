//! Top-N ranking with ties collapsed into value groups.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::field::{Category, Field};
use crate::record::VehicleRecord;

/// Default number of groups kept by a ranking.
pub const DEFAULT_RANK_LIMIT: usize = 10;

/// Categorical equality predicates applied before ranking.
///
/// An empty value means "no constraint" for that attribute, not "match the
/// empty string".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRankFilter")]
pub struct RankFilter {
    predicates: IndexMap<Category, String>,
}

/// Serialized form of [`RankFilter`]; entries are normalized through `set`.
#[derive(Deserialize)]
struct RawRankFilter {
    #[serde(default)]
    predicates: IndexMap<Category, String>,
}

impl From<RawRankFilter> for RankFilter {
    fn from(raw: RawRankFilter) -> Self {
        let mut filter = RankFilter::new();
        for (category, value) in raw.predicates {
            filter.set(category, value);
        }
        filter
    }
}

impl RankFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `category` to equal `value`. An empty value clears the constraint.
    pub fn with(mut self, category: Category, value: impl Into<String>) -> Self {
        self.set(category, value);
        self
    }

    pub fn driveline(self, value: impl Into<String>) -> Self {
        self.with(Category::Driveline, value)
    }

    pub fn transmission(self, value: impl Into<String>) -> Self {
        self.with(Category::Transmission, value)
    }

    pub fn set(&mut self, category: Category, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.predicates.shift_remove(&category);
        } else {
            self.predicates.insert(category, value);
        }
    }

    /// Build a filter from `(name, value)` pairs, resolving each name.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<Self> {
        let mut filter = Self::new();
        for (name, value) in pairs {
            filter.set(Category::resolve(name)?, value);
        }
        Ok(filter)
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn predicates(&self) -> impl Iterator<Item = (Category, &str)> {
        self.predicates.iter().map(|(c, v)| (*c, v.as_str()))
    }

    /// Whether a record satisfies every predicate.
    ///
    /// A record without a value for a constrained attribute does not match.
    pub fn matches(&self, record: &VehicleRecord) -> bool {
        self.predicates
            .iter()
            .all(|(category, expected)| category.extract(record) == Some(expected.as_str()))
    }
}

/// Records sharing one exact metric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankGroup {
    /// 1-based dense rank.
    pub rank: usize,
    pub value: f64,
    /// Members in the order they were encountered.
    pub members: Vec<VehicleRecord>,
}

impl RankGroup {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_tie(&self) -> bool {
        self.members.len() > 1
    }
}

// -0.0 and 0.0 compare equal, so they must share a key.
fn group_key(value: f64) -> u64 {
    if value == 0.0 { 0.0f64.to_bits() } else { value.to_bits() }
}

/// Rank records by `metric`, grouping identical values.
///
/// Records are filtered by `filter`, records without a numeric metric are
/// dropped, the rest are grouped by exact value, groups are sorted
/// descending and the first `limit` are returned.
///
/// Grouping uses exact floating-point equality. Values that differ only by
/// representation noise land in separate groups.
pub fn rank(
    records: &[VehicleRecord],
    filter: &RankFilter,
    metric: Field,
    limit: usize,
) -> Vec<RankGroup> {
    let mut groups: IndexMap<u64, (f64, Vec<VehicleRecord>)> = IndexMap::new();

    for record in records.iter().filter(|r| filter.matches(r)) {
        let Some(value) = metric.extract(record) else {
            continue;
        };
        groups
            .entry(group_key(value))
            .or_insert_with(|| (value, Vec::new()))
            .1
            .push(record.clone());
    }

    let mut groups: Vec<(f64, Vec<VehicleRecord>)> = groups.into_values().collect();
    groups.sort_by(|a, b| b.0.total_cmp(&a.0));

    groups
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, (value, members))| RankGroup {
            rank: i + 1,
            value,
            members,
        })
        .collect()
}
