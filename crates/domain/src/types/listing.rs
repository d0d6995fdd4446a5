//! Pagination, sorting and query-string helpers

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::impl_wire_enum_conversions;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl_wire_enum_conversions!(SortOrder {
    Asc => "asc",
    Desc => "desc",
});

/// Page counters returned with list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct PageMeta {
    pub total: u64,
    pub taken: u64,
    pub remaining: u64,
}

/// A page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct Paginated<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: PageMeta,
}

/// The active (slotted) items of a resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct ActiveList<T> {
    pub data: Vec<T>,
}

/// Query structs that render into `key=value` pairs.
///
/// Unset fields are omitted entirely rather than sent empty.
pub trait QueryPairs {
    fn to_query_pairs(&self) -> Vec<(String, String)>;
}

/// Append `key=value` when `value` is set.
pub(crate) fn push_pair<V: ToString>(pairs: &mut Vec<(String, String)>, key: &str, value: Option<V>) {
    if let Some(value) = value {
        pairs.push((key.to_string(), value.to_string()));
    }
}
