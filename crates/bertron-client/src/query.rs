//! Request body for `POST /bertron/find`
//!
//! Filters, projections and sorts use the MongoDB operator dialect the BERtron
//! server evaluates. They are forwarded untouched.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

const DEFAULT_LIMIT: u64 = 100;

/// Sort order for one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn as_i32(self) -> i32 {
        match self {
            Self::Ascending => 1,
            Self::Descending => -1,
        }
    }
}

impl Serialize for SortDirection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.as_i32())
    }
}

/// Parameters of a filtered entity search
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FindQuery {
    pub filter: Value,
    pub skip: u64,
    pub limit: u64,
    #[serde(skip_serializing_if = "is_absent")]
    pub projection: Option<Value>,
    /// Sort keys in priority order
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "serialize_sort")]
    pub sort: Vec<(String, SortDirection)>,
}

impl Default for FindQuery {
    fn default() -> Self {
        Self {
            filter: Value::Object(Map::new()),
            skip: 0,
            limit: DEFAULT_LIMIT,
            projection: None,
            sort: Vec::new(),
        }
    }
}

impl FindQuery {
    pub fn new(filter: Value) -> Self {
        Self::default().filter(filter)
    }

    /// Replace the filter. `null` is sent as an empty filter.
    pub fn filter(mut self, filter: Value) -> Self {
        self.filter = match filter {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };
        self
    }

    pub fn projection(mut self, projection: Value) -> Self {
        self.projection = Some(projection);
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = skip;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Append a sort key; earlier keys take precedence
    pub fn sort_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort.push((field.into(), direction));
        self
    }
}

/// Empty projections are dropped, same as a missing one
fn is_absent(projection: &Option<Value>) -> bool {
    match projection {
        None | Some(Value::Null) => true,
        Some(Value::Object(fields)) => fields.is_empty(),
        Some(_) => false,
    }
}

fn serialize_sort<S: Serializer>(
    sort: &[(String, SortDirection)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(sort.len()))?;
    for (field, direction) in sort {
        map.serialize_entry(field, direction)?;
    }
    map.end()
}

/// Filter on `name` by regular expression
///
/// Case-insensitive matching adds the `$options: "i"` flag; a case-sensitive
/// search leaves it out entirely.
pub fn name_pattern_filter(pattern: &str, case_sensitive: bool) -> Value {
    let mut condition = Map::new();
    condition.insert("$regex".to_string(), json!(pattern));
    if !case_sensitive {
        condition.insert("$options".to_string(), json!("i"));
    }
    json!({ "name": condition })
}
