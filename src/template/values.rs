use serde::ser::{Serialize, SerializeMap, Serializer};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

/// Number of captured variables kept inline before spilling to the heap.
/// Google API templates rarely bind more than a handful of fields.
pub const MAX_INLINE_VALUES: usize = 8;

/// Variables captured while matching a request path against a template.
///
/// Keys are field names from the compiled template (shared `Arc<str>` so
/// recording a value never copies the name). Each key appears at most once;
/// composite captures are folded into the existing entry. Comparison ignores
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct Values {
    entries: SmallVec<[(Arc<str>, String); MAX_INLINE_VALUES]>,
}

impl Values {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a captured path component for `field`.
    ///
    /// With `composite == false` the value replaces any existing entry. With
    /// `composite == true` it is appended to the existing entry, joined by `/`,
    /// which is how `{field=a/*/b}` builds one value from several components.
    /// A composite value for a field with no entry yet is stored as-is.
    pub fn record(&mut self, field: &Arc<str>, value: &str, composite: bool) {
        match self.entries.iter_mut().find(|(k, _)| k == field) {
            Some((_, existing)) if composite => {
                existing.reserve(value.len() + 1);
                existing.push('/');
                existing.push_str(value);
            }
            Some((_, existing)) => {
                existing.clear();
                existing.push_str(value);
            }
            None => self.entries.push((Arc::clone(field), value.to_string())),
        }
    }

    /// Get the captured value for a field
    #[inline]
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_ref() == field)
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(field, value)` pairs in capture order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    /// Convert to a `HashMap` for callers that want owned keys
    /// Note: This allocates - use get() in hot paths instead
    #[must_use]
    pub fn into_map(self) -> HashMap<String, String> {
        self.entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }
}

impl PartialEq for Values {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for Values {}

impl<K, V> FromIterator<(K, V)> for Values
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Values::new();
        for (k, v) in iter {
            let key: Arc<str> = Arc::from(k.as_ref());
            let value: String = v.into();
            values.record(&key, &value, false);
        }
        values
    }
}

impl Serialize for Values {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
