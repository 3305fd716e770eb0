use std::collections::BTreeMap;
use std::fmt;

use arrow::datatypes::DataType;

/// A single option value passed through to a compute function.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    DataType(DataType),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(v) => write!(f, "{v}"),
            OptionValue::Int(v) => write!(f, "{v}"),
            OptionValue::Float(v) => write!(f, "{v}"),
            OptionValue::Str(v) => write!(f, "{v:?}"),
            OptionValue::DataType(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        OptionValue::Bool(v)
    }
}

impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        OptionValue::Int(v)
    }
}

impl From<f64> for OptionValue {
    fn from(v: f64) -> Self {
        OptionValue::Float(v)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        OptionValue::Str(v.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        OptionValue::Str(v)
    }
}

impl From<DataType> for OptionValue {
    fn from(v: DataType) -> Self {
        OptionValue::DataType(v)
    }
}

/// Named options handed opaquely to a compute function.
///
/// Keys are kept sorted so the bag renders identically across runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionBag {
    entries: BTreeMap<String, OptionValue>,
}

impl OptionBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a bag with `key` set to `value`, replacing any earlier entry.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.entries.get(key)? {
            OptionValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.entries.get(key)? {
            OptionValue::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn get_data_type(&self, key: &str) -> Option<&DataType> {
        match self.entries.get(key)? {
            OptionValue::DataType(v) => Some(v),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys that are empty, i.e. entries without a usable name.
    pub fn has_unnamed_entry(&self) -> bool {
        self.entries.keys().any(|k| k.trim().is_empty())
    }
}

impl fmt::Display for OptionBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_replaces_and_sorts() {
        let bag = OptionBag::new()
            .with("na_rm", false)
            .with("alpha", 1i64)
            .with("na_rm", true);
        assert_eq!(bag.len(), 2);
        assert_eq!(bag.get_bool("na_rm"), Some(true));
        assert_eq!(bag.get_str("alpha"), None);
        assert_eq!(bag.to_string(), "{alpha: 1, na_rm: true}");
    }

    #[test]
    fn data_types_are_kept_typed() {
        let list = DataType::new_list(DataType::Int64, true);
        let bag = OptionBag::new().with("to_type", list.clone());
        assert_eq!(bag.get_data_type("to_type"), Some(&list));
        assert_eq!(bag.get_str("to_type"), None);
    }

    #[test]
    fn blank_keys_count_as_unnamed() {
        assert!(!OptionBag::new().has_unnamed_entry());
        assert!(OptionBag::new().with("", true).has_unnamed_entry());
        assert!(OptionBag::new().with("  ", true).has_unnamed_entry());
    }
}
