//! Payflow name/value wire formats
//!
//! Outbound token requests use length-prefixed pairs (`name[len]=value`) so
//! values may contain `&` or `=`. Responses and postbacks are plain
//! `name=value` pairs joined by `&`.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// Ordered gateway fields with unique names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    entries: Vec<(String, String)>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, replacing any earlier value in place
    ///
    /// Blank names and blank values are ignored, so an absent input never
    /// produces an empty field.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if name.trim().is_empty() || value.trim().is_empty() {
            return;
        }

        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl Serialize for FieldSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Serialize fields as `name[byte_len]=value` pairs joined by `&`
pub fn encode_length_prefixed(fields: &FieldSet) -> String {
    fields
        .iter()
        .map(|(name, value)| format!("{}[{}]={}", name, value.len(), value))
        .collect::<Vec<_>>()
        .join("&")
}

/// Parse `name=value` pairs joined by `&`
///
/// Values are split on the first `=` only and are not URL-decoded. A segment
/// without `=` maps to an empty value; later duplicates win.
pub fn parse_name_value(body: &str) -> HashMap<String, String> {
    body.split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.split_once('=') {
            Some((name, value)) => (name.to_string(), value.to_string()),
            None => (segment.to_string(), String::new()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_skips_blank_values() {
        let mut fields = FieldSet::new();
        fields.add("address", "");
        fields.add("name", "   ");
        fields.add("", "value");
        assert!(fields.is_empty());
    }

    #[test]
    fn test_add_replaces_in_place() {
        let mut fields = FieldSet::new();
        fields.add("login", "first");
        fields.add("vendor", "v");
        fields.add("login", "second");

        let collected: Vec<_> = fields.iter().collect();
        assert_eq!(collected, vec![("login", "second"), ("vendor", "v")]);
    }

    #[test]
    fn test_encode_length_prefixed() {
        let mut fields = FieldSet::new();
        fields.add("amt", "10.00");
        fields.add("description", "a&b=c");
        assert_eq!(
            encode_length_prefixed(&fields),
            "amt[5]=10.00&description[5]=a&b=c"
        );
    }

    #[test]
    fn test_encode_uses_byte_length() {
        let mut fields = FieldSet::new();
        fields.add("name", "café");
        assert_eq!(encode_length_prefixed(&fields), "name[5]=café");
    }

    #[test]
    fn test_parse_name_value() {
        let parsed = parse_name_value("RESULT=0&RESPMSG=Approved&SECURETOKEN=abc");
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed["RESULT"], "0");
        assert_eq!(parsed["RESPMSG"], "Approved");
        assert_eq!(parsed["SECURETOKEN"], "abc");
    }

    #[test]
    fn test_parse_name_value_edge_cases() {
        let parsed = parse_name_value("A=1&&FLAG&B=x=y&A=2");
        assert_eq!(parsed["A"], "2");
        assert_eq!(parsed["FLAG"], "");
        assert_eq!(parsed["B"], "x=y");
        assert!(parse_name_value("").is_empty());
    }

    #[test]
    fn test_parse_does_not_url_decode() {
        let parsed = parse_name_value("RESPMSG=Declined%3A+bad+card");
        assert_eq!(parsed["RESPMSG"], "Declined%3A+bad+card");
    }
}
