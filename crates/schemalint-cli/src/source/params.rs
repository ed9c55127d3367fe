//! Scheme parameters decoded from a source identifier.

use super::SourceError;
use url::form_urlencoded;

/// Named string parameters decoded from an identifier's authority and query.
///
/// Insertion order is kept so that driver options reach the driver in the
/// order they were written. A repeated name keeps its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemeParams {
    entries: Vec<(String, String)>,
}

impl SchemeParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an `a=1&b=2` query string. Names and values are percent-decoded.
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::new();
        for (name, value) in form_urlencoded::parse(query.as_bytes()) {
            params.insert(name.into_owned(), value.into_owned());
        }
        params
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Value of `name`; empty values count as absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.is_empty())
    }

    pub fn require(&self, scheme: &'static str, name: &'static str) -> Result<&str, SourceError> {
        self.get(name)
            .ok_or(SourceError::MissingParameter { scheme, name })
    }

    /// Fail on the first parameter whose name is not in `allowed`.
    pub fn reject_unknown(&self, scheme: &'static str, allowed: &[&str]) -> Result<(), SourceError> {
        match self
            .entries
            .iter()
            .find(|(name, _)| !allowed.contains(&name.as_str()))
        {
            Some((name, _)) => Err(SourceError::InvalidParameter {
                scheme,
                name: name.clone(),
                reason: format!("unknown parameter (expected one of: {})", allowed.join(", ")),
            }),
            None => Ok(()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Re-encode as a query string, in insertion order.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.entries {
            serializer.append_pair(name, value);
        }
        serializer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query_decodes_values() {
        let params = SchemeParams::from_query("file=db%2Fschema.sql&commitish=v1.0");
        assert_eq!(params.get("file"), Some("db/schema.sql"));
        assert_eq!(params.get("commitish"), Some("v1.0"));
        assert_eq!(params.get("branch"), None);
    }

    #[test]
    fn test_empty_value_is_absent() {
        let params = SchemeParams::from_query("file=schema.sql&commitish=");
        assert_eq!(params.get("commitish"), None);
        assert!(matches!(
            params.require("local-git", "commitish"),
            Err(SourceError::MissingParameter {
                name: "commitish",
                ..
            })
        ));
    }

    #[test]
    fn test_repeated_name_keeps_last_value_in_first_position() {
        let params = SchemeParams::from_query("charset=latin1&ssl-mode=disabled&charset=utf8mb4");
        assert_eq!(params.to_query(), "charset=utf8mb4&ssl-mode=disabled");
    }

    #[test]
    fn test_reject_unknown() {
        let params = SchemeParams::from_query("file=x.sql&branch=main");
        let err = params
            .reject_unknown("local-git", &["file", "commitish"])
            .unwrap_err();
        assert!(matches!(
            err,
            SourceError::InvalidParameter { ref name, .. } if name == "branch"
        ));
    }

    #[test]
    fn test_to_query_round_trips_reserved_characters() {
        let mut params = SchemeParams::new();
        params.insert("ssl-ca", "/etc/ssl/ca cert.pem");
        let decoded = SchemeParams::from_query(&params.to_query());
        assert_eq!(decoded.get("ssl-ca"), Some("/etc/ssl/ca cert.pem"));
    }
}
