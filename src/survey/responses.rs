use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::ValidationError;

/// Who answered that they carry a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Responder {
    ResponderA,
    ResponderB,
    Shared,
    NotApplicable,
}

impl Responder {
    /// Parse a responder token. The survey screens' own tokens
    /// ("Mama", "Papa", "Draw") are accepted alongside the canonical ones.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "respondera" | "a" | "mama" => Some(Responder::ResponderA),
            "responderb" | "b" | "papa" => Some(Responder::ResponderB),
            "shared" | "both" | "draw" => Some(Responder::Shared),
            "notapplicable" | "n/a" | "na" => Some(Responder::NotApplicable),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Responder::ResponderA => "ResponderA",
            Responder::ResponderB => "ResponderB",
            Responder::Shared => "Shared",
            Responder::NotApplicable => "NotApplicable",
        }
    }

    /// Only A and B answers count toward the balance ratio
    pub fn is_decisive(&self) -> bool {
        matches!(self, Responder::ResponderA | Responder::ResponderB)
    }
}

impl fmt::Display for Responder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Survey answers keyed by question id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>")]
pub struct Responses(BTreeMap<String, Responder>);

impl Responses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, question_id: impl Into<String>, responder: Responder) {
        self.0.insert(question_id.into(), responder);
    }

    pub fn get(&self, question_id: &str) -> Option<Responder> {
        self.0.get(question_id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Responder)> {
        self.0.iter().map(|(id, r)| (id.as_str(), *r))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Responder)> for Responses {
    fn from_iter<I: IntoIterator<Item = (K, Responder)>>(iter: I) -> Self {
        Responses(iter.into_iter().map(|(k, r)| (k.into(), r)).collect())
    }
}

impl TryFrom<BTreeMap<String, String>> for Responses {
    type Error = ValidationError;

    fn try_from(raw: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        raw.into_iter()
            .map(|(question, token)| match Responder::parse(&token) {
                Some(responder) => Ok((question, responder)),
                None => Err(ValidationError::InvalidResponder {
                    question,
                    value: token,
                }),
            })
            .collect::<Result<BTreeMap<_, _>, _>>()
            .map(Responses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_and_source_tokens() {
        assert_eq!(Responder::parse("ResponderA"), Some(Responder::ResponderA));
        assert_eq!(Responder::parse("Mama"), Some(Responder::ResponderA));
        assert_eq!(Responder::parse("Papa"), Some(Responder::ResponderB));
        assert_eq!(Responder::parse("Draw"), Some(Responder::Shared));
        assert_eq!(Responder::parse("N/A"), Some(Responder::NotApplicable));
        assert_eq!(Responder::parse("Grandma"), None);
    }

    #[test]
    fn test_is_decisive() {
        assert!(Responder::ResponderA.is_decisive());
        assert!(Responder::ResponderB.is_decisive());
        assert!(!Responder::Shared.is_decisive());
        assert!(!Responder::NotApplicable.is_decisive());
    }

    #[test]
    fn test_deserialize_responses() {
        let yaml = r#"
q1: Mama
q2: ResponderB
q3: Shared
"#;
        let responses: Responses = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(responses.len(), 3);
        assert_eq!(responses.get("q1"), Some(Responder::ResponderA));
        assert_eq!(responses.get("q2"), Some(Responder::ResponderB));
        assert_eq!(responses.get("q3"), Some(Responder::Shared));
        assert_eq!(responses.get("q4"), None);
    }

    #[test]
    fn test_deserialize_rejects_unknown_token() {
        let yaml = "q1: Neighbor\n";
        let err = serde_saphyr::from_str::<Responses>(yaml).unwrap_err();
        assert!(err.to_string().contains("Neighbor"));
    }

    #[test]
    fn test_from_iterator() {
        let responses: Responses =
            [("q1", Responder::ResponderA), ("q2", Responder::NotApplicable)]
                .into_iter()
                .collect();
        assert_eq!(responses.len(), 2);
        assert!(!responses.is_empty());
    }
}
