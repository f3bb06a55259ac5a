use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

/// Identifier assigned to a question by the extractor.
///
/// Whatever scalar the model produced is kept verbatim. Uniqueness is not guaranteed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionId {
    Number(Number),
    Text(String),
    /// The record carried no usable id; rendered as `?`.
    Unknown,
}

impl QuestionId {
    /// Reads an id from a JSON value; non-scalars become [`QuestionId::Unknown`].
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(n)) => QuestionId::Number(n.clone()),
            Some(Value::String(s)) if !s.trim().is_empty() => QuestionId::Text(s.trim().to_string()),
            Some(Value::Bool(b)) => QuestionId::Text(b.to_string()),
            _ => QuestionId::Unknown,
        }
    }
}

impl From<u64> for QuestionId {
    fn from(n: u64) -> Self {
        QuestionId::Number(n.into())
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        QuestionId::Text(s.to_string())
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionId::Number(n) => write!(f, "{}", n),
            QuestionId::Text(s) => f.write_str(s),
            QuestionId::Unknown => f.write_str("?"),
        }
    }
}

impl Serialize for QuestionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            QuestionId::Number(n) => n.serialize(serializer),
            QuestionId::Text(s) => serializer.serialize_str(s),
            QuestionId::Unknown => serializer.serialize_str("?"),
        }
    }
}

/// One question as extracted from the document. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
}

impl Question {
    pub fn new(id: impl Into<QuestionId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// Questions with blank text are skipped by the remediation loop.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
