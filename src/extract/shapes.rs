//! Accepted layouts of the extraction model's JSON answer.
//!
//! Models rarely follow the requested layout exactly, so each known layout is a
//! [`ResponseShape`] strategy. They are tried in [`ResponseShape::ORDERED`] order and the
//! first match wins.

use serde_json::{Map, Value};

use super::types::{Question, QuestionId};

/// Object keys that may wrap the question list.
pub const WRAPPER_KEYS: [&str; 2] = ["questions", "exam_questions"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `[{"id": 1, "question": "..."}, ...]`
    BareArray,
    /// `{"questions": [...]}` or `{"exam_questions": [...]}`
    WrappedList,
    /// `{"1": "...", "2": "..."}`, keys become ids.
    StringMap,
}

impl ResponseShape {
    pub const ORDERED: [ResponseShape; 3] = [
        ResponseShape::BareArray,
        ResponseShape::WrappedList,
        ResponseShape::StringMap,
    ];

    /// Returns the questions if `value` has this shape, `None` otherwise.
    pub fn extract(self, value: &Value) -> Option<Vec<Question>> {
        match (self, value) {
            (ResponseShape::BareArray, Value::Array(records)) => Some(from_records(records)),
            (ResponseShape::WrappedList, Value::Object(map)) => WRAPPER_KEYS
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_array))
                .map(|records| from_records(records)),
            (ResponseShape::StringMap, Value::Object(map)) => from_string_map(map),
            _ => None,
        }
    }
}

/// Runs every shape in order; an unrecognized layout yields no questions.
pub fn questions_from_value(value: &Value) -> Vec<Question> {
    ResponseShape::ORDERED
        .iter()
        .find_map(|shape| shape.extract(value))
        .unwrap_or_default()
}

fn from_records(records: &[Value]) -> Vec<Question> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| match record {
            Value::Object(fields) => Question {
                id: QuestionId::from_json(fields.get("id")),
                text: fields
                    .get("question")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
            },
            // A bare list of strings is numbered by position.
            Value::String(text) => Question::new(index as u64 + 1, text.trim()),
            _ => Question {
                id: QuestionId::Unknown,
                text: String::new(),
            },
        })
        .collect()
}

fn from_string_map(map: &Map<String, Value>) -> Option<Vec<Question>> {
    map.iter()
        .map(|(key, value)| {
            value
                .as_str()
                .map(|text| Question::new(key.as_str(), text.trim()))
        })
        .collect()
}
