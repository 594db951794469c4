use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

const UNKNOWN_ID: &str = "unknown";

/// Opaque identifier of a record. The API sends numbers, but any scalar is
/// accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the file this record is saved to, e.g. `post 7.txt`.
    pub fn file_name(&self) -> String {
        format!("post {}.txt", sanitize_file_component(&self.0))
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self(UNKNOWN_ID.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<RawId>::deserialize(deserializer)? {
            Some(RawId::Text(text)) => RecordId(text),
            Some(RawId::Number(number)) => RecordId(number.to_string()),
            None => RecordId::default(),
        })
    }
}

/// One post as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl Record {
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(id),
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Replaces characters Windows refuses in file names.
fn sanitize_file_component(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_text_ids_deserialize() {
        let records: Vec<Record> = serde_json::from_str(
            r#"[{"userId": 1, "id": 3, "title": "t", "body": "b"},
                {"id": "abc", "title": "t2", "body": "b2"}]"#,
        )
        .unwrap();
        assert_eq!(records[0].id.as_str(), "3");
        assert_eq!(records[1].id.as_str(), "abc");
        assert_eq!(records[1].title, "t2");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let record: Record = serde_json::from_str(r#"{"title": "only title"}"#).unwrap();
        assert_eq!(record.id.as_str(), "unknown");
        assert_eq!(record.body, "");

        let record: Record = serde_json::from_str(r#"{"id": null}"#).unwrap();
        assert_eq!(record.id, RecordId::default());
    }

    #[test]
    fn file_name_embeds_id() {
        assert_eq!(RecordId::new("1").file_name(), "post 1.txt");
        assert_eq!(RecordId::new("42").file_name(), "post 42.txt");
    }

    #[test]
    fn file_name_replaces_illegal_characters() {
        assert_eq!(RecordId::new("a/b:c").file_name(), "post a-b-c.txt");
        assert_eq!(RecordId::new("x\ty").file_name(), "post x-y.txt");
    }
}
