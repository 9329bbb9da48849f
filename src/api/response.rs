//! API response types
//!
//! School records are server-authored; the client only reads them. The
//! decoder is lenient about representation (numeric ids and contacts,
//! `email` or `email_id`, null image paths) but not about shape.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Server-assigned school identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchoolId {
    Number(u64),
    Text(String),
}

impl fmt::Display for SchoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchoolId::Number(n) => write!(f, "{}", n),
            SchoolId::Text(s) => f.write_str(s),
        }
    }
}

/// A school as returned by `GET /api/schools`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    pub id: SchoolId,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub city: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub state: String,
    /// Image path relative to the asset origin
    #[serde(default, deserialize_with = "lenient_string")]
    pub image: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub contact: String,
    #[serde(default, alias = "email_id", deserialize_with = "lenient_string")]
    pub email: String,
}

/// Body of a failed create request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Extract the server message from a raw body, if it is JSON and has one
    pub fn message_from(body: &[u8]) -> Option<String> {
        serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty())
    }
}

/// Accept strings, numbers and null where the client wants a string
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, found {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_school_list() {
        let body = json!([
            {
                "id": 1,
                "name": "Green Valley",
                "address": "12 Orchard Road",
                "city": "Austin",
                "state": "TX",
                "contact": 5125550100u64,
                "image": "schoolImages/1.png",
                "email_id": "office@gv.edu"
            },
            {
                "id": "b-2",
                "name": "Blue Ridge",
                "address": "9 Hill St",
                "city": "Dallas",
                "state": "TX",
                "contact": "2145550100",
                "image": null,
                "email": "info@br.edu"
            }
        ]);

        let schools: Vec<School> = serde_json::from_value(body).unwrap();
        assert_eq!(schools.len(), 2);
        assert_eq!(schools[0].id, SchoolId::Number(1));
        assert_eq!(schools[0].contact, "5125550100");
        assert_eq!(schools[0].email, "office@gv.edu");
        assert_eq!(schools[1].id.to_string(), "b-2");
        assert_eq!(schools[1].image, "");
        assert_eq!(schools[1].email, "info@br.edu");
    }

    #[test]
    fn test_decode_rejects_non_scalar() {
        let body = json!({"id": 1, "name": "X", "city": {"nested": true}});
        assert!(serde_json::from_value::<School>(body).is_err());
    }

    #[test]
    fn test_error_body_message() {
        assert_eq!(
            ErrorBody::message_from(br#"{"message":"Duplicate school"}"#),
            Some("Duplicate school".to_string())
        );
        assert_eq!(ErrorBody::message_from(br#"{"error":"x"}"#), None);
        assert_eq!(ErrorBody::message_from(br#"{"message":""}"#), None);
        assert_eq!(ErrorBody::message_from(b"<html>502</html>"), None);
    }
}
