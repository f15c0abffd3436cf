//! Lenient request-body parsing for the users routes.
//!
//! Bodies are read as raw bytes rather than through `web::Json`, so a
//! malformed or absent body never short-circuits a route before its
//! existence check. A field counts as provided only when it is a JSON
//! string; anything else is treated as missing and left to domain
//! validation.

use serde_json::Value;

use crate::domain::{UserDraft, UserId};

/// Request body fields for create and update.
///
/// # Examples
/// ```
/// use users_api::inbound::http::payload::UserPayload;
///
/// let payload = UserPayload::from_body(br#"{"name":"Ana","bio":42}"#);
/// assert_eq!(payload.name.as_deref(), Some("Ana"));
/// assert!(payload.bio.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPayload {
    /// Requested identifier when it is a JSON integer.
    pub id: Option<i64>,
    /// `name` when it is a JSON string.
    pub name: Option<String>,
    /// `bio` when it is a JSON string.
    pub bio: Option<String>,
}

impl UserPayload {
    /// Parse a raw body; unparsable or non-object bodies yield no fields.
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(fields)) => Self {
                id: fields.get("id").and_then(Value::as_i64),
                name: string_field(fields.get("name")),
                bio: string_field(fields.get("bio")),
            },
            _ => Self::default(),
        }
    }

    /// Convert to a domain draft. Non-positive identifiers are dropped so
    /// storage assigns one.
    pub fn into_draft(self) -> UserDraft {
        UserDraft {
            id: self.id.and_then(|value| UserId::new(value).ok()),
            name: self.name,
            bio: self.bio,
        }
    }
}

fn string_field(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(b"".as_slice())]
    #[case(b"not json".as_slice())]
    #[case(b"[1,2]".as_slice())]
    #[case(b"null".as_slice())]
    fn unusable_bodies_yield_no_fields(#[case] body: &[u8]) {
        assert_eq!(UserPayload::from_body(body), UserPayload::default());
    }

    #[rstest]
    fn reads_all_fields() {
        let payload = UserPayload::from_body(br#"{"id":7,"name":"Ana","bio":"Engineer"}"#);
        assert_eq!(
            payload,
            UserPayload {
                id: Some(7),
                name: Some("Ana".to_owned()),
                bio: Some("Engineer".to_owned()),
            }
        );
    }

    #[rstest]
    #[case(r#"{"id":"7","name":"Ana","bio":"x"}"#)]
    #[case(r#"{"id":1.5,"name":"Ana","bio":"x"}"#)]
    #[case(r#"{"id":null,"name":"Ana","bio":"x"}"#)]
    fn non_integer_ids_are_ignored(#[case] body: &str) {
        assert!(UserPayload::from_body(body.as_bytes()).id.is_none());
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    fn non_positive_ids_are_dropped_from_draft(#[case] id: i64) {
        let payload = UserPayload {
            id: Some(id),
            name: Some("Ana".to_owned()),
            bio: Some("x".to_owned()),
        };
        assert!(payload.into_draft().id.is_none());
    }

    #[rstest]
    #[case(r#"{"name":7,"bio":"x"}"#)]
    #[case(r#"{"name":true,"bio":"x"}"#)]
    #[case(r#"{"name":[1],"bio":"x"}"#)]
    #[case(r#"{"name":{"first":"Ana"},"bio":"x"}"#)]
    fn truthy_non_strings_count_as_missing(#[case] body: &str) {
        let payload = UserPayload::from_body(body.as_bytes());
        assert!(payload.name.is_none());
        assert_eq!(payload.bio.as_deref(), Some("x"));
    }

    #[rstest]
    fn empty_strings_are_kept_for_validation() {
        let payload = UserPayload::from_body(br#"{"name":"","bio":null}"#);
        assert_eq!(payload.name.as_deref(), Some(""));
        assert!(payload.bio.is_none());
    }
}
