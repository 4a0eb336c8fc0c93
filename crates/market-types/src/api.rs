use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::ObjectId;
use crate::models::{Listing, Password};

// -- Password input --

/// A password as sent by clients: either a JSON integer or a decimal string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(serde_json::Number),
    Text(String),
}

impl NumericInput {
    /// True for the forms that count as absent: an empty string or the
    /// number zero. The string `"0"` is present.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Number(n) => n.as_f64() == Some(0.0),
            Self::Text(s) => s.trim().is_empty(),
        }
    }

    /// Integer value, or `None` when the input is not a whole number in range.
    pub fn to_password(&self) -> Option<Password> {
        match self {
            Self::Number(n) => n.as_i64().map(Password::new),
            Self::Text(s) => s.trim().parse::<i64>().ok().map(Password::new),
        }
    }
}

// -- Requests --

/// Fields are optional so that presence is checked by validation rather than
/// by deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct CreateProductRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub password: Option<NumericInput>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub password: Option<NumericInput>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteProductRequest {
    pub password: Option<NumericInput>,
}

// -- Responses --

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Projection used by the listing index.
#[derive(Debug, Serialize)]
pub struct ProductSummary {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub author: String,
    pub status: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Projection used by the detail view.
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub author: String,
    pub content: String,
    pub status: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<Listing> for ProductSummary {
    fn from(listing: Listing) -> Self {
        Self {
            id: listing.id,
            title: listing.title,
            author: listing.author,
            status: listing.status,
            created_at: listing.created_at,
        }
    }
}

impl From<Listing> for ProductDetail {
    fn from(listing: Listing) -> Self {
        Self {
            id: listing.id,
            title: listing.title,
            author: listing.author,
            content: listing.content,
            status: listing.status,
            created_at: listing.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password_of(json: &str) -> Option<Password> {
        let input: NumericInput = serde_json::from_str(json).unwrap();
        input.to_password()
    }

    #[test]
    fn password_accepts_numbers_and_digit_strings() {
        assert_eq!(password_of("1234"), Some(Password::new(1234)));
        assert_eq!(password_of("\"1234\""), Some(Password::new(1234)));
        assert_eq!(password_of("\" 42 \""), Some(Password::new(42)));
        assert_eq!(password_of("-7"), Some(Password::new(-7)));
    }

    #[test]
    fn password_rejects_non_integers() {
        assert_eq!(password_of("\"abcd\""), None);
        assert_eq!(password_of("12.5"), None);
        assert_eq!(password_of("\"12.5\""), None);
        assert_eq!(password_of("18446744073709551616"), None);
    }

    #[test]
    fn zero_number_counts_as_blank_but_zero_string_does_not() {
        let blank = |json: &str| serde_json::from_str::<NumericInput>(json).unwrap().is_blank();
        assert!(blank("0"));
        assert!(blank("0.0"));
        assert!(blank("\"\""));
        assert!(!blank("\"0\""));
        assert!(!blank("7"));
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let req: CreateProductRequest = serde_json::from_str(r#"{"title":"Phone"}"#).unwrap();
        assert_eq!(req.title.as_deref(), Some("Phone"));
        assert!(req.content.is_none());
        assert!(req.password.is_none());

        let req: DeleteProductRequest = serde_json::from_str(r#"{"password":null}"#).unwrap();
        assert!(req.password.is_none());
    }

    #[test]
    fn detail_uses_wire_field_names() {
        let listing = Listing {
            id: "65a1b2c3d4e5f60718293a4b".parse().unwrap(),
            title: "Phone".into(),
            content: "used".into(),
            author: "Alice".into(),
            password: Password::new(1234),
            status: "FOR_SALE".into(),
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            updated_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        };
        let json = serde_json::to_value(ProductDetail::from(listing)).unwrap();
        assert_eq!(json["_id"], "65a1b2c3d4e5f60718293a4b");
        assert_eq!(json["createdAt"], "2023-11-14T22:13:20Z");
        assert!(json.get("password").is_none());
        assert!(json.get("updatedAt").is_none());
    }
}
