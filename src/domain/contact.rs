use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{AppError, Field};
use crate::validation::{validate_name, validate_phone};

pub type UserId = i64;
pub type ContactId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub contact_id: ContactId,
    pub name: String,
    pub phone: String,
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub user_id: UserId,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// Human readable validation rules.
pub struct ValidationReq;

impl ValidationReq {
    pub fn name_req() -> String {
        "Name must be two words separated by a single space, each starting with an uppercase \
        letter followed only by lowercase letters"
            .to_string()
    }

    pub fn phone_req() -> String {
        "Number must contain 11 digits, begin with 0 followed by one of the area codes \
        212, 412, 414, 424, 416, 426"
            .to_string()
    }
}

/// Request body for create and update, exactly as the client sent it.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ContactPayload {
    #[serde(default, deserialize_with = "deserialize_text_field")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text_field")]
    pub phone: Option<String>,
}

// A field that is not a JSON string counts as absent, without touching its sibling
fn deserialize_text_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(text)) => Some(text),
        _ => None,
    })
}

impl ContactPayload {
    pub fn new(name: &str, phone: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            phone: Some(phone.to_string()),
        }
    }

    /// Checks name first, then phone, and only then hands out the fields
    /// the store is allowed to persist.
    pub fn validate(self) -> Result<ContactFields, AppError> {
        if !validate_name(self.name.as_deref()) {
            return Err(AppError::InvalidInput(Field::Name));
        }

        if !validate_phone(self.phone.as_deref()) {
            return Err(AppError::InvalidInput(Field::Phone));
        }

        Ok(ContactFields {
            name: self.name.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
        })
    }
}

/// A name and phone pair that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFields {
    name: String,
    phone: String,
}

impl ContactFields {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}
