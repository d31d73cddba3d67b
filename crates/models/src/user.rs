use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Registered account. The password is kept as an opaque credential; hashing
/// policy belongs to the authentication layer, not the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Insert model: id is assigned by the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl NewUser {
    /// Registration rules: username >= 3 chars, password >= 6 chars, and a
    /// plausible email when one is given.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.username.trim().len() < 3 {
            return Err(ModelError::Validation(
                "username must be at least 3 characters".into(),
            ));
        }
        if self.password.len() < 6 {
            return Err(ModelError::Validation(
                "password must be at least 6 characters".into(),
            ));
        }
        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err(ModelError::Validation("invalid email".into()));
            }
        }
        Ok(())
    }

    pub fn into_user(self, id: u32) -> User {
        User {
            id,
            username: self.username,
            password: self.password,
            full_name: self.full_name,
            email: self.email,
        }
    }
}
