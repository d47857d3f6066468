use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Email/password pair submitted to the credentials sign-in callback.
#[derive(Clone, Default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Read the fields of a JSON body. Only string members of an object count;
    /// anything else (arrays, numbers, null) leaves the field empty.
    pub fn from_json(body: &Value) -> Self {
        let field = |name: &str| {
            body.as_object()
                .and_then(|object| object.get(name))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        Self::new(field("email"), field("password"))
    }

    /// Read the fields of an `application/x-www-form-urlencoded` body. Other
    /// form fields (`csrfToken`, `callbackUrl`) are ignored.
    pub fn from_form(body: &[u8]) -> Self {
        let mut credentials = Self::default();
        for (key, value) in url::form_urlencoded::parse(body) {
            match key.as_ref() {
                "email" => credentials.email = value.into_owned(),
                "password" => credentials.password = value.into_owned(),
                _ => {}
            }
        }
        credentials
    }

    /// Both fields present. No format validation is applied.
    pub fn is_complete(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// Verified user record. Only the authenticator's success path creates one.
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    id: String,
    email: String,
    name: String,
    role: Role,
    access_token: String,
}

impl Identity {
    pub(in crate::auth) fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
        role: Role,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            role,
            access_token: access_token.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("name", &self.name)
            .field("role", &self.role)
            .field("access_token", &"[redacted]")
            .finish()
    }
}
