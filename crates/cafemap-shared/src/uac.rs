//! Shared items related to user accounts

use std::fmt::Display;

use egui::WidgetText;

use crate::{errors::ConversionError, token::AuthToken};

/// Represents a username and is constrained to not be an empty string
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

/// Display name of the role a user holds on the backend
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct RoleName(String);

impl Username {
    pub const MAX_LENGTH: usize = 50;
}

impl RoleName {
    pub const MAX_LENGTH: usize = 30;
}

impl TryFrom<String> for Username {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ConversionError::Empty);
        }
        if value.len() > Self::MAX_LENGTH {
            return Err(ConversionError::MaxExceeded {
                max: Self::MAX_LENGTH,
                actual: value.len(),
            });
        }
        Ok(Self(value))
    }
}

impl TryFrom<&str> for Username {
    type Error = ConversionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.to_string().try_into()
    }
}

impl TryFrom<String> for RoleName {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ConversionError::Empty);
        }
        if value.len() > Self::MAX_LENGTH {
            return Err(ConversionError::MaxExceeded {
                max: Self::MAX_LENGTH,
                actual: value.len(),
            });
        }
        Ok(Self(value))
    }
}

impl TryFrom<&str> for RoleName {
    type Error = ConversionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.to_string().try_into()
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl From<RoleName> for String {
    fn from(value: RoleName) -> Self {
        value.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RoleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for RoleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&Username> for WidgetText {
    fn from(value: &Username) -> Self {
        (&value.0).into()
    }
}

impl From<&RoleName> for WidgetText {
    fn from(value: &RoleName) -> Self {
        (&value.0).into()
    }
}

/// Stores the user info that is returned on login and session validation.
/// Never persisted; always re-derived from a server round trip.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub username: Username,
    pub role: RoleName,
}

/// Body of a login response. The backend answers rejected logins with the
/// same shape, `success` false and `message` set.
#[derive(Debug, serde::Deserialize)]
pub struct LoginApiResponse {
    pub success: bool,
    #[serde(default)]
    pub token: Option<AuthToken>,
    #[serde(default)]
    pub user: Option<UserInfo>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of the session validation endpoint
#[derive(Debug, serde::Deserialize)]
pub struct MeResponse {
    pub user: UserInfo,
}
