use crate::const_config::client::AUTH_HEADER_SCHEME;

/// Opaque bearer credential issued by the backend. This is the only piece of
/// session state that survives a restart.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Value for the `Authorization` header on authenticated requests
    pub fn header_value(&self) -> String {
        format!("{AUTH_HEADER_SCHEME} {}", self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for AuthToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for AuthToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_value_carries_the_scheme() {
        let token = AuthToken::from("abc123");

        assert_eq!(token.header_value(), "Token abc123");
    }
}
