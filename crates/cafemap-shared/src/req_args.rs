//! This module stores the expected format of the arguments for the requests

use std::fmt::Debug;

use secrecy::{ExposeSecret, SecretString};

use crate::errors::CredentialsError;

#[derive(Clone)]
pub struct LoginReqArgs {
    pub email: String,
    pub password: SecretString,
}

impl LoginReqArgs {
    pub fn new<S: Into<String>>(email: S, password: SecretString) -> Self {
        Self {
            email: email.into(),
            password,
        }
    }

    /// Fail-fast check that has to pass before any network call is made
    pub fn validated(&self) -> Result<(), CredentialsError> {
        if self.email.trim().is_empty() || self.password.expose_secret().trim().is_empty() {
            return Err(CredentialsError);
        }
        Ok(())
    }
}

impl Debug for LoginReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginReqArgs")
            .field("email", &self.email)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .finish()
    }
}
