use thiserror::Error;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Empty not allowed")]
    Empty,
    #[error("Maximum length exceeded. {max} allowed but found {actual}")]
    MaxExceeded { max: usize, actual: usize },
}

/// Shown inline when either credential field is empty after trimming, before
/// any network call is attempted
#[derive(Debug, Error, PartialEq, Eq)]
#[error("이메일과 비밀번호를 입력해주세요.")]
pub struct CredentialsError;
