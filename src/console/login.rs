//! Login form rules. The form only checks shape; whether the code is right is
//! the server's call.

use crate::{api::ApiError, session::LoginRequest};
use regex::Regex;

/// Mainland mobile numbers: 11 digits starting with 13-19.
const MOBILE_PATTERN: &str = r"^1[3-9]\d{9}$";
pub const CODE_MAX_LEN: usize = 6;

#[derive(Clone, Default)]
pub struct LoginForm {
    pub mobile: String,
    pub code: String,
}

impl LoginForm {
    #[must_use]
    pub fn new(mobile: &str, code: &str) -> Self {
        Self {
            mobile: mobile.to_string(),
            code: code.to_string(),
        }
    }

    /// Checks the fields and produces the request the session store sends.
    ///
    /// # Errors
    /// Returns `ApiError::Validation` naming the first field that fails.
    pub fn validate(&self) -> Result<LoginRequest, ApiError> {
        let mobile = self.mobile.trim();
        if mobile.is_empty() {
            return Err(ApiError::Validation("Mobile number is required.".to_string()));
        }
        if !valid_mobile(mobile) {
            return Err(ApiError::Validation(
                "Mobile number format is invalid.".to_string(),
            ));
        }

        let code = self.code.trim();
        if code.is_empty() {
            return Err(ApiError::Validation(
                "Verification code is required.".to_string(),
            ));
        }
        if code.chars().count() > CODE_MAX_LEN {
            return Err(ApiError::Validation(format!(
                "Verification code must be at most {CODE_MAX_LEN} characters."
            )));
        }

        Ok(LoginRequest {
            mobile: mobile.to_string(),
            code: code.to_string(),
        })
    }
}

pub fn valid_mobile(mobile: &str) -> bool {
    Regex::new(MOBILE_PATTERN).map_or(false, |re| re.is_match(mobile))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_well_formed_form() -> Result<(), ApiError> {
        let request = LoginForm::new(" 13800001111 ", "123456").validate()?;
        assert_eq!(request.mobile, "13800001111");
        assert_eq!(request.code, "123456");
        Ok(())
    }

    #[test]
    fn mobile_rules() {
        assert!(valid_mobile("13800001111"));
        assert!(valid_mobile("19912345678"));
        assert!(!valid_mobile("12800001111"));
        assert!(!valid_mobile("1380000111"));
        assert!(!valid_mobile("138000011112"));
        assert!(!valid_mobile("1380000111a"));

        assert!(matches!(
            LoginForm::new("", "123456").validate(),
            Err(ApiError::Validation(message)) if message.contains("required")
        ));
        assert!(matches!(
            LoginForm::new("23800001111", "123456").validate(),
            Err(ApiError::Validation(message)) if message.contains("format")
        ));
    }

    #[test]
    fn code_rules() {
        assert!(matches!(
            LoginForm::new("13800001111", "  ").validate(),
            Err(ApiError::Validation(message)) if message.contains("required")
        ));
        assert!(matches!(
            LoginForm::new("13800001111", "1234567").validate(),
            Err(ApiError::Validation(message)) if message.contains("at most 6")
        ));
    }
}
