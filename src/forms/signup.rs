use crate::error::ApiError;
use crate::remote::SignUpRequest;

pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub name: String,
    pub phone: String,
    pub reg_key: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    pub fn validate(&self) -> Result<SignUpRequest, ApiError> {
        let name = self.name.trim();
        let phone = self.phone.trim();
        let reg_key = self.reg_key.trim();
        if name.is_empty()
            || phone.is_empty()
            || reg_key.is_empty()
            || self.password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(ApiError::required_fields());
        }
        if self.password != self.confirm_password {
            return Err(ApiError::validation(PASSWORDS_DO_NOT_MATCH));
        }
        Ok(SignUpRequest {
            name: name.to_string(),
            phone: phone.to_string(),
            reg_key: reg_key.to_string(),
            password: self.password.clone(),
        })
    }
}

#[cfg(test)]
#[path = "../tests/forms/signup_tests.rs"]
mod tests;
