use super::*;

use crate::error::REQUIRED_FIELDS;

fn filled() -> SignUpForm {
    SignUpForm {
        name: "Ali".to_string(),
        phone: "+998901234567".to_string(),
        reg_key: "k".to_string(),
        password: "secret".to_string(),
        confirm_password: "secret".to_string(),
    }
}

#[test]
fn mismatched_passwords_are_rejected() {
    let mut form = filled();
    form.confirm_password = "other".to_string();
    assert_eq!(
        form.validate().unwrap_err().user_message(),
        "Passwords do not match."
    );
}

#[test]
fn missing_fields_are_rejected_first() {
    let mut form = filled();
    form.reg_key = "  ".to_string();
    form.confirm_password = "other".to_string();
    assert_eq!(form.validate().unwrap_err().user_message(), REQUIRED_FIELDS);
}

#[test]
fn valid_form_builds_request() {
    let req = filled().validate().unwrap();
    assert_eq!(req.name, "Ali");
    assert_eq!(req.password, "secret");
}
