use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::utils::email::{is_contact_email, is_loose_email};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct ContactMeForm {
    #[validate(custom(function = "require_name"))]
    pub name: String,

    #[validate(custom(function = "validate_contact_email"))]
    pub email: String,

    #[serde(default)]
    pub phone: Option<String>,

    #[validate(custom(function = "require_description"))]
    pub message: String,
}

impl ContactMeForm {
    pub fn template_params(&self) -> BTreeMap<String, String> {
        let phone = self
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or("Not provided");

        BTreeMap::from([
            ("user_name".to_string(), self.name.trim().to_string()),
            ("user_email".to_string(), self.email.trim().to_string()),
            ("user_phone".to_string(), phone.to_string()),
            ("message".to_string(), self.message.trim().to_string()),
        ])
    }
}

/// The "hire me" modal on the landing page.
#[derive(Debug, Deserialize, Serialize, Validate)]
#[validate(schema(function = "validate_hire_request"))]
pub struct HireRequestForm {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub contact: String,

    #[serde(default)]
    pub description: String,
}

impl HireRequestForm {
    pub fn template_params(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("from_name".to_string(), self.name.trim().to_string()),
            ("from_email".to_string(), self.email.trim().to_string()),
            ("contact".to_string(), self.contact.trim().to_string()),
            ("description".to_string(), self.description.trim().to_string()),
        ])
    }
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct SubscribeForm {
    #[validate(custom(function = "validate_loose_email"))]
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactMeResponse {
    pub message: String,
}

// ───── Validation Helpers ───────────────────────────────────────────

fn message_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(msg.into());
    err
}

pub fn require_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(message_error("required", "Please enter your name."));
    }
    Ok(())
}

pub fn require_description(message: &str) -> Result<(), ValidationError> {
    if message.trim().is_empty() {
        return Err(message_error("required", "Please enter your project description."));
    }
    Ok(())
}

pub fn validate_contact_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(message_error("required", "Please enter your email."));
    }
    if !is_contact_email(email) {
        return Err(message_error("email", "Please enter a valid email address."));
    }
    Ok(())
}

pub fn validate_loose_email(email: &str) -> Result<(), ValidationError> {
    if !is_loose_email(email.trim()) {
        return Err(message_error("email", "Please enter a valid email address."));
    }
    Ok(())
}

fn validate_hire_request(form: &HireRequestForm) -> Result<(), ValidationError> {
    let missing = [&form.name, &form.email, &form.description]
        .iter()
        .any(|field| field.trim().is_empty());
    if missing {
        return Err(message_error("required", "Please fill in all required fields."));
    }
    validate_loose_email(&form.email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    fn contact_form() -> ContactMeForm {
        ContactMeForm {
            name: "Jane".into(),
            email: "jane@example.com".into(),
            phone: None,
            message: "Need a landing page".into(),
        }
    }

    fn messages(err: validator::ValidationErrors) -> Vec<String> {
        match AppError::from(err) {
            AppError::ValidationError(fields) => fields.into_iter().map(|f| f.message).collect(),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn blank_phone_is_sent_as_not_provided() {
        let params = contact_form().template_params();
        assert_eq!(params["user_phone"], "Not provided");
        assert_eq!(params["user_name"], "Jane");
    }

    #[test]
    fn contact_form_reports_each_missing_field() {
        let form = ContactMeForm {
            name: " ".into(),
            email: String::new(),
            phone: None,
            message: String::new(),
        };

        let messages = messages(form.validate().unwrap_err());
        assert!(messages.contains(&"Please enter your name.".to_string()));
        assert!(messages.contains(&"Please enter your email.".to_string()));
        assert!(messages.contains(&"Please enter your project description.".to_string()));
    }

    #[test]
    fn contact_form_rejects_malformed_email() {
        let form = ContactMeForm { email: "jane@example".into(), ..contact_form() };
        assert_eq!(messages(form.validate().unwrap_err()), vec!["Please enter a valid email address."]);
    }

    #[test]
    fn hire_form_requires_name_email_and_description() {
        let form = HireRequestForm {
            name: "Sam".into(),
            email: "sam@example.com".into(),
            contact: String::new(),
            description: String::new(),
        };
        assert_eq!(messages(form.validate().unwrap_err()), vec!["Please fill in all required fields."]);

        let form = HireRequestForm { description: "Shop".into(), ..form };
        assert!(form.validate().is_ok());
    }
}
