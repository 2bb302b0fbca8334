use serde::Deserialize;

use super::{Checker, FieldErrors, Validate};

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

fn check_email(check: &mut Checker, email: Option<String>) -> Option<String> {
    let email = check.text("email", email)?.to_ascii_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') && !domain.starts_with('.') => {
            Some(email)
        }
        _ => {
            check.fail("email", "must be a valid email address");
            None
        }
    }
}

impl Validate for RegisterRequest {
    type Output = Registration;

    fn validate(self) -> Result<Registration, FieldErrors> {
        let mut check = Checker::default();
        let name = check.text("name", self.name);
        let email = check_email(&mut check, self.email);
        let password = check
            .require("password", self.password)
            .filter(|p| {
                if p.chars().count() < MIN_PASSWORD_LEN {
                    check.fail("password", format!("must be at least {MIN_PASSWORD_LEN} characters"));
                    return false;
                }
                true
            });

        check.finish(|| Some(Registration { name: name?, email: email?, password: password? }))
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    type Output = Credentials;

    fn validate(self) -> Result<Credentials, FieldErrors> {
        let mut check = Checker::default();
        let email = check.text("email", self.email);
        let password = check.require("password", self.password).filter(|p| !p.is_empty());
        if password.is_none() {
            check.fail("password", "is required");
        }

        check.finish(|| Some(Credentials { email: email?, password: password? }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn registration_lowercases_email() {
        let reg = serde_json::from_value::<RegisterRequest>(json!({
            "name": "Admin",
            "email": "Admin@Example.COM",
            "password": "secret123"
        }))
        .unwrap()
        .validate()
        .unwrap();
        assert_eq!(reg.email, "admin@example.com");
    }

    #[test]
    fn registration_rejects_bad_email_and_short_password() {
        let errors = serde_json::from_value::<RegisterRequest>(json!({
            "name": "Admin",
            "email": "not-an-email",
            "password": "123"
        }))
        .unwrap()
        .validate()
        .unwrap_err();
        assert_eq!(errors["email"], "must be a valid email address");
        assert_eq!(errors["password"], "must be at least 6 characters");
    }

    #[test]
    fn login_needs_both_fields() {
        let errors = serde_json::from_value::<LoginRequest>(json!({ "email": "a@b.co", "password": "" }))
            .unwrap()
            .validate()
            .unwrap_err();
        assert!(errors.contains_key("password"));
        assert!(!errors.contains_key("email"));
    }
}
