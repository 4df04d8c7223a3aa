use hyperschool_common::forms::{char_field, secret_field, FormErrors, NON_FIELD};
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const USERNAME_MAX_LENGTH: usize = 150;
pub const PASSWORD_MIN_LENGTH: usize = 8;

pub const INVALID_USERNAME: &str =
    "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.";
pub const DUPLICATE_USERNAME: &str = "A user with that username already exists.";
pub const PASSWORD_MISMATCH: &str = "The two password fields didn’t match.";
pub const INVALID_LOGIN: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";
pub const INACTIVE: &str = "This account is inactive.";

lazy_static::lazy_static! {
    static ref USERNAME: Regex = Regex::new(r"^[\w.@+-]+$").unwrap();
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SignUpInput {
    pub username: String,
    #[serde(skip_serializing)]
    pub password1: String,
    #[serde(skip_serializing)]
    pub password2: String,
}

#[derive(Debug, PartialEq)]
pub struct SignUp {
    pub username: String,
    pub password: String,
}

impl SignUpInput {
    /// Validates everything that does not need the database; username
    /// uniqueness is checked on save.
    pub fn clean(&self) -> Result<SignUp, FormErrors> {
        let mut errors = FormErrors::new();

        let username = char_field(&mut errors, "username", &self.username, USERNAME_MAX_LENGTH);
        let username = match username {
            Some(name) if !USERNAME.is_match(&name) => {
                errors.add("username", INVALID_USERNAME);
                None
            }
            other => other,
        };
        let password1 = secret_field(&mut errors, "password1", &self.password1);
        let password2 = secret_field(&mut errors, "password2", &self.password2);

        if let (Some(p1), Some(p2)) = (&password1, &password2) {
            if p1 != p2 {
                errors.add("password2", PASSWORD_MISMATCH);
            } else {
                for problem in password_problems(p2, username.as_deref()) {
                    errors.add("password2", problem);
                }
            }
        }

        match (username, password1) {
            (Some(username), Some(password)) if errors.is_empty() => {
                Ok(SignUp { username, password })
            }
            _ => Err(errors),
        }
    }
}

/// Password strength rules; every broken rule yields one message.
pub fn password_problems(password: &str, username: Option<&str>) -> Vec<String> {
    let mut problems = Vec::new();
    if let Some(name) = username {
        if password.to_lowercase() == name.to_lowercase() {
            problems.push("The password is too similar to the username.".to_string());
        }
    }
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        problems.push(format!(
            "This password is too short. It must contain at least {} characters.",
            PASSWORD_MIN_LENGTH
        ));
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        problems.push("This password is entirely numeric.".to_string());
    }
    problems
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoginInput {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

#[derive(Debug, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl LoginInput {
    pub fn clean(&self) -> Result<Credentials, FormErrors> {
        let mut errors = FormErrors::new();
        let username = char_field(&mut errors, "username", &self.username, USERNAME_MAX_LENGTH);
        let password = secret_field(&mut errors, "password", &self.password);
        match (username, password) {
            (Some(username), Some(password)) => Ok(Credentials { username, password }),
            _ => Err(errors),
        }
    }
}

pub fn login_error(message: &str) -> FormErrors {
    let mut errors = FormErrors::new();
    errors.add(NON_FIELD, message);
    errors
}
