use serde::Serialize;
use thiserror::Error;

// Validation failures surfaced next to the registration form fields. The
// messages are the exact strings the form renders.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Name is required")]
    EmptyName,

    #[error("Please enter a valid name with only alphabets.")]
    InvalidName,

    #[error("Please enter your email id")]
    EmptyEmail,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Please Fill The Details According to the Mentioned Format")]
    WeakPassword(PasswordCriteria),
}

// Characters that count towards the special-character rule
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*()_+[]{};':\"\\|,.<>/?";

// Live password-strength feedback: five independent checks, re-evaluated on
// every keystroke. Each unmet check maps to a hint under the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordCriteria {
    pub uppercase: bool,
    pub lowercase: bool,
    pub numeric: bool,
    pub special: bool,
    pub min_length: bool,
}

impl PasswordCriteria {
    pub fn evaluate(password: &str) -> Self {
        Self {
            uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            numeric: password.chars().any(|c| c.is_ascii_digit()),
            special: password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)),
            min_length: password.chars().count() >= 8,
        }
    }

    pub fn satisfied(&self) -> bool {
        self.uppercase && self.lowercase && self.numeric && self.special && self.min_length
    }

    pub fn unmet_hints(&self) -> Vec<&'static str> {
        let mut hints = Vec::new();
        if !self.uppercase {
            hints.push("Contain at least 1 uppercase character");
        }
        if !self.numeric {
            hints.push("Contain at least 1 numeric value");
        }
        if !self.special {
            hints.push("Contain at least one special character");
        }
        if !self.lowercase {
            hints.push("Contain any number of lowercase characters");
        }
        if !self.min_length {
            hints.push("Minimum password length should be 8");
        }
        hints
    }
}

pub fn validate_name(name: &str) -> Result<(), RegistrationError> {
    if name.trim().is_empty() {
        return Err(RegistrationError::EmptyName);
    }
    if !name.chars().all(|c| c.is_alphabetic() || c.is_whitespace()) {
        return Err(RegistrationError::InvalidName);
    }
    Ok(())
}

// Structural check only: one '@', a dot in the domain, no blanks. Whether
// the address actually exists is the server's problem.
pub fn validate_email(email: &str) -> Result<(), RegistrationError> {
    if email.trim().is_empty() {
        return Err(RegistrationError::EmptyEmail);
    }
    if email.contains(char::is_whitespace) {
        return Err(RegistrationError::InvalidEmail);
    }

    let (local, domain) = match email.split_once('@') {
        Some(parts) => parts,
        None => return Err(RegistrationError::InvalidEmail),
    };
    if local.is_empty() || domain.contains('@') {
        return Err(RegistrationError::InvalidEmail);
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(RegistrationError::InvalidEmail),
    }
}

// Body of the register call. Only constructible from fields that pass every
// check, so the client never sends a payload the form would reject.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validated(name: &str, email: &str, password: &str) -> Result<Self, RegistrationError> {
        validate_name(name)?;
        validate_email(email)?;

        let criteria = PasswordCriteria::evaluate(password);
        if !criteria.satisfied() {
            return Err(RegistrationError::WeakPassword(criteria));
        }

        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}
