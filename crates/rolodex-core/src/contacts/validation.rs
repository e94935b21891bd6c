//! Contact validation.

/// Validation error for contact fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Name is empty.
    EmptyName,
    /// Email address is empty.
    EmptyEmail,
    /// Email address format is invalid.
    InvalidEmail,
    /// Phone number is empty.
    EmptyPhone,
}

impl ValidationError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::EmptyName => "Name is required",
            Self::EmptyEmail => "Email address is required",
            Self::InvalidEmail => "Please enter a valid email address",
            Self::EmptyPhone => "Phone number is required",
        }
    }

    /// Get the field name this error relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::EmptyEmail | Self::InvalidEmail => "email",
            Self::EmptyPhone => "phone",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Validate the fields of a contact before it enters the store.
///
/// Returns `Ok(())` if valid, or every failing field at once.
///
/// # Errors
///
/// Returns a vector of `ValidationError` if any fields are invalid.
pub fn validate_contact(name: &str, email: &str, phone: &str) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if name.trim().is_empty() {
        errors.push(ValidationError::EmptyName);
    }

    if email.trim().is_empty() {
        errors.push(ValidationError::EmptyEmail);
    } else if !is_valid_email(email) {
        errors.push(ValidationError::InvalidEmail);
    }

    if phone.trim().is_empty() {
        errors.push(ValidationError::EmptyPhone);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Basic `local@domain.tld` shape check.
///
/// No whitespace anywhere, exactly one `@`, a non-empty local part, and a
/// domain holding a `.` with at least one character on each side.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();

    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("user.name@example.com"));
        assert!(is_valid_email("user@sub.example.com"));
        assert!(is_valid_email("x@y.c"));
        assert!(is_valid_email("  padded@example.com  "));
    }

    #[test]
    fn test_invalid_email() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@example."));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("us er@example.com"));
    }

    #[test]
    fn test_validate_collects_every_field() {
        let errors = validate_contact("", "", " ").unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyName,
                ValidationError::EmptyEmail,
                ValidationError::EmptyPhone
            ]
        );
    }

    #[test]
    fn test_validate_bad_email_only() {
        let errors = validate_contact("Bob", "not-an-email", "123").unwrap_err();
        assert_eq!(errors, vec![ValidationError::InvalidEmail]);
        assert_eq!(errors[0].field(), "email");
    }

    #[test]
    fn test_validate_complete_contact() {
        assert!(validate_contact("Bob", "bob@x.com", "555").is_ok());
    }
}
