//! Field checks shared by the login and registration forms

/// The backend rejects shorter passwords
pub const MIN_PASSWORD_LENGTH: usize = 8;

pub fn validate_email(value: &str) -> Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("Email is required".to_string());
    }

    let valid = value
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        });
    if valid {
        Ok(())
    } else {
        Err("Please enter a valid email".to_string())
    }
}

/// Login only requires a value; strength is checked at registration
pub fn validate_login_password(value: &str) -> Result<(), String> {
    if value.is_empty() {
        Err("Password is required".to_string())
    } else {
        Ok(())
    }
}

pub fn validate_new_password(value: &str) -> Result<(), String> {
    validate_login_password(value)?;
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ));
    }
    Ok(())
}

pub fn validate_confirmation(password: &str, confirm: &str) -> Result<(), String> {
    if confirm.is_empty() {
        Err("Please confirm your password".to_string())
    } else if password != confirm {
        Err("Passwords do not match".to_string())
    } else {
        Ok(())
    }
}

/// Trimmed value, `None` when blank
pub fn optional_field(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
