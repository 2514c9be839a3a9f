use crate::error::AppError;

/// Validate an email address: one `@`, non-empty local part, and a domain
/// with at least one dot. Deliberately loose; deliverability is not checked.
pub fn validate_email(email: &str, field: &str) -> Result<(), AppError> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(' ')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "{field} must be a valid email address"
        )))
    }
}

/// Validate an http(s) URL field.
pub fn validate_url(url: &str, field: &str) -> Result<(), AppError> {
    let url = url.trim();
    let valid = (url.strip_prefix("https://").or_else(|| url.strip_prefix("http://")))
        .is_some_and(|rest| !rest.is_empty() && !url.contains(' '));
    if valid {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "{field} must be a valid http(s) URL"
        )))
    }
}

/// Validate a trimmed string against a minimum character count.
pub fn validate_min_chars(value: &str, min: usize, field: &str) -> Result<(), AppError> {
    if value.trim().chars().count() < min {
        return Err(AppError::Validation(format!(
            "{field} must be at least {min} characters"
        )));
    }
    Ok(())
}

/// Validate a trimmed, non-empty string with an upper length bound.
pub fn validate_non_empty(value: &str, max: usize, field: &str) -> Result<(), AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be 1-{max} characters"
        )));
    }
    Ok(())
}
