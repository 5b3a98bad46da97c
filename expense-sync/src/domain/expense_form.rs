//! Input validation for the add-expense and account forms.
//!
//! All checks run before any state is touched, so a rejected submission never
//! mutates the collection or reaches the network.

use shared::Category;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Amount must be a positive number, got '{0}'")]
    InvalidAmount(String),
    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// A form submission that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub title: String,
    pub amount: f64,
    pub category: Category,
}

/// Validate the raw add-expense form input
pub fn validate_expense_input(
    title: &str,
    amount_text: &str,
    category: Category,
) -> Result<ExpenseDraft, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::MissingField("title"));
    }
    if amount_text.trim().is_empty() {
        return Err(ValidationError::MissingField("amount"));
    }

    let amount = parse_amount(amount_text)?;

    Ok(ExpenseDraft {
        title: title.to_string(),
        amount,
        category,
    })
}

/// Parse an amount, accepting only finite values greater than zero
pub fn parse_amount(amount_text: &str) -> Result<f64, ValidationError> {
    let cleaned = amount_text.trim();
    match cleaned.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(ValidationError::InvalidAmount(cleaned.to_string())),
    }
}

pub fn validate_credentials(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::MissingField("email"));
    }
    if password.is_empty() {
        return Err(ValidationError::MissingField("password"));
    }
    Ok(())
}

pub fn validate_registration(
    full_name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), ValidationError> {
    if full_name.trim().is_empty() {
        return Err(ValidationError::MissingField("full name"));
    }
    validate_credentials(email, password)?;
    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}
