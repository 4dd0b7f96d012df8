//! Input validation helpers
//!
//! Text length limits and money checks shared by the CRUD handlers.
//! SQLite TEXT has no built-in length enforcement, so limits are applied
//! at the boundary.

use crate::utils::AppError;

/// Entity names: dish, category, snapshot names on order lines
pub const MAX_NAME_LEN: usize = 200;

/// Maximum accepted monetary amount per unit
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate a monetary amount: finite, non-negative and within bounds.
pub fn validate_non_negative_money(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "{field} must be a finite number, got {value}"
        )));
    }
    if value < 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    if value > MAX_PRICE {
        return Err(AppError::validation(format!(
            "{field} exceeds maximum allowed ({MAX_PRICE}), got {value}"
        )));
    }
    Ok(())
}

/// Validate a monetary amount that must additionally be strictly positive.
pub fn validate_positive_money(value: f64, field: &str) -> Result<(), AppError> {
    validate_non_negative_money(value, field)?;
    if value == 0.0 {
        return Err(AppError::validation(format!("{field} must be positive")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_rejects_empty_and_whitespace() {
        assert!(validate_required_text("Paella", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_required_text_rejects_overlong() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_text(&long, "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_money_rejects_nan_infinity_negative() {
        assert!(validate_non_negative_money(0.0, "unit_price").is_ok());
        assert!(validate_non_negative_money(12.5, "unit_price").is_ok());
        assert!(validate_non_negative_money(f64::NAN, "unit_price").is_err());
        assert!(validate_non_negative_money(f64::INFINITY, "unit_price").is_err());
        assert!(validate_non_negative_money(-0.01, "unit_price").is_err());
        assert!(validate_non_negative_money(MAX_PRICE + 1.0, "unit_price").is_err());
    }

    #[test]
    fn test_positive_money_rejects_zero() {
        assert!(validate_positive_money(0.01, "ordered_unit_price").is_ok());
        assert!(validate_positive_money(0.0, "ordered_unit_price").is_err());
    }
}
