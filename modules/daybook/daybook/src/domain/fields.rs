//! Field names used in validation errors, and the shared checks.

use super::error::DomainError;

pub struct FocusFields;

impl FocusFields {
    pub const MAIN_FOCUS: &'static str = "mainFocus";
    pub const NOTES: &'static str = "notes";
    pub const REFLECTION: &'static str = "reflection";
    pub const CUSTOM_TASKS: &'static str = "customTasks";
}

pub struct PlanFields;

impl PlanFields {
    pub const GOALS: &'static str = "goals";
}

pub struct ExpenseFields;

impl ExpenseFields {
    pub const AMOUNT: &'static str = "amount";
    pub const CATEGORY: &'static str = "category";
    pub const DESCRIPTION: &'static str = "description";
}

pub struct MealFields;

impl MealFields {
    pub const NAME: &'static str = "name";
    pub const QUERY: &'static str = "query";
}

pub struct AccountFields;

impl AccountFields {
    pub const NAME: &'static str = "name";
    pub const EMAIL: &'static str = "email";
    pub const PASSWORD: &'static str = "password";
    pub const TARGET: &'static str = "target";
}

/// Reject text longer than `max` characters.
pub fn max_len(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    let len = value.chars().count();
    if len > max {
        return Err(DomainError::validation(
            field,
            format!("must be at most {max} characters (got {len})"),
        ));
    }
    Ok(())
}

/// Reject empty or whitespace-only text, then apply [`max_len`].
pub fn required_text(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(field, "must not be empty"));
    }
    max_len(field, value, max)
}

/// Reject NaN, infinities and negatives.
pub fn non_negative(field: &str, value: f64) -> Result<(), DomainError> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::validation(
            field,
            "must be a finite, non-negative number",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_len_counts_characters_not_bytes() {
        assert!(max_len("notes", "\u{e9}\u{e9}\u{e9}", 3).is_ok());
        assert!(max_len("notes", "\u{e9}\u{e9}\u{e9}\u{e9}", 3).is_err());
    }

    #[test]
    fn required_text_rejects_blank() {
        let err = required_text("category", "  ", 10).unwrap_err();
        assert_eq!(err, DomainError::validation("category", "must not be empty"));
    }

    #[test]
    fn non_negative_rejects_nan() {
        assert!(non_negative("fats", f64::NAN).is_err());
        assert!(non_negative("fats", -0.5).is_err());
        assert!(non_negative("fats", 0.0).is_ok());
    }
}
