use lazy_static::lazy_static;
use regex::Regex;

use crate::shared::constants::CPF_DIGITS;

lazy_static! {
    /// Regex for a CPF in its display form
    /// - Valid: "123.456.789-09"
    /// - Invalid: "12345678909", "123.456.789-0", "123-456-789.09"
    pub static ref CPF_REGEX: Regex = Regex::new(r"^\d{3}\.\d{3}\.\d{3}-\d{2}$").unwrap();

    /// Characters allowed while a CPF is typed: ASCII digits, dots, hyphen and spaces
    pub static ref CPF_INPUT_REGEX: Regex = Regex::new(r"^[0-9.\-\s]+$").unwrap();
}

/// Normalize CPF input to `000.000.000-00`.
///
/// Accepts raw digits or an already formatted value. Returns `None` when the
/// input holds anything other than digits and separators, or does not carry
/// exactly 11 digits.
pub fn normalize_cpf(input: &str) -> Option<String> {
    let input = input.trim();
    if !CPF_INPUT_REGEX.is_match(input) {
        return None;
    }

    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != CPF_DIGITS {
        return None;
    }

    let formatted = format!(
        "{}.{}.{}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..11]
    );
    debug_assert!(CPF_REGEX.is_match(&formatted));
    Some(formatted)
}

/// Validator hook for optional CPF fields on request DTOs
pub fn validate_cpf(value: &str) -> Result<(), validator::ValidationError> {
    normalize_cpf(value)
        .map(|_| ())
        .ok_or_else(|| validator::ValidationError::new("cpf"))
}
