use serde::{Deserialize, Serialize};
use unicode_general_category::{get_general_category, GeneralCategory};
use unicode_normalization::char::decompose_compatible;

use crate::errors::ServiceError;

pub const DIGITS_MESSAGE: &str = "Student information cannot contain digits";
pub const EMPTY_MESSAGE: &str = "Student information cannot be empty";
pub const DUPLICATE_MESSAGE: &str = "Duplicate student information";

pub type StudentId = i64;

/// Create/update body. Carries no id; the store assigns it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentInput {
    pub first_name: String,
    pub last_name: String,
}

impl StudentInput {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self { first_name: first_name.into(), last_name: last_name.into() }
    }

    /// Digits are checked before emptiness, so `""` + `"A1"` reports digits.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if has_digit(&self.first_name) || has_digit(&self.last_name) {
            return Err(ServiceError::Validation(DIGITS_MESSAGE.into()));
        }
        if self.first_name.is_empty() || self.last_name.is_empty() {
            return Err(ServiceError::Validation(EMPTY_MESSAGE.into()));
        }
        Ok(())
    }
}

fn has_digit(s: &str) -> bool {
    s.chars().any(is_digit)
}

/// Decimal digits (Nd) plus digit-valued other numbers such as `²` or `①`.
/// Fractions, multi-digit forms and letter numbers (`½`, `⑩`, `Ⅷ`) are not digits.
fn is_digit(c: char) -> bool {
    match get_general_category(c) {
        GeneralCategory::DecimalNumber => true,
        GeneralCategory::OtherNumber => {
            let mut digits = 0;
            decompose_compatible(c, |d| {
                if get_general_category(d) == GeneralCategory::DecimalNumber {
                    digits += 1;
                }
            });
            digits == 1
        }
        _ => false,
    }
}

/// Stored fields of a student. Also the element type of the list view, which carries no id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentRecord {
    pub first_name: String,
    pub last_name: String,
}

impl StudentRecord {
    pub fn with_id(&self, id: StudentId) -> Student {
        Student { id, first_name: self.first_name.clone(), last_name: self.last_name.clone() }
    }
}

impl From<StudentInput> for StudentRecord {
    fn from(input: StudentInput) -> Self {
        Self { first_name: input.first_name, last_name: input.last_name }
    }
}

/// A stored record merged with its id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
}
