//! Student record: one row of the `students` table.

use crate::error::AppError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Width of the `firstName` / `lastName` columns.
pub const NAME_MAX_CHARS: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
}

impl Student {
    pub fn new(
        id: i32,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birthday: Option<NaiveDate>,
    ) -> Self {
        Student {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            birthday,
        }
    }

    /// Names as a `CHAR` column returns them: trailing spaces are not kept.
    pub fn normalized(mut self) -> Self {
        for name in [&mut self.first_name, &mut self.last_name] {
            let kept = name.trim_end_matches(' ').len();
            name.truncate(kept);
        }
        self
    }

    /// Reject values the `students` columns cannot hold.
    pub fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [("firstName", &self.first_name), ("lastName", &self.last_name)] {
            if value.chars().count() > NAME_MAX_CHARS {
                return Err(AppError::Validation(format!(
                    "{} must be at most {} characters",
                    field, NAME_MAX_CHARS
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_camel_case_with_iso_date() {
        let s = Student::new(1, "Ada", "Lovelace", NaiveDate::from_ymd_opt(1815, 12, 10));
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(
            v,
            json!({"id": 1, "firstName": "Ada", "lastName": "Lovelace", "birthday": "1815-12-10"})
        );
    }

    #[test]
    fn birthday_may_be_absent_or_null() {
        let a: Student = serde_json::from_value(json!({"id": 2, "firstName": "A", "lastName": "B"})).unwrap();
        let b: Student =
            serde_json::from_value(json!({"id": 2, "firstName": "A", "lastName": "B", "birthday": null})).unwrap();
        assert_eq!(a.birthday, None);
        assert_eq!(a, b);
    }

    #[test]
    fn malformed_birthday_is_rejected() {
        let r: Result<Student, _> =
            serde_json::from_value(json!({"id": 3, "firstName": "A", "lastName": "B", "birthday": "10/12/1815"}));
        assert!(r.is_err());
    }

    #[test]
    fn normalized_drops_trailing_spaces_only() {
        let s = Student::new(6, " Ada  ", "Love lace ", None).normalized();
        assert_eq!(s.first_name, " Ada");
        assert_eq!(s.last_name, "Love lace");

        let padded = Student::new(7, format!("{}{}", "z".repeat(NAME_MAX_CHARS), "   "), "B", None);
        assert!(padded.validate().is_err());
        assert!(padded.normalized().validate().is_ok());
    }

    #[test]
    fn validate_name_width() {
        let ok = Student::new(4, "x".repeat(NAME_MAX_CHARS), "é".repeat(NAME_MAX_CHARS), None);
        assert!(ok.validate().is_ok());

        let too_long = Student::new(5, "Grace", "y".repeat(NAME_MAX_CHARS + 1), None);
        match too_long.validate() {
            Err(AppError::Validation(msg)) => assert!(msg.starts_with("lastName")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
