//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Full author model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Create author request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAuthor {
    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Update author request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAuthor {
    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Lifespan invariant: when both dates are set, death must not precede birth.
/// Checked at save time, never as a database constraint.
pub fn validate_lifespan(
    date_of_birth: Option<NaiveDate>,
    date_of_death: Option<NaiveDate>,
) -> AppResult<()> {
    if let (Some(birth), Some(death)) = (date_of_birth, date_of_death) {
        if death < birth {
            return Err(AppError::Validation(
                "Death date cannot be before birth date".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn lifespan_accepts_missing_dates() {
        assert!(validate_lifespan(None, None).is_ok());
        assert!(validate_lifespan(Some(date(1815, 12, 10)), None).is_ok());
        assert!(validate_lifespan(None, Some(date(1852, 11, 27))).is_ok());
    }

    #[test]
    fn lifespan_accepts_death_on_or_after_birth() {
        assert!(validate_lifespan(Some(date(1815, 12, 10)), Some(date(1852, 11, 27))).is_ok());
        assert!(validate_lifespan(Some(date(1815, 12, 10)), Some(date(1815, 12, 10))).is_ok());
    }

    #[test]
    fn lifespan_rejects_death_before_birth() {
        let result = validate_lifespan(Some(date(1815, 12, 10)), Some(date(1814, 1, 1)));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
