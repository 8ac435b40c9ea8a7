//! Book instance (loanable copy) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Loan status of a copy. DB stores the 1-char code (m/o/a/r).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum LoanStatus {
    #[serde(rename = "m")]
    Maintenance,
    #[serde(rename = "o")]
    OnLoan,
    #[serde(rename = "a")]
    Available,
    #[serde(rename = "r")]
    Reserved,
}

impl LoanStatus {
    /// Return the 1-char DB code for this status
    pub fn as_code(&self) -> &'static str {
        match self {
            LoanStatus::Maintenance => "m",
            LoanStatus::OnLoan => "o",
            LoanStatus::Available => "a",
            LoanStatus::Reserved => "r",
        }
    }
}

impl Default for LoanStatus {
    fn default() -> Self {
        LoanStatus::Maintenance
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

impl std::str::FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "m" => Ok(LoanStatus::Maintenance),
            "o" => Ok(LoanStatus::OnLoan),
            "a" => Ok(LoanStatus::Available),
            "r" => Ok(LoanStatus::Reserved),
            _ => Err(format!("Invalid loan status code: {}", s)),
        }
    }
}

// SQLx conversion for LoanStatus
impl sqlx::Type<Postgres> for LoanStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for LoanStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for LoanStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_code().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// A physical copy of a book, identified by a library-wide UUID.
/// The borrower is a weak reference: deleting the user only clears it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookInstance {
    pub id: Uuid,
    /// Nulled when the book is deleted
    pub book_id: Option<i32>,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub status: LoanStatus,
    pub borrower_id: Option<i32>,
    /// Populated by JOIN queries, None otherwise
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_title: Option<String>,
}

/// Create book instance request. Status defaults to Maintenance.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookInstance {
    pub book_id: Option<i32>,
    #[validate(length(min = 1, max = 200, message = "Imprint must be 1-200 characters"))]
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub status: Option<LoanStatus>,
    pub borrower_id: Option<i32>,
}

/// Update book instance request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBookInstance {
    pub book_id: Option<i32>,
    #[validate(length(min = 1, max = 200, message = "Imprint must be 1-200 characters"))]
    pub imprint: Option<String>,
    pub due_back: Option<NaiveDate>,
    pub status: Option<LoanStatus>,
    pub borrower_id: Option<i32>,
}

/// Book instance query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookInstanceQuery {
    pub status: Option<LoanStatus>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_maintenance() {
        assert_eq!(LoanStatus::default(), LoanStatus::Maintenance);
    }

    #[test]
    fn status_codes_round_trip() {
        for status in [
            LoanStatus::Maintenance,
            LoanStatus::OnLoan,
            LoanStatus::Available,
            LoanStatus::Reserved,
        ] {
            assert_eq!(status.as_code().parse::<LoanStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_code_is_rejected() {
        assert!("x".parse::<LoanStatus>().is_err());
        assert!("".parse::<LoanStatus>().is_err());
    }

    #[test]
    fn status_serializes_as_code() {
        assert_eq!(
            serde_json::to_string(&LoanStatus::OnLoan).unwrap(),
            "\"o\""
        );
        assert_eq!(
            serde_json::from_str::<LoanStatus>("\"a\"").unwrap(),
            LoanStatus::Available
        );
    }
}
