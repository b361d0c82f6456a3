pub mod survey_repository;
pub mod user_repository;

pub use survey_repository::*;
pub use user_repository::*;

use uuid::Uuid;

/// Ids live in TEXT columns; a row whose id fails to parse is a decode error,
/// not a missing row.
pub(crate) fn parse_uuid(column: &str, value: &str) -> Result<Uuid, sqlx::Error> {
    Uuid::parse_str(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.into(),
        source: Box::new(e),
    })
}
