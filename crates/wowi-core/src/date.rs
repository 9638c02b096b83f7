//! Calendar dates as the remote API delivers them.

use chrono::NaiveDate;

use crate::{Error, Result};

/// The only date format the remote API emits.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an optional `YYYY-MM-DD` string.
///
/// `None` and the empty string both map to `None`; anything else that is not a
/// valid date is an [`Error::InvalidDate`] naming `field`.
pub fn parse_date(field: &'static str, value: Option<&str>) -> Result<Option<NaiveDate>> {
  match value.map(str::trim) {
    None | Some("") => Ok(None),
    Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
      .map(Some)
      .map_err(|_| Error::InvalidDate { field, value: raw.to_owned() }),
  }
}
