use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Today's date in `canonical_timezone`, e.g. "Pacific/Auckland".
///
/// # Errors
/// Returns [Error::InvalidTimezoneError] if `canonical_timezone` is not a
/// known timezone name.
pub fn local_today(canonical_timezone: &str) -> Result<Date, Error> {
    let offset = get_local_offset(canonical_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {canonical_timezone}");
        Error::InvalidTimezoneError(canonical_timezone.to_owned())
    })?;

    Ok(OffsetDateTime::now_utc().to_offset(offset).date())
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use crate::{Error, timezone::local_today};

    #[test]
    fn utc_today_matches_system_clock() {
        let today = local_today("Etc/UTC").expect("Etc/UTC should be a valid timezone");

        assert_eq!(today, OffsetDateTime::now_utc().date());
    }

    #[test]
    fn rejects_unknown_timezone() {
        let result = local_today("Middle/Earth");

        assert_eq!(
            result,
            Err(Error::InvalidTimezoneError("Middle/Earth".to_owned()))
        );
    }
}
