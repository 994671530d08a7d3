//! Year-month tokens used by the feature service (`1958M04`).

use chrono::NaiveDate;

use crate::error::AppError;

/// Parse a `YYYYMmm` token into the first day of that month.
///
/// Parsing is positional: four ASCII digits, a literal `M`, two ASCII digits,
/// nothing else. The month must be `01..=12`.
pub fn parse_year_month(token: &str) -> Result<NaiveDate, AppError> {
    let bytes = token.as_bytes();
    let well_formed = bytes.len() == 7
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'M'
        && bytes[5..].iter().all(u8::is_ascii_digit);

    if !well_formed {
        tracing::error!(token, "malformed year-month token");
        return Err(AppError::format(format!(
            "Invalid date '{token}': expected YYYYMmm (e.g. 1958M04)."
        )));
    }

    let year: i32 = digits(&bytes[..4]) as i32;
    let month: u32 = digits(&bytes[5..]);

    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        tracing::error!(token, month, "month out of range");
        AppError::format(format!("Invalid date '{token}': month {month:02} is out of range."))
    })
}

fn digits(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn parses_first_of_month() {
        assert_eq!(
            parse_year_month("1958M04").unwrap(),
            NaiveDate::from_ymd_opt(1958, 4, 1).unwrap()
        );
        assert_eq!(
            parse_year_month("2023M12").unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 1).unwrap()
        );
    }

    #[test]
    fn every_month_of_a_year_parses() {
        for m in 1..=12u32 {
            let token = format!("2001M{m:02}");
            let date = parse_year_month(&token).unwrap();
            assert_eq!(date, NaiveDate::from_ymd_opt(2001, m, 1).unwrap());
        }
    }

    #[test]
    fn rejects_malformed_tokens() {
        for bad in [
            "", "1958", "1958M4", "1958-04", "1958m04", "1958M040", "19a8M04", "1958M0x", "+958M04",
            "1958M00", "1958M13", " 1958M04",
        ] {
            let err = parse_year_month(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Format, "token {bad:?}");
        }
    }
}
