//! Shared utility functions for OBahia dashboard crates.

/// Date utility functions
pub mod dates {
    use anyhow::{anyhow, bail};
    use chrono::NaiveDate;

    /// Left-pad a number with zeros, e.g. `zero_pad(3, 2) == "03"`.
    pub fn zero_pad(num: u32, places: usize) -> String {
        format!("{:0>width$}", num, width = places)
    }

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a month string in "YYYY-MM" format (what `<input type="month">` emits).
    pub fn parse_month(s: &str) -> anyhow::Result<(i32, u32)> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| anyhow!("expected YYYY-MM, got {:?}", s))?;
        let year: i32 = year.parse()?;
        let month: u32 = month.parse()?;
        if !(1..=12).contains(&month) {
            bail!("month out of range in {:?}", s);
        }
        Ok((year, month))
    }

    /// Parse a series date as returned by the stats API.
    ///
    /// Accepts "YYYY-MM-DD", "YYYYMMDD" and "YYYY-MM" (pinned to the 1st).
    pub fn parse_series_date(s: &str) -> anyhow::Result<NaiveDate> {
        let s = s.trim();
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(d);
        }
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y%m%d") {
            return Ok(d);
        }
        let (year, month) = parse_month(s)?;
        NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| anyhow!("invalid date {:?}", s))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_zero_pad() {
            assert_eq!(zero_pad(3, 2), "03");
            assert_eq!(zero_pad(11, 2), "11");
            assert_eq!(zero_pad(7, 1), "7");
        }

        #[test]
        fn test_parse_month() {
            assert_eq!(parse_month("2020-12").unwrap(), (2020, 12));
            assert_eq!(parse_month(" 2001-01 ").unwrap(), (2001, 1));
            assert!(parse_month("2020-13").is_err());
            assert!(parse_month("202012").is_err());
            assert!(parse_month("").is_err());
        }

        #[test]
        fn test_parse_series_date() {
            let expected = NaiveDate::from_ymd_opt(2019, 11, 15).unwrap();
            assert_eq!(parse_series_date("2019-11-15").unwrap(), expected);
            assert_eq!(parse_series_date("20191115").unwrap(), expected);
            assert_eq!(
                parse_series_date("2019-11").unwrap(),
                NaiveDate::from_ymd_opt(2019, 11, 1).unwrap()
            );
            assert!(parse_series_date("nope").is_err());
        }

        #[test]
        fn test_format_date() {
            let date = NaiveDate::from_ymd_opt(2023, 6, 5).unwrap();
            assert_eq!(format_date(&date), "2023-06-05");
        }
    }
}

/// Helpers for the HTML fragments returned by mapserver.
pub mod html {
    /// Remove markup tags and collapse whitespace, leaving the bare text.
    ///
    /// Feature-info responses come back as `text/html` fragments that wrap a
    /// single value; this recovers it.
    pub fn strip_tags(fragment: &str) -> String {
        let mut text = String::with_capacity(fragment.len());
        let mut in_tag = false;
        for c in fragment.chars() {
            match c {
                '<' => {
                    in_tag = true;
                    text.push(' ');
                }
                '>' if in_tag => in_tag = false,
                _ if !in_tag => text.push(c),
                _ => {}
            }
        }
        let text = text.replace("&nbsp;", " ");
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

}
