/// Normalize a raw year/date tag value for display.
///
/// - `YYYYMMDD` becomes `DD/MM/YYYY`
/// - `YYYY-MM-DD` becomes `DD/MM/YYYY`
/// - `YYYY` is kept as is
/// - anything else is returned verbatim (trimmed)
///
/// Blank input yields `None`.
pub fn normalize_year(raw: &str) -> Option<String> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    let all_digits = |v: &str| !v.is_empty() && v.bytes().all(|b| b.is_ascii_digit());

    if s.len() == 8 && all_digits(s) {
        return Some(format!("{}/{}/{}", &s[6..8], &s[4..6], &s[0..4]));
    }

    if s.len() == 10 {
        let parts: Vec<&str> = s.split('-').collect();
        if let [y, m, d] = parts[..] {
            if y.len() == 4 && m.len() == 2 && d.len() == 2 && parts.iter().all(|p| all_digits(p))
            {
                return Some(format!("{d}/{m}/{y}"));
            }
        }
    }

    Some(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_date_is_reordered() {
        assert_eq!(normalize_year("20180705").as_deref(), Some("05/07/2018"));
    }

    #[test]
    fn iso_date_is_reordered() {
        assert_eq!(normalize_year("2018-07-05").as_deref(), Some("05/07/2018"));
        assert_eq!(normalize_year(" 2018-07-05 ").as_deref(), Some("05/07/2018"));
    }

    #[test]
    fn bare_year_passes_through() {
        assert_eq!(normalize_year("2018").as_deref(), Some("2018"));
    }

    #[test]
    fn unrecognized_values_are_kept_verbatim() {
        // Ten characters with a dash, but not a date.
        assert_eq!(normalize_year("circa-2018").as_deref(), Some("circa-2018"));
        assert_eq!(normalize_year("2018-7-5").as_deref(), Some("2018-7-5"));
        assert_eq!(normalize_year("1999/12/31").as_deref(), Some("1999/12/31"));
        assert_eq!(normalize_year("2018-07-05T10:00").as_deref(), Some("2018-07-05T10:00"));
    }

    #[test]
    fn blank_is_none() {
        assert_eq!(normalize_year(""), None);
        assert_eq!(normalize_year("   "), None);
    }
}
