use num_format::{Locale, ToFormattedString};

// ---------------------------------------------------------------------------
// Currency formatting
// ---------------------------------------------------------------------------

/// Format a COP amount the way the dashboard displays it: rounded to the
/// nearest peso with thousands grouping, e.g. `3245.4` → `"$3,245"`.
pub fn format_cop(value: f64) -> String {
    let rounded = value.round() as i64;
    if rounded < 0 {
        format!("-${}", (-rounded).to_formatted_string(&Locale::en))
    } else {
        format!("${}", rounded.to_formatted_string(&Locale::en))
    }
}

/// Like [`format_cop`], but renders missing values as `"no data"` rather
/// than a numeric placeholder.
pub fn format_cop_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format_cop(v),
        None => "no data".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_and_groups_thousands() {
        assert_eq!(format_cop(3245.4), "$3,245");
        assert_eq!(format_cop(3245.6), "$3,246");
        assert_eq!(format_cop(950.0), "$950");
        assert_eq!(format_cop(1_234_567.0), "$1,234,567");
    }

    #[test]
    fn negative_amounts_keep_the_sign_outside() {
        assert_eq!(format_cop(-3245.4), "-$3,245");
    }

    #[test]
    fn missing_value_reads_as_no_data() {
        assert_eq!(format_cop_opt(None), "no data");
        assert_eq!(format_cop_opt(Some(3245.4)), "$3,245");
    }
}
