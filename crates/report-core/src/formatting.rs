use crate::time_utils::DurationBreakdown;

/// Format an approximate duration the way account sentences spell it out.
///
/// Units are always plural, matching the wording of the account report.
///
/// # Examples
///
/// ```
/// use report_core::formatting::format_duration;
/// use report_core::time_utils::DurationBreakdown;
///
/// let d = DurationBreakdown::from_days(430);
/// assert_eq!(format_duration(&d), "1 years, 2 months and 5 days");
/// assert_eq!(format_duration(&DurationBreakdown::from_days(0)), "0 years, 0 months and 0 days");
/// ```
pub fn format_duration(duration: &DurationBreakdown) -> String {
    format!(
        "{} years, {} months and {} days",
        duration.years, duration.months, duration.days
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_large() {
        let d = DurationBreakdown::from_days(3 * 365 + 11 * 30 + 4);
        assert_eq!(format_duration(&d), "3 years, 11 months and 4 days");
    }
}
