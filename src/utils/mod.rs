use log::info;

/// Sentinel for values that cannot be coerced to a number.
pub const NOT_AVAILABLE: &str = "N/A";

pub fn setup_logging() -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}][{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .level_for("hyper", log::LevelFilter::Warn)
        .level_for("reqwest", log::LevelFilter::Warn)
        .chain(std::io::stdout())
        .apply()?;
    info!("Logging initialized.");
    Ok(())
}

/// Renders a USD quantity with magnitude-appropriate precision.
///
/// Sub-cent values keep enough fractional digits to stay meaningful
/// (10 for sub-micro values, 8 otherwise, trailing zeros stripped);
/// thousands and millions are abbreviated with K/M suffixes. Never
/// panics: non-finite input degrades to the `N/A` sentinel.
pub fn format_usd(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    if value == 0.0 {
        return "$0".to_string();
    }
    if value < 0.01 {
        let digits = if value < 0.000_001 { 10 } else { 8 };
        let rendered = format!("{:.*}", digits, value);
        let rendered = rendered.trim_end_matches('0').trim_end_matches('.');
        return format!("${rendered}");
    }
    if value >= 1_000_000.0 {
        format!("${:.2}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("${:.2}K", value / 1_000.0)
    } else {
        format!("${:.4}", value)
    }
}

/// Same as [`format_usd`] for prices that arrive as decimal strings.
pub fn format_usd_str(value: &str) -> String {
    match value.trim().parse::<f64>() {
        Ok(v) => format_usd(v),
        Err(_) => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_zero_sentinel() {
        assert_eq!(format_usd(0.0), "$0");
    }

    #[test]
    fn test_thousands_and_millions_suffixes() {
        assert_eq!(format_usd(1234.0), "$1.23K");
        assert_eq!(format_usd(2_500_000.0), "$2.50M");
        assert_eq!(format_usd(999_999.0), "$1000.00K");
        assert_eq!(format_usd(1_000_000.0), "$1.00M");
    }

    #[test]
    fn test_plain_range_keeps_four_decimals() {
        assert_eq!(format_usd(0.5), "$0.5000");
        assert_eq!(format_usd(42.1), "$42.1000");
    }

    #[test]
    fn test_sub_cent_strips_trailing_zeros() {
        assert_eq!(format_usd(0.005), "$0.005");
        assert_eq!(format_usd(0.0000005), "$0.0000005");
        // sub-micro band allows 10 fractional digits
        assert_eq!(format_usd(0.0000000123), "$0.0000000123");
    }

    #[test]
    fn test_unparseable_input_degrades_to_sentinel() {
        assert_eq!(format_usd_str("not a number"), NOT_AVAILABLE);
        assert_eq!(format_usd_str(""), NOT_AVAILABLE);
        assert_eq!(format_usd(f64::NAN), NOT_AVAILABLE);
    }

    #[test]
    fn test_string_prices_route_through_same_rules() {
        assert_eq!(format_usd_str("1234"), "$1.23K");
        assert_eq!(format_usd_str(" 0.0000005 "), "$0.0000005");
    }
}
