use chrono::{FixedOffset, Local, TimeZone as _, Utc};
use std::{env, iter};

/// Conventions used when rendering numbers and timestamps.
///
/// A table of common locales is built in, and [`Locale::new`] describes any other.  The system
/// locale falls back to [`Locale::EN_US`] when it is not in the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locale {
    tag: &'static str,
    decimal_separator: char,
    date_time_pattern: &'static str,
}

impl Locale {
    /// Creates a locale from a tag, the character placed before the fraction digits of a
    /// decimal, and a `chrono` format string for timestamps.
    ///
    /// ```
    /// use consolemic::Locale;
    ///
    /// let swedish = Locale::new("sv_SE", ',', "%Y-%m-%d %H:%M:%S");
    /// assert_eq!(swedish.format_decimal(2.5), "2,50");
    /// ```
    pub const fn new(tag: &'static str, decimal_separator: char, date_time_pattern: &'static str) -> Locale {
        Locale {
            tag,
            decimal_separator,
            date_time_pattern,
        }
    }

    pub const EN_US: Locale = Locale::new("en_US", '.', "%-m/%-d/%y %-I:%M:%S %p");

    pub const EN_GB: Locale = Locale::new("en_GB", '.', "%d/%m/%y %H:%M:%S");

    pub const DE_DE: Locale = Locale::new("de_DE", ',', "%d.%m.%y %H:%M:%S");

    pub const FR_FR: Locale = Locale::new("fr_FR", ',', "%d/%m/%y %H:%M:%S");

    pub const ES_ES: Locale = Locale::new("es_ES", ',', "%-d/%m/%y %-H:%M:%S");

    pub const IT_IT: Locale = Locale::new("it_IT", ',', "%d/%m/%y %H:%M:%S");

    pub const NL_NL: Locale = Locale::new("nl_NL", ',', "%-d-%-m-%y %H:%M:%S");

    pub const PT_BR: Locale = Locale::new("pt_BR", ',', "%d/%m/%y %H:%M:%S");

    pub const RU_RU: Locale = Locale::new("ru_RU", ',', "%d.%m.%y %-H:%M:%S");

    /// Locale-neutral conventions.
    pub const ROOT: Locale = Locale::new("ROOT", '.', "%y-%m-%d %H:%M:%S");

    /// Parses a locale from a POSIX (`de_DE.UTF-8`) or BCP 47 (`en-GB`) tag.
    ///
    /// Returns `None` if the language is not one we have conventions for.
    pub fn from_tag(tag: &str) -> Option<Locale> {
        let tag = tag.split(|c: char| c == '.' || c == '@').next().unwrap_or("");
        if tag == "C" || tag == "POSIX" {
            return Some(Locale::ROOT)
        }

        let mut parts = tag.split(|c: char| c == '_' || c == '-');
        let language = parts.next().unwrap_or("").to_ascii_lowercase();
        let region = parts.next().map(|r| r.to_ascii_uppercase());

        match (language.as_str(), region.as_ref().map(String::as_str)) {
            ("en", Some("GB")) | ("en", Some("IE")) => Some(Locale::EN_GB),
            ("en", _) => Some(Locale::EN_US),
            ("de", _) => Some(Locale::DE_DE),
            ("fr", _) => Some(Locale::FR_FR),
            ("es", _) => Some(Locale::ES_ES),
            ("it", _) => Some(Locale::IT_IT),
            ("nl", _) => Some(Locale::NL_NL),
            ("pt", _) => Some(Locale::PT_BR),
            ("ru", _) => Some(Locale::RU_RU),
            _ => None,
        }
    }

    /// The locale of the current process, read from `LC_ALL`, `LC_NUMERIC` and `LANG` in that
    /// order.
    pub fn system() -> Locale {
        for var in &["LC_ALL", "LC_NUMERIC", "LANG"] {
            match env::var(var) {
                Ok(ref value) if !value.is_empty() => {
                    return Locale::from_tag(value).unwrap_or_else(|| {
                        debug!("no conventions known for locale {}, using en_US", value);
                        Locale::EN_US
                    })
                },
                _ => {},
            }
        }

        Locale::EN_US
    }

    pub fn tag(&self) -> &str { self.tag }

    /// Formats a decimal with exactly two fraction digits.
    ///
    /// Rounding is half-up on the shortest decimal representation of `value`, so `2.675` renders
    /// as `2.68` even though the nearest double lies just below it.
    pub fn format_decimal(&self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_owned()
        }
        if value.is_infinite() {
            return if value > 0.0 { "Infinity".to_owned() } else { "-Infinity".to_owned() }
        }

        let (whole, fraction) = round_half_up(value.abs());
        let sign = if value.is_sign_negative() { "-" } else { "" };
        format!("{}{}{}{}", sign, whole, self.decimal_separator, fraction)
    }

    /// Formats an integer as plain decimal digits.
    pub fn format_integer(&self, value: i64) -> String { value.to_string() }

    /// Formats a timestamp, in milliseconds since the Unix epoch, as a short date and a medium
    /// time.
    pub fn format_date_time(&self, millis: u64, time_zone: &TimeZone) -> String {
        time_zone.format(millis, self.date_time_pattern)
    }
}

/// Rounds a non-negative value to two fraction digits, returning the whole and fraction digits.
fn round_half_up(value: f64) -> (String, String) {
    // `Display` for floats yields the shortest representation that round-trips, never exponential.
    let repr = value.to_string();
    let (whole, fraction) = match repr.find('.') {
        Some(i) => (&repr[..i], &repr[i + 1..]),
        None => (&repr[..], ""),
    };

    let mut digits = whole
        .bytes()
        .chain(fraction.bytes().chain(iter::repeat(b'0')).take(2))
        .map(|b| b - b'0')
        .collect::<Vec<u8>>();

    if fraction.as_bytes().get(2).map_or(false, |&d| d >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let split = digits.len() - 2;
    let render = |ds: &[u8]| ds.iter().map(|d| char::from(b'0' + d)).collect::<String>();
    (render(&digits[..split]), render(&digits[split..]))
}

impl Default for Locale {
    fn default() -> Locale { Locale::system() }
}

/// The time zone timestamps are rendered in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeZone {
    /// The time zone of the current process.
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl TimeZone {
    fn format(&self, millis: u64, pattern: &str) -> String {
        let millis = if millis > i64::max_value() as u64 { i64::max_value() } else { millis as i64 };
        let utc = Utc.timestamp_millis_opt(millis).single().unwrap_or_default();

        match *self {
            TimeZone::Local => utc.with_timezone(&Local).format(pattern).to_string(),
            TimeZone::Utc => utc.format(pattern).to_string(),
            TimeZone::Fixed(offset) => utc.with_timezone(&offset).format(pattern).to_string(),
        }
    }
}

impl Default for TimeZone {
    fn default() -> TimeZone { TimeZone::Local }
}

#[cfg(test)]
mod tests {
    use super::{Locale, TimeZone};
    use chrono::FixedOffset;

    // 2012-03-04 05:06:07 UTC
    const MILLIS: u64 = 1_330_837_567_000;

    #[test]
    fn test_from_tag() {
        assert_eq!(Locale::from_tag("en_US.UTF-8"), Some(Locale::EN_US));
        assert_eq!(Locale::from_tag("en-GB"), Some(Locale::EN_GB));
        assert_eq!(Locale::from_tag("de_AT.ISO-8859-1"), Some(Locale::DE_DE));
        assert_eq!(Locale::from_tag("fr_FR@euro"), Some(Locale::FR_FR));
        assert_eq!(Locale::from_tag("C"), Some(Locale::ROOT));
        assert_eq!(Locale::from_tag("C.UTF-8"), Some(Locale::ROOT));
        assert_eq!(Locale::from_tag("ru_RU.UTF-8"), Some(Locale::RU_RU));
        assert_eq!(Locale::from_tag("es_ES"), Some(Locale::ES_ES));
        assert_eq!(Locale::from_tag("it-IT"), Some(Locale::IT_IT));
        assert_eq!(Locale::from_tag("pt_BR"), Some(Locale::PT_BR));
        assert_eq!(Locale::from_tag("nl_BE"), Some(Locale::NL_NL));
        assert_eq!(Locale::from_tag("ja_JP"), None);
        assert_eq!(Locale::from_tag("de_CH").map(|l| l.tag().to_owned()), Some("de_DE".to_owned()));
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(Locale::EN_US.format_decimal(1.0), "1.00");
        assert_eq!(Locale::EN_US.format_decimal(-12.345), "-12.35");
        assert_eq!(Locale::DE_DE.format_decimal(1234.5), "1234,50");
        assert_eq!(Locale::EN_US.format_decimal(std::f64::NAN), "NaN");
        assert_eq!(Locale::EN_US.format_decimal(std::f64::INFINITY), "Infinity");
        assert_eq!(Locale::FR_FR.format_decimal(std::f64::NEG_INFINITY), "-Infinity");
        assert_eq!(Locale::RU_RU.format_decimal(1234.5), "1234,50");
        assert_eq!(Locale::EN_US.format_decimal(0.0), "0.00");
        assert_eq!(Locale::EN_US.format_decimal(42.0), "42.00");
    }

    #[test]
    fn test_format_decimal_rounds_half_up() {
        assert_eq!(Locale::EN_US.format_decimal(0.125), "0.13");
        assert_eq!(Locale::EN_US.format_decimal(1.005), "1.01");
        assert_eq!(Locale::EN_US.format_decimal(2.675), "2.68");
        assert_eq!(Locale::EN_US.format_decimal(1.004), "1.00");
        assert_eq!(Locale::EN_US.format_decimal(9.995), "10.00");
        assert_eq!(Locale::EN_US.format_decimal(99.999), "100.00");
        assert_eq!(Locale::EN_US.format_decimal(-0.005), "-0.01");
        assert_eq!(Locale::EN_US.format_decimal(1e-7), "0.00");
    }

    #[test]
    fn test_custom_locale() {
        let swedish = Locale::new("sv_SE", ',', "%Y-%m-%d %H:%M:%S");
        assert_eq!(swedish.tag(), "sv_SE");
        assert_eq!(swedish.format_decimal(1.5), "1,50");
        assert_eq!(swedish.format_date_time(MILLIS, &TimeZone::Utc), "2012-03-04 05:06:07");
    }

    #[test]
    fn test_format_integer() {
        assert_eq!(Locale::EN_US.format_integer(1_234_567), "1234567");
        assert_eq!(Locale::DE_DE.format_integer(-3), "-3");
    }

    #[test]
    fn test_format_date_time() {
        assert_eq!(Locale::EN_US.format_date_time(MILLIS, &TimeZone::Utc), "3/4/12 5:06:07 AM");
        assert_eq!(Locale::DE_DE.format_date_time(MILLIS, &TimeZone::Utc), "04.03.12 05:06:07");
        assert_eq!(Locale::ROOT.format_date_time(MILLIS, &TimeZone::Utc), "12-03-04 05:06:07");
        assert_eq!(Locale::RU_RU.format_date_time(MILLIS, &TimeZone::Utc), "04.03.12 5:06:07");
        assert_eq!(Locale::NL_NL.format_date_time(MILLIS, &TimeZone::Utc), "4-3-12 05:06:07");

        let pacific = TimeZone::Fixed(FixedOffset::west_opt(8 * 3600).unwrap());
        assert_eq!(Locale::EN_GB.format_date_time(MILLIS, &pacific), "03/03/12 21:06:07");
    }
}
