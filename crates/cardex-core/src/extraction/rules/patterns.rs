//! Regex patterns for structured business card fields.

use lazy_static::lazy_static;
use regex::Regex;

/// NANP area code: no leading 0/1, no N11 service codes, no x9x.
const AREA_CODE: &str = "[2-9]1[02-9]|[2-9][02-8]1|[2-9][02-8][02-9]";

/// NANP exchange: no leading 0/1, no N11 service codes.
const STRICT_EXCHANGE: &str = "[2-9]1[02-9]|[2-9][02-9]1|[2-9][02-9]{2}";

/// Any three digits.
const LENIENT_EXCHANGE: &str = "[0-9]{3}";

/// Build the North American phone pattern around an exchange rule.
///
/// Groups: 1 = parenthesized area code, 2 = bare area code, 3 = exchange,
/// 4 = subscriber number, 5 = extension digits.
fn phone_pattern(exchange: &str) -> String {
    [
        r"(?:(?:\+?1\s*(?:[.-]\s*)?)?(?:\(\s*(",
        AREA_CODE,
        r")\s*\)|(",
        AREA_CODE,
        r"))\s*(?:[.-]\s*)?)?(",
        exchange,
        r")\s*(?:[.-]\s*)?([0-9]{4})(?:\s*(?:#|x\.?|ext\.?|extension)\s*(\d+))?$",
    ]
    .concat()
}

lazy_static! {
    // local@domain.tld, anchored at end of line
    pub static ref EMAIL: Regex = Regex::new(
        r"(?i)([a-z0-9_.+-]+)@([0-9a-z.-]+)\.([a-z.]{2,6})$"
    ).unwrap();

    pub static ref PHONE_NANP: Regex = Regex::new(&phone_pattern(STRICT_EXCHANGE)).unwrap();

    pub static ref PHONE_LENIENT: Regex = Regex::new(&phone_pattern(LENIENT_EXCHANGE)).unwrap();

    // Optional scheme and www, 2-256 host characters, 2-6 letter TLD, optional path/query
    pub static ref WEBSITE: Regex = Regex::new(
        r"(?:https?://)?(?:www\.)?[-a-zA-Z0-9@:%._+~#=]{2,256}\.[a-zA-Z]{2,6}\b[-a-zA-Z0-9@:%_+.~#()?&/=]*"
    ).unwrap();
}
