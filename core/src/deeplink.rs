//! Contact links for listing detail screens.

use crate::validation::{is_valid_phone, phone_digits};

/// `tel:` URI for the dialer.
pub fn tel_uri(phone: &str) -> Option<String> {
    if !is_valid_phone(phone) {
        return None;
    }
    let digits = phone_digits(phone);
    let plus = if phone.trim_start().starts_with('+') { "+" } else { "" };
    Some(format!("tel:{plus}{digits}"))
}

/// `https://wa.me/` link. wa.me wants the full international number with
/// no `+`, so a national number's trunk `0` becomes `country_code`.
pub fn whatsapp_uri(phone: &str, country_code: &str) -> Option<String> {
    if !is_valid_phone(phone) {
        return None;
    }
    let digits = phone_digits(phone);
    let international = if phone.trim_start().starts_with('+') {
        digits
    } else if let Some(national) = digits.strip_prefix("00") {
        national.to_string()
    } else if let Some(national) = digits.strip_prefix('0') {
        format!("{country_code}{national}")
    } else if digits.len() == 10 {
        // Turkish mobile numbers are often written without the trunk 0.
        format!("{country_code}{digits}")
    } else {
        digits
    };
    Some(format!("https://wa.me/{international}"))
}
