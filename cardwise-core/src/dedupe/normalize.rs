// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Field Normalization
//!
//! Canonical forms of contact field values used for comparison. All
//! functions are pure and accept absent values.

/// Minimum number of trailing digits two phone numbers must share.
pub const MIN_PHONE_DIGITS: usize = 7;

/// Longest digit suffix compared; longer prefixes are country or trunk codes.
pub const MAX_PHONE_SUFFIX: usize = 10;

/// Legal-entity suffixes dropped from company names.
pub const LEGAL_SUFFIXES: &[&str] = &[
    "inc",
    "incorporated",
    "llc",
    "ltd",
    "limited",
    "pty",
    "corp",
    "corporation",
    "co",
    "company",
    "gmbh",
    "ag",
    "plc",
    "sa",
    "sarl",
    "bv",
    "nv",
    "oy",
    "ab",
    "srl",
    "spa",
    "kk",
];

/// Splits free text into lowercase word tokens.
///
/// Periods and apostrophes are dropped ("J." -> "j", "O'Neil" -> "oneil"),
/// other punctuation separates words.
fn word_tokens(value: &str) -> Vec<String> {
    let mut cleaned = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch.is_alphanumeric() {
            cleaned.extend(ch.to_lowercase());
        } else if ch == '.' || ch == '\'' || ch == '\u{2019}' {
            continue;
        } else {
            cleaned.push(' ');
        }
    }
    cleaned.split_whitespace().map(str::to_string).collect()
}

/// Tokenizes a person's name.
pub fn name_tokens(name: Option<&str>) -> Vec<String> {
    name.map(word_tokens).unwrap_or_default()
}

/// Returns the canonical form of a name, or `None` if it has no tokens.
pub fn normalize_name(name: Option<&str>) -> Option<String> {
    let tokens = name_tokens(name);
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}

/// Lowercases and trims an email address.
///
/// Returns `None` unless the value has the shape `local@domain`, so import
/// placeholders such as "n/a" or "-" never compare equal.
pub fn normalize_email(email: Option<&str>) -> Option<String> {
    let normalized = email?.trim().to_lowercase();
    let (local, domain) = normalized.rsplit_once('@')?;
    if local.is_empty() || domain.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Returns the domain part of an email address.
pub fn email_domain(email: Option<&str>) -> Option<String> {
    let normalized = normalize_email(email)?;
    normalized
        .rsplit_once('@')
        .map(|(_, domain)| domain.to_string())
}

/// Strips a phone number down to its digits.
pub fn normalize_phone(phone: Option<&str>) -> Option<String> {
    let digits: String = phone?.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}

/// Compares two phone numbers on their shared digit suffix.
///
/// Tolerates formatting and country-code differences
/// ("+1 (415) 555-0100" matches "415.555.0100").
pub fn phones_match(a: Option<&str>, b: Option<&str>) -> bool {
    let (Some(a), Some(b)) = (normalize_phone(a), normalize_phone(b)) else {
        return false;
    };
    if a.len() < MIN_PHONE_DIGITS || b.len() < MIN_PHONE_DIGITS {
        return false;
    }
    let len = a.len().min(b.len()).min(MAX_PHONE_SUFFIX);
    a[a.len() - len..] == b[b.len() - len..]
}

/// Returns the canonical form of a company name.
///
/// Trailing legal-entity suffixes are removed as long as a distinctive
/// token remains, so "Acme Pty Ltd" and "ACME Corp." both become "acme".
pub fn normalize_company(company: Option<&str>) -> Option<String> {
    let mut tokens = company.map(word_tokens).unwrap_or_default();
    while tokens.len() > 1 {
        match tokens.last() {
            Some(last) if LEGAL_SUFFIXES.contains(&last.as_str()) => {
                tokens.pop();
            }
            _ => break,
        }
    }
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_tokens_strip_punctuation() {
        assert_eq!(name_tokens(Some("  J.  Doe ")), vec!["j", "doe"]);
        assert_eq!(name_tokens(Some("Mary-Jane O'Neil")), vec!["mary", "jane", "oneil"]);
        assert!(name_tokens(None).is_empty());
    }

    #[test]
    fn test_normalize_name_empty() {
        assert_eq!(normalize_name(Some(" .. ")), None);
        assert_eq!(normalize_name(Some("Jane  DOE")), Some("jane doe".into()));
    }

    #[test]
    fn test_email_normalization_and_domain() {
        assert_eq!(
            normalize_email(Some(" Jane@ACME.com ")),
            Some("jane@acme.com".into())
        );
        assert_eq!(email_domain(Some("Jane@ACME.com")), Some("acme.com".into()));
        assert_eq!(email_domain(Some("not-an-email")), None);
        assert_eq!(email_domain(Some("@acme.com")), None);
        assert_eq!(normalize_email(Some("   ")), None);
    }

    #[test]
    fn test_email_placeholders_are_not_addresses() {
        assert_eq!(normalize_email(Some("n/a")), None);
        assert_eq!(normalize_email(Some("-")), None);
        assert_eq!(normalize_email(Some("jane@")), None);
        assert_eq!(normalize_email(Some("@acme.com")), None);
    }

    #[test]
    fn test_phone_digits_only() {
        assert_eq!(
            normalize_phone(Some("+1 (415) 555-0100")),
            Some("14155550100".into())
        );
        assert_eq!(normalize_phone(Some("n/a")), None);
    }

    #[test]
    fn test_phones_match_on_suffix() {
        assert!(phones_match(Some("+1 (415) 555-0100"), Some("415.555.0100")));
        assert!(phones_match(Some("555-0100 123"), Some("+61 5550100123")));
        assert!(!phones_match(Some("415 555 0100"), Some("415 555 0199")));
    }

    #[test]
    fn test_phones_match_requires_min_digits() {
        assert!(!phones_match(Some("0100"), Some("555-0100")));
        assert!(!phones_match(None, Some("555-0100")));
    }

    #[test]
    fn test_country_codes_ignored_beyond_ten_digits() {
        assert!(phones_match(Some("+1 415 555 0100"), Some("+44 415 555 0100")));
    }

    #[test]
    fn test_company_suffixes_stripped() {
        assert_eq!(normalize_company(Some("Acme Corp")), Some("acme".into()));
        assert_eq!(normalize_company(Some("ACME Pty. Ltd.")), Some("acme".into()));
        assert_eq!(normalize_company(Some("Widgets, Inc.")), Some("widgets".into()));
        assert_eq!(normalize_company(Some("Siemens AG")), Some("siemens".into()));
    }

    #[test]
    fn test_company_keeps_last_token() {
        assert_eq!(normalize_company(Some("Company")), Some("company".into()));
        assert_eq!(normalize_company(Some("")), None);
    }
}
