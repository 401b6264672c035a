//! Choosing between "a" and "an".
//!
//! Vowel-initial words take "an" unless they are one of a few exceptions.
//! Numerals take "an" when they are read aloud starting with a vowel sound:
//! eight, eleven, eighteen, the eighties, and thousands thereof.

const AN_EXCEPTIONS: [&str; 3] = ["one", "180", "110"];

/// Whether `text` needs "an" rather than "a" in front of it.
pub fn requires_an(text: &str) -> bool {
    let lower = text.to_lowercase();
    if lower.starts_with(['a', 'e', 'i', 'o', 'u']) && !is_an_exception(&lower) {
        return true;
    }
    match numeric_prefix(&lower) {
        Some(prefix) if prefix.starts_with('8') || prefix.starts_with("11") || prefix.starts_with("18") => {
            prefix.parse::<u128>().is_ok_and(check_num)
        }
        _ => false,
    }
}

fn is_an_exception(text: &str) -> bool {
    AN_EXCEPTIONS.iter().any(|ex| text.starts_with(ex))
}

fn check_num(num: u128) -> bool {
    if matches!(num, 8 | 11 | 18) || (80..90).contains(&num) {
        return true;
    }
    num > 1000 && check_num(thousands(num))
}

/// `num / 1000`, rounding halves to even.
fn thousands(num: u128) -> u128 {
    let (quotient, remainder) = (num / 1000, num % 1000);
    if remainder > 500 || (remainder == 500 && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

/// The leading run of digits, with commas inside the number skipped.
fn numeric_prefix(text: &str) -> Option<String> {
    let text = text.trim();
    if !text.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    let mut digits = String::new();
    for c in text.chars() {
        match c {
            '0'..='9' => digits.push(c),
            ',' => continue,
            _ => break,
        }
    }
    Some(digits)
}

/// Rewrite a trailing "a" in `text` to "an" if `next` requires it.
pub fn check_ends_with_indefinite_article(text: &str, next: &str) -> String {
    match text.rsplit_once(' ') {
        Some((head, last)) if last.eq_ignore_ascii_case("a") && requires_an(next) => format!("{head} an"),
        None if text.eq_ignore_ascii_case("a") && requires_an(next) => "an".to_string(),
        _ => text.to_string(),
    }
}
