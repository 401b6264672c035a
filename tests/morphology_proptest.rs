//! Property-based tests for regular inflection and article choice.

use proptest::prelude::*;
use surface_realiser::core::morphology::requires_an;
use surface_realiser::core::morphology::rules::{present_third_singular, regular_plural};

/// Insert thousands separators: "1234567" becomes "1,234,567".
fn with_commas(digits: &str) -> String {
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

proptest! {
    #[test]
    fn consonant_y_becomes_ies(base in "[a-z]{0,6}[b-df-hj-np-tv-z]y") {
        let expected = format!("{}ies", &base[..base.len() - 1]);
        prop_assert_eq!(regular_plural(&base), expected);
    }

    #[test]
    fn vowel_y_just_takes_s(base in "[a-z]{0,6}[aeiou]y") {
        prop_assert_eq!(regular_plural(&base), format!("{base}s"));
    }

    #[test]
    fn sibilants_take_es(base in "[a-z]{0,6}(s|z|x|ch|sh)") {
        prop_assert_eq!(regular_plural(&base), format!("{base}es"));
    }

    #[test]
    fn everything_else_takes_s(base in "[a-z]{0,6}[a-gi-rtuvw]") {
        prop_assert_eq!(regular_plural(&base), format!("{base}s"));
    }

    #[test]
    fn third_person_matches_plural_spelling(base in "[a-z]{1,8}") {
        prop_assume!(base != "be");
        prop_assert_eq!(present_third_singular(&base), regular_plural(&base));
    }

    #[test]
    fn numbers_not_starting_with_eight_or_eleven_take_a(number in "[2-79][0-9]{0,8}") {
        prop_assert!(!requires_an(&number));
    }

    #[test]
    fn eight_and_the_eighties_take_an(number in "8[0-9]?") {
        prop_assert!(requires_an(&number));
    }

    #[test]
    fn thousands_separators_do_not_change_the_article(number in "[1-9][0-9]{0,11}") {
        prop_assert_eq!(requires_an(&number), requires_an(&with_commas(&number)));
    }

    #[test]
    fn vowel_initial_words_take_an(word in "[aeiu][a-z]{0,8}") {
        prop_assert!(requires_an(&word));
    }
}
