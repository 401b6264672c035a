//! Property-based tests for comma clean-up.

use proptest::prelude::*;
use surface_realiser::core::orthography::clean_up;

proptest! {
    #[test]
    fn clean_up_is_idempotent(text in "[a-z ,]{0,30}") {
        let once = clean_up(&text);
        prop_assert_eq!(clean_up(&once), once);
    }

    #[test]
    fn no_space_before_a_comma_survives(text in "[a-z ,]{0,30}") {
        let cleaned = clean_up(&text);
        prop_assert!(!cleaned.contains(" ,"));
        prop_assert!(!cleaned.contains(",,"));
    }

    #[test]
    fn comma_free_text_is_untouched(text in "[a-z .]{0,30}") {
        prop_assert_eq!(clean_up(&text), text);
    }
}
