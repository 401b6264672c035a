//! Inflection rules per lexical category.
//!
//! Each rule prefers an inflected form recorded on the word itself, then
//! one recorded on its lexicon entry, and only then builds a regular form.

use crate::schema::category::LexicalCategory;
use crate::schema::element::{HasFeatures, InflectedWord, WordElement};
use crate::schema::features::{
    DiscourseFunction, Feature, Form, Gender, Inflection, NumberAgreement, Person, Tense,
};

const WH_PRONOUNS: [&str; 7] = ["who", "what", "which", "where", "why", "how", "how many"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Subjective,
    Objective,
    Reflexive,
    PossessivePronoun,
    PossessiveDeterminer,
}

/// Person, or gender in the third person.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Referent {
    First,
    Second,
    Masculine,
    Feminine,
    Neuter,
}

impl Referent {
    fn new(person: Option<Person>, gender: Option<Gender>) -> Self {
        match (person, gender) {
            (Some(Person::First), _) => Referent::First,
            (Some(Person::Second), _) => Referent::Second,
            (_, Some(Gender::Masculine)) => Referent::Masculine,
            (_, Some(Gender::Feminine)) => Referent::Feminine,
            _ => Referent::Neuter,
        }
    }
}

pub fn pronoun_form(number: NumberAgreement, case: Case, referent: Referent) -> &'static str {
    use Case::*;
    use Referent::*;
    if number == NumberAgreement::Plural {
        return match (case, referent) {
            (Subjective, First) => "we",
            (Subjective, Second) => "you",
            (Subjective, _) => "they",
            (Objective, First) => "us",
            (Objective, Second) => "you",
            (Objective, _) => "them",
            (Reflexive, First) => "ourselves",
            (Reflexive, Second) => "yourselves",
            (Reflexive, _) => "themselves",
            (PossessivePronoun, First) => "ours",
            (PossessivePronoun, Second) => "yours",
            (PossessivePronoun, _) => "theirs",
            (PossessiveDeterminer, First) => "our",
            (PossessiveDeterminer, Second) => "your",
            (PossessiveDeterminer, _) => "their",
        };
    }
    match (case, referent) {
        (Subjective, First) => "I",
        (Subjective, Second) => "you",
        (Subjective, Masculine) => "he",
        (Subjective, Feminine) => "she",
        (Subjective, Neuter) => "it",
        (Objective, First) => "me",
        (Objective, Second) => "you",
        (Objective, Masculine) => "him",
        (Objective, Feminine) => "her",
        (Objective, Neuter) => "it",
        (Reflexive, First) => "myself",
        (Reflexive, Second) => "yourself",
        (Reflexive, Masculine) => "himself",
        (Reflexive, Feminine) => "herself",
        (Reflexive, Neuter) => "itself",
        (PossessivePronoun, First) => "mine",
        (PossessivePronoun, Second) => "yours",
        (PossessivePronoun, Masculine) => "his",
        (PossessivePronoun, Feminine) => "hers",
        (PossessivePronoun, Neuter) => "its",
        (PossessiveDeterminer, First) => "my",
        (PossessiveDeterminer, Second) => "your",
        (PossessiveDeterminer, Masculine) => "his",
        (PossessiveDeterminer, Feminine) => "her",
        (PossessiveDeterminer, Neuter) => "its",
    }
}

fn pronoun_case(word: &InflectedWord) -> Case {
    let function = word.function();
    let passive = word.flag(Feature::Passive);
    if word.flag(Feature::Reflexive) {
        return Case::Reflexive;
    }
    if word.flag(Feature::Possessive) {
        return if function == Some(DiscourseFunction::Specifier) {
            Case::PossessiveDeterminer
        } else {
            Case::PossessivePronoun
        };
    }
    match function {
        Some(DiscourseFunction::Subject) if !passive => Case::Subjective,
        Some(DiscourseFunction::Object | DiscourseFunction::Complement) if passive => Case::Subjective,
        Some(DiscourseFunction::Specifier) => Case::Subjective,
        _ => Case::Objective,
    }
}

pub fn is_wh_pronoun(base: &str) -> bool {
    WH_PRONOUNS.contains(&base)
}

pub fn pronoun(word: &InflectedWord) -> String {
    if word.flag(Feature::NonMorph) || is_wh_pronoun(&word.base_form) {
        return word.base_form.clone();
    }
    let number = if word.is_plural() {
        NumberAgreement::Plural
    } else {
        NumberAgreement::Singular
    };
    let referent = Referent::new(word.person(), word.gender());
    pronoun_form(number, pronoun_case(word), referent).to_string()
}

/// A word's own inflected form, else its lexicon entry's.
fn lexical<'w>(word: &'w InflectedWord, base: &'w WordElement, key: Feature) -> Option<&'w str> {
    word.text(key).or_else(|| base.text(key))
}

fn inflection(word: &InflectedWord, base: &WordElement) -> Option<Inflection> {
    word.feature_as(Feature::DefaultInflection)
        .or_else(|| base.default_inflection())
}

/// Verbs take the lexicon's spelling, so "is" realises from "be". Other
/// words keep their own base form, so "children" stays "children".
fn base_form<'w>(word: &'w InflectedWord, base: &'w WordElement) -> &'w str {
    if word.category == LexicalCategory::Verb {
        base.default_spelling()
    } else {
        &word.base_form
    }
}

fn ends_in_consonant_y(text: &str) -> bool {
    let mut chars = text.chars().rev();
    chars.next() == Some('y') && chars.next().is_some_and(|c| !"aeiou".contains(c))
}

fn ends_in_sibilant(text: &str) -> bool {
    text.ends_with(['s', 'z', 'x']) || text.ends_with("ch") || text.ends_with("sh")
}

fn replace_suffix(text: &str, suffix: &str, replacement: &str) -> String {
    format!("{}{replacement}", &text[..text.len() - suffix.len()])
}

fn double_last(text: &str, suffix: &str) -> String {
    match text.chars().last() {
        Some(last) => format!("{text}{last}{suffix}"),
        None => suffix.to_string(),
    }
}

pub fn noun(word: &InflectedWord, base: &WordElement) -> String {
    let base_form = base_form(word, base);
    let proper = word.flag(Feature::Proper) || base.flag(Feature::Proper);
    let realised = if word.is_plural() && !proper {
        plural_noun(word, base, base_form)
    } else {
        base_form.to_string()
    };
    possessive(word, realised)
}

fn plural_noun(word: &InflectedWord, base: &WordElement, base_form: &str) -> String {
    let pattern = inflection(word, base);
    if pattern == Some(Inflection::Uncount) {
        return base_form.to_string();
    }
    if let Some(plural) = lexical(word, base, Feature::Plural) {
        return plural.to_string();
    }
    match pattern {
        Some(Inflection::GrecoLatinRegular) => greco_latin_plural(base_form),
        _ => regular_plural(base_form),
    }
}

pub fn regular_plural(base: &str) -> String {
    if ends_in_consonant_y(base) {
        replace_suffix(base, "y", "ies")
    } else if ends_in_sibilant(base) {
        format!("{base}es")
    } else {
        format!("{base}s")
    }
}

pub fn greco_latin_plural(base: &str) -> String {
    if base.ends_with("us") {
        replace_suffix(base, "us", "i")
    } else if base.ends_with("ma") {
        format!("{base}ta")
    } else if base.ends_with('a') {
        format!("{base}e")
    } else if base.ends_with("um") || base.ends_with("on") {
        format!("{}a", &base[..base.len() - 2])
    } else if base.ends_with("sis") {
        replace_suffix(base, "sis", "ses")
    } else if base.ends_with("is") {
        replace_suffix(base, "is", "ides")
    } else if base.ends_with("men") {
        replace_suffix(base, "men", "mina")
    } else if base.ends_with("ex") {
        replace_suffix(base, "ex", "ices")
    } else if base.ends_with('x') {
        replace_suffix(base, "x", "ces")
    } else {
        base.to_string()
    }
}

fn possessive(word: &InflectedWord, mut realised: String) -> String {
    if word.flag(Feature::Possessive) {
        if realised.ends_with('s') {
            realised.push('\'');
        } else {
            realised.push_str("'s");
        }
    }
    realised
}

pub fn verb(word: &InflectedWord, base: &WordElement) -> String {
    let number = word.number();
    let person = word.person();
    let tense = word.tense().unwrap_or(Tense::Present);
    let form = word.form();
    let pattern = inflection(word, base);
    let base_form = base_form(word, base);
    let is_be = base_form.eq_ignore_ascii_case("be");

    if word.flag(Feature::Negated) || form == Some(Form::BareInfinitive) {
        return base_form.to_string();
    }
    if form == Some(Form::PresentParticiple) {
        return match lexical(word, base, Feature::PresentParticiple) {
            Some(form) => form.to_string(),
            None if pattern == Some(Inflection::RegularDouble) => double_last(base_form, "ing"),
            None => regular_present_participle(base_form),
        };
    }
    if form == Some(Form::PastParticiple) {
        return match lexical(word, base, Feature::PastParticiple) {
            Some(form) => form.to_string(),
            None if is_be => "been".to_string(),
            None if pattern == Some(Inflection::RegularDouble) => double_last(base_form, "ed"),
            None => regular_past(base_form, number, person),
        };
    }
    if tense == Tense::Past {
        return match lexical(word, base, Feature::Past) {
            Some(form) if !is_be => form.to_string(),
            _ if pattern == Some(Inflection::RegularDouble) => double_last(base_form, "ed"),
            _ => regular_past(base_form, number, person),
        };
    }
    let singular = matches!(number, None | Some(NumberAgreement::Singular));
    let third = matches!(person, None | Some(Person::Third));
    if singular && third && tense == Tense::Present {
        if is_be {
            return "is".to_string();
        }
        return match lexical(word, base, Feature::Present3s) {
            Some(form) => form.to_string(),
            None => present_third_singular(base_form),
        };
    }
    if is_be {
        if person == Some(Person::First) && singular {
            "am".to_string()
        } else {
            "are".to_string()
        }
    } else {
        base_form.to_string()
    }
}

pub fn present_third_singular(base: &str) -> String {
    if base.eq_ignore_ascii_case("be") {
        "is".to_string()
    } else if ends_in_sibilant(base) {
        format!("{base}es")
    } else if ends_in_consonant_y(base) {
        replace_suffix(base, "y", "ies")
    } else {
        format!("{base}s")
    }
}

pub fn regular_past(base: &str, number: Option<NumberAgreement>, person: Option<Person>) -> String {
    if base.eq_ignore_ascii_case("be") {
        if number == Some(NumberAgreement::Plural) || person == Some(Person::Second) {
            "were".to_string()
        } else {
            "was".to_string()
        }
    } else if base.ends_with('e') {
        format!("{base}d")
    } else if ends_in_consonant_y(base) {
        replace_suffix(base, "y", "ied")
    } else {
        format!("{base}ed")
    }
}

pub fn regular_present_participle(base: &str) -> String {
    if base.eq_ignore_ascii_case("be") {
        return "being".to_string();
    }
    if base.ends_with("ie") {
        return replace_suffix(base, "ie", "ying");
    }
    let mut chars = base.chars().rev();
    let drops_e = chars.next() == Some('e') && chars.next().is_some_and(|c| !"iyeo".contains(c));
    if drops_e {
        replace_suffix(base, "e", "ing")
    } else {
        format!("{base}ing")
    }
}

pub fn adjective(word: &InflectedWord, base: &WordElement) -> String {
    graded(word, base, inflection(word, base) == Some(Inflection::RegularDouble))
}

pub fn adverb(word: &InflectedWord, base: &WordElement) -> String {
    graded(word, base, false)
}

fn graded(word: &InflectedWord, base: &WordElement, doubles: bool) -> String {
    let base_form = base_form(word, base);
    if word.flag(Feature::IsComparative) {
        match lexical(word, base, Feature::Comparative) {
            Some(form) => form.to_string(),
            None if doubles => double_last(base_form, "er"),
            None => regular_comparative(base_form),
        }
    } else if word.flag(Feature::IsSuperlative) {
        match lexical(word, base, Feature::Superlative) {
            Some(form) => form.to_string(),
            None if doubles => double_last(base_form, "est"),
            None => regular_superlative(base_form),
        }
    } else {
        base_form.to_string()
    }
}

pub fn regular_comparative(base: &str) -> String {
    if ends_in_consonant_y(base) {
        replace_suffix(base, "y", "ier")
    } else if base.ends_with('e') {
        format!("{base}r")
    } else {
        format!("{base}er")
    }
}

pub fn regular_superlative(base: &str) -> String {
    if ends_in_consonant_y(base) {
        replace_suffix(base, "y", "iest")
    } else if base.ends_with('e') {
        format!("{base}st")
    } else {
        format!("{base}est")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(base: &str, category: LexicalCategory) -> (InflectedWord, WordElement) {
        let entry = WordElement::new(base, category);
        (InflectedWord::from_word(entry.clone()), entry)
    }

    #[test]
    fn regular_plurals() {
        assert_eq!(regular_plural("baby"), "babies");
        assert_eq!(regular_plural("boy"), "boys");
        assert_eq!(regular_plural("church"), "churches");
        assert_eq!(regular_plural("box"), "boxes");
        assert_eq!(regular_plural("dog"), "dogs");
    }

    #[test]
    fn greco_latin_plurals() {
        assert_eq!(greco_latin_plural("fungus"), "fungi");
        assert_eq!(greco_latin_plural("stigma"), "stigmata");
        assert_eq!(greco_latin_plural("alga"), "algae");
        assert_eq!(greco_latin_plural("datum"), "data");
        assert_eq!(greco_latin_plural("criterion"), "criteria");
        assert_eq!(greco_latin_plural("analysis"), "analyses");
        assert_eq!(greco_latin_plural("iris"), "irides");
        assert_eq!(greco_latin_plural("stamen"), "stamina");
        assert_eq!(greco_latin_plural("index"), "indices");
        assert_eq!(greco_latin_plural("matrix"), "matrices");
    }

    #[test]
    fn plural_noun_prefers_the_lexicon() {
        let (mut w, mut entry) = word("woman", LexicalCategory::Noun);
        entry.set(Feature::Plural, "women");
        w.base_word = Some(Box::new(entry.clone()));
        w.set(Feature::Number, NumberAgreement::Plural);
        assert_eq!(noun(&w, &entry), "women");

        let (mut rice, mut entry) = word("rice", LexicalCategory::Noun);
        entry.set(Feature::DefaultInflection, Inflection::Uncount);
        rice.set(Feature::Number, NumberAgreement::Plural);
        assert_eq!(noun(&rice, &entry), "rice");
    }

    #[test]
    fn possessive_nouns() {
        let (mut dog, entry) = word("dog", LexicalCategory::Noun);
        dog.set(Feature::Possessive, true);
        assert_eq!(noun(&dog, &entry), "dog's");
        dog.set(Feature::Number, NumberAgreement::Plural);
        assert_eq!(noun(&dog, &entry), "dogs'");
    }

    #[test]
    fn third_singular_present() {
        assert_eq!(present_third_singular("kiss"), "kisses");
        assert_eq!(present_third_singular("watch"), "watches");
        assert_eq!(present_third_singular("cry"), "cries");
        assert_eq!(present_third_singular("play"), "plays");
        assert_eq!(present_third_singular("chase"), "chases");

        let (chase, entry) = word("chase", LexicalCategory::Verb);
        assert_eq!(verb(&chase, &entry), "chases");
    }

    #[test]
    fn be_is_irregular_by_rule() {
        let (mut be, entry) = word("be", LexicalCategory::Verb);
        assert_eq!(verb(&be, &entry), "is");
        be.set(Feature::Person, Person::First);
        assert_eq!(verb(&be, &entry), "am");
        be.set(Feature::Tense, Tense::Past);
        assert_eq!(verb(&be, &entry), "was");
        be.set(Feature::Number, NumberAgreement::Plural);
        assert_eq!(verb(&be, &entry), "were");
        be.set(Feature::Form, Form::PastParticiple);
        assert_eq!(verb(&be, &entry), "been");
        be.set(Feature::Form, Form::PresentParticiple);
        assert_eq!(verb(&be, &entry), "being");
    }

    #[test]
    fn past_forms() {
        assert_eq!(regular_past("love", None, None), "loved");
        assert_eq!(regular_past("cry", None, None), "cried");
        assert_eq!(regular_past("kick", None, None), "kicked");

        let (mut stop, mut entry) = word("stop", LexicalCategory::Verb);
        entry.set(Feature::DefaultInflection, Inflection::RegularDouble);
        stop.set(Feature::Tense, Tense::Past);
        assert_eq!(verb(&stop, &entry), "stopped");
        stop.set(Feature::Form, Form::PresentParticiple);
        assert_eq!(verb(&stop, &entry), "stopping");
    }

    #[test]
    fn present_participles() {
        assert_eq!(regular_present_participle("lie"), "lying");
        assert_eq!(regular_present_participle("make"), "making");
        assert_eq!(regular_present_participle("see"), "seeing");
        assert_eq!(regular_present_participle("go"), "going");
    }

    #[test]
    fn negated_verbs_keep_their_base() {
        let (mut kiss, entry) = word("kiss", LexicalCategory::Verb);
        kiss.set(Feature::Negated, true);
        assert_eq!(verb(&kiss, &entry), "kiss");
    }

    #[test]
    fn graded_adjectives() {
        let (mut happy, entry) = word("happy", LexicalCategory::Adjective);
        happy.set(Feature::IsComparative, true);
        assert_eq!(adjective(&happy, &entry), "happier");

        let (mut big, mut entry) = word("big", LexicalCategory::Adjective);
        entry.set(Feature::DefaultInflection, Inflection::RegularDouble);
        big.set(Feature::IsSuperlative, true);
        assert_eq!(adjective(&big, &entry), "biggest");

        let (mut nice, entry) = word("nice", LexicalCategory::Adverb);
        nice.set(Feature::IsComparative, true);
        assert_eq!(adverb(&nice, &entry), "nicer");
    }

    #[test]
    fn pronoun_table() {
        assert_eq!(pronoun_form(NumberAgreement::Singular, Case::Objective, Referent::Masculine), "him");
        assert_eq!(pronoun_form(NumberAgreement::Plural, Case::Reflexive, Referent::First), "ourselves");
        assert_eq!(
            pronoun_form(NumberAgreement::Singular, Case::PossessiveDeterminer, Referent::Feminine),
            "her"
        );
    }

    #[test]
    fn pronoun_case_follows_function() {
        let (mut he, _) = word("he", LexicalCategory::Pronoun);
        he.set(Feature::Person, Person::Third);
        he.set(Feature::Gender, Gender::Masculine);
        he.set_function(DiscourseFunction::Subject);
        assert_eq!(pronoun(&he), "he");
        he.set(Feature::Passive, true);
        assert_eq!(pronoun(&he), "him");
        he.set_function(DiscourseFunction::Object);
        assert_eq!(pronoun(&he), "he");
        he.clear_feature(Feature::Passive);
        assert_eq!(pronoun(&he), "him");
        he.set(Feature::Possessive, true);
        assert_eq!(pronoun(&he), "his");
        he.set(Feature::Reflexive, true);
        assert_eq!(pronoun(&he), "himself");
    }

    #[test]
    fn wh_pronouns_are_echoed() {
        let (mut who, _) = word("who", LexicalCategory::Pronoun);
        who.set_function(DiscourseFunction::Object);
        assert_eq!(pronoun(&who), "who");
    }
}
