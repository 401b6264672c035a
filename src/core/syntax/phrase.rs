//! Generic phrases (prepositional, adjective, adverb) and the list helper
//! every other phrase helper uses.

use super::SyntaxProcessor;
use crate::schema::category::{LexicalCategory, PhraseCategory};
use crate::schema::element::{Element, HasFeatures, InflectedWord, PhraseElement};
use crate::schema::features::{DiscourseFunction, Feature};

pub(super) fn realise(syntax: &SyntaxProcessor<'_>, mut phrase: PhraseElement) -> Element {
    let mut out = Vec::new();
    realise_list(
        syntax,
        &mut out,
        std::mem::take(&mut phrase.premodifiers),
        DiscourseFunction::PreModifier,
    );
    realise_head(syntax, &mut phrase, &mut out);
    realise_complements(syntax, &mut phrase, &mut out);
    realise_list(
        syntax,
        &mut out,
        std::mem::take(&mut phrase.postmodifiers),
        DiscourseFunction::PostModifier,
    );
    Element::list(out)
}

fn realise_head(syntax: &SyntaxProcessor<'_>, phrase: &mut PhraseElement, out: &mut Vec<Element>) {
    let Some(mut head) = phrase.head.take().map(|h| *h) else {
        return;
    };
    if let Some(value) = phrase.feature(Feature::IsComparative).cloned() {
        head.set_feature(Feature::IsComparative, value);
    } else if let Some(value) = phrase.feature(Feature::IsSuperlative).cloned() {
        head.set_feature(Feature::IsSuperlative, value);
    }
    if let Some(mut head) = syntax.realise(head) {
        head.set_function(DiscourseFunction::Head);
        out.push(head);
    }
}

/// Complements are joined with "and".
fn realise_complements(syntax: &SyntaxProcessor<'_>, phrase: &mut PhraseElement, out: &mut Vec<Element>) {
    let mut first = true;
    for complement in std::mem::take(&mut phrase.complements) {
        let Some(mut current) = syntax.realise(complement) else {
            continue;
        };
        current.set_function(DiscourseFunction::Complement);
        if !first {
            out.push(InflectedWord::new("and", LexicalCategory::Conjunction).into());
        }
        first = false;
        out.push(current);
    }
}

/// Realise `elements` under one discourse function and append them as a
/// single list, if any survive.
pub(super) fn realise_list(
    syntax: &SyntaxProcessor<'_>,
    out: &mut Vec<Element>,
    elements: Vec<Element>,
    function: DiscourseFunction,
) {
    let mut realised = Vec::new();
    for element in elements {
        let appositive = element.flag(Feature::Appositive);
        if let Some(mut current) = syntax.realise(element) {
            current.set_function(function);
            if appositive {
                current.set(Feature::Appositive, true);
            }
            realised.push(current);
        }
    }
    if !realised.is_empty() {
        out.push(Element::list(realised));
    }
}

/// A clause whose only subject is the expletive "there".
pub fn is_expletive_subject(phrase: &PhraseElement) -> bool {
    match phrase.subjects.as_slice() {
        [subject] if subject.is_phrase(PhraseCategory::NounPhrase) => {
            subject.flag(Feature::ExpletiveSubject)
        }
        [Element::Canned(text)] if text.category == PhraseCategory::CannedText.into() => {
            text.text.trim_matches(' ').eq_ignore_ascii_case("there")
        }
        _ => false,
    }
}
