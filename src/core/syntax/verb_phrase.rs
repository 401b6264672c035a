//! Verb phrases. The verb group is built as a stack: particle first, then
//! the head verb, then each auxiliary ("be", "have", "not", "do", the modal)
//! pushed in front of what came before. The bottom of the stack is the main
//! verb; everything above it is realised in reverse as auxiliaries.

use super::phrase::realise_list;
use super::SyntaxProcessor;
use crate::schema::category::{LexicalCategory, PhraseCategory};
use crate::schema::element::{Element, HasFeatures, InflectedWord, PhraseElement};
use crate::schema::features::{
    DiscourseFunction, Feature, Form, InterrogativeType, NumberAgreement, Tense,
};

pub(super) fn realise(syntax: &SyntaxProcessor<'_>, mut phrase: PhraseElement) -> Element {
    let head_copular = phrase.head.as_deref().is_some_and(is_copular);
    let mut group = create_verb_group(syntax, &mut phrase, head_copular).into_iter();
    let main = group.next();
    let auxiliaries: Vec<Element> = group.collect();

    let mut out = Vec::new();
    let premodifiers = std::mem::take(&mut phrase.premodifiers);
    let realise_auxiliary =
        !phrase.has(Feature::RealiseAuxiliary) || phrase.flag(Feature::RealiseAuxiliary);
    if realise_auxiliary {
        realise_auxiliaries(syntax, &mut out, auxiliaries);
        realise_list(syntax, &mut out, premodifiers, DiscourseFunction::PreModifier);
        realise_main_verb(syntax, &phrase, main, &mut out);
    } else if head_copular {
        realise_main_verb(syntax, &phrase, main, &mut out);
        realise_list(syntax, &mut out, premodifiers, DiscourseFunction::PreModifier);
    } else {
        realise_list(syntax, &mut out, premodifiers, DiscourseFunction::PreModifier);
        realise_main_verb(syntax, &phrase, main, &mut out);
    }
    realise_complements(syntax, &mut phrase, &mut out);
    realise_list(
        syntax,
        &mut out,
        std::mem::take(&mut phrase.postmodifiers),
        DiscourseFunction::PostModifier,
    );
    Element::list(out)
}

fn realise_auxiliaries(syntax: &SyntaxProcessor<'_>, out: &mut Vec<Element>, auxiliaries: Vec<Element>) {
    for aux in auxiliaries.into_iter().rev() {
        if let Some(mut current) = syntax.realise(aux) {
            current.set_function(DiscourseFunction::Auxiliary);
            out.push(current);
        }
    }
}

fn realise_main_verb(
    syntax: &SyntaxProcessor<'_>,
    phrase: &PhraseElement,
    main: Option<Element>,
    out: &mut Vec<Element>,
) {
    let Some(mut main) = main else {
        return;
    };
    main.set_opt(
        Feature::InterrogativeType,
        phrase.feature(Feature::InterrogativeType).cloned(),
    );
    if let Some(current) = syntax.realise(main) {
        out.push(current);
    }
}

/// Indirect objects, then direct objects, then everything else. Passive
/// phrases keep only their indirect objects: the clause has already moved
/// the direct objects to the front.
fn realise_complements(syntax: &SyntaxProcessor<'_>, phrase: &mut PhraseElement, out: &mut Vec<Element>) {
    let mut indirects = Vec::new();
    let mut directs = Vec::new();
    let mut unknowns = Vec::new();
    for complement in std::mem::take(&mut phrase.complements) {
        let function = complement.function();
        let Some(mut current) = syntax.realise(complement) else {
            continue;
        };
        current.set_function(DiscourseFunction::Complement);
        match function {
            Some(DiscourseFunction::IndirectObject) => indirects.push(current),
            Some(DiscourseFunction::Object) => directs.push(current),
            _ => unknowns.push(current),
        }
    }
    let kind = phrase.interrogative_type();
    if !InterrogativeType::is_indirect_object(kind) {
        out.extend(indirects);
    }
    if !phrase.flag(Feature::Passive) {
        if !InterrogativeType::is_object(kind) {
            out.extend(directs);
        }
        out.extend(unknowns);
    }
}

fn create_verb_group(
    syntax: &SyntaxProcessor<'_>,
    phrase: &mut PhraseElement,
    head_copular: bool,
) -> Vec<Element> {
    let form = phrase.form();
    let mut tense = phrase.tense();
    let modal = phrase.text(Feature::Modal).map(str::to_string);
    let interrogative = phrase.has(Feature::InterrogativeType);
    let ignore_modal = phrase.flag(Feature::IgnoreModal);

    if matches!(form, Some(Form::Gerund) | Some(Form::Infinitive)) {
        tense = Some(Tense::Present);
    }
    let mut actual_modal = None;
    let mut modal_past = false;
    if form == Some(Form::Infinitive) {
        actual_modal = Some("to".to_string());
    } else if matches!(form, None | Some(Form::Normal)) {
        let coordinated_head = matches!(phrase.head.as_deref(), Some(Element::Coordinated(_)));
        if tense == Some(Tense::Future) && modal.is_none() && (!coordinated_head || interrogative) {
            actual_modal = Some("will".to_string());
        } else if let Some(modal) = &modal {
            actual_modal = Some(modal.clone());
            modal_past = tense == Some(Tense::Past);
        }
    }

    let mut group = Vec::new();
    if let Some(particle) = phrase.text(Feature::Particle) {
        group.push(Element::canned(particle));
    }
    let mut front = grab_head_verb(phrase, tense, modal.is_some());
    if matches!(
        form,
        Some(Form::Imperative) | Some(Form::Infinitive) | Some(Form::BareInfinitive)
    ) {
        if let Some(front) = front.as_mut() {
            front.set(Feature::NonMorph, true);
        }
    }
    if phrase.flag(Feature::Passive) {
        front = Some(add_be(front, &mut group, Form::PastParticiple));
    }
    if phrase.flag(Feature::Progressive) {
        front = Some(add_be(front, &mut group, Form::PresentParticiple));
    }
    if phrase.flag(Feature::Perfect) || modal_past {
        front = Some(add_have(front, &mut group, modal.is_some(), tense));
    }
    if actual_modal.is_some() && !ignore_modal {
        if let Some(mut verb) = front.take() {
            verb.set(Feature::NonMorph, true);
            group.push(verb);
        }
    }
    if phrase.flag(Feature::Negated) {
        front = create_not(syntax, phrase, &mut group, front, modal.is_some());
    }
    if let Some(front) = front {
        push_front_verb(phrase, &mut group, front, form, interrogative, head_copular);
    }
    if let Some(modal) = actual_modal {
        if !ignore_modal {
            group.push(InflectedWord::new(modal, LexicalCategory::Modal).into());
        }
    }
    group
}

/// The head verb as a fresh occurrence. A modal blocks negation on it.
fn grab_head_verb(phrase: &mut PhraseElement, tense: Option<Tense>, has_modal: bool) -> Option<Element> {
    let mut front = match *phrase.head.take()? {
        Element::Word(word) => InflectedWord::from_word(word).into(),
        other => other,
    };
    if let Some(tense) = tense {
        front.set(Feature::Tense, tense);
    }
    if has_modal {
        front.set(Feature::Negated, false);
    }
    Some(front)
}

fn add_be(front: Option<Element>, group: &mut Vec<Element>, form: Form) -> Element {
    if let Some(mut verb) = front {
        verb.set(Feature::Form, form);
        group.push(verb);
    }
    InflectedWord::new("be", LexicalCategory::Verb).into()
}

fn add_have(front: Option<Element>, group: &mut Vec<Element>, has_modal: bool, tense: Option<Tense>) -> Element {
    if let Some(mut verb) = front {
        verb.set(Feature::Form, Form::PastParticiple);
        group.push(verb);
    }
    let mut have = InflectedWord::new("have", LexicalCategory::Verb);
    have.set_opt(Feature::Tense, tense.map(Into::into));
    if has_modal {
        have.set(Feature::NonMorph, true);
    }
    have.into()
}

/// Push "not", adding "do" support when nothing else can carry it. Object
/// questions get their "do" from the clause instead.
fn create_not(
    syntax: &SyntaxProcessor<'_>,
    phrase: &PhraseElement,
    group: &mut Vec<Element>,
    mut front: Option<Element>,
    has_modal: bool,
) -> Option<Element> {
    let add_do = !InterrogativeType::is_object(phrase.interrogative_type());
    let not: Element = InflectedWord::new("not", LexicalCategory::Adverb).into();
    if !group.is_empty() || front.as_ref().is_some_and(is_copular) {
        group.push(not);
        return front;
    }
    if let Some(verb) = front.as_mut() {
        if !has_modal {
            verb.set(Feature::Negated, true);
            group.push(verb.clone());
        }
    }
    group.push(not);
    if add_do {
        front = syntax.factory().create_inflected_word("do", LexicalCategory::Verb);
    }
    front
}

fn push_front_verb(
    phrase: &PhraseElement,
    group: &mut Vec<Element>,
    mut front: Element,
    form: Option<Form>,
    interrogative: bool,
    head_copular: bool,
) {
    let kind = phrase.interrogative_type();
    match form {
        Some(Form::Gerund) | Some(Form::PresentParticiple) => {
            front.set(Feature::Form, Form::PresentParticiple);
            group.push(front);
        }
        Some(Form::PastParticiple) => {
            front.set(Feature::Form, Form::PastParticiple);
            group.push(front);
        }
        _ if (!matches!(form, None | Some(Form::Normal)) || interrogative)
            && !head_copular
            && group.is_empty() =>
        {
            if !InterrogativeType::is_subject(kind) {
                front.set(Feature::NonMorph, true);
            }
            group.push(front);
        }
        _ => {
            front.set_opt(Feature::Tense, phrase.feature(Feature::Tense).cloned());
            front.set_opt(Feature::Person, phrase.feature(Feature::Person).cloned());
            front.set(Feature::Number, determine_number(phrase, head_copular));
            let negated_object_question =
                phrase.flag(Feature::Negated) && InterrogativeType::is_object(kind);
            if !negated_object_question {
                group.push(front);
            }
        }
    }
}

/// The phrase's own number, unless "be" agrees with its complement, as in
/// "there are dogs" or "what are the reasons".
fn determine_number(phrase: &PhraseElement, head_copular: bool) -> NumberAgreement {
    let number = phrase.number().unwrap_or(NumberAgreement::Singular);
    if !phrase.flag(Feature::ComplementAgreement) || !head_copular {
        return number;
    }
    let plural_complement = phrase
        .complements
        .iter()
        .any(|c| c.is_phrase(PhraseCategory::NounPhrase) && c.is_plural());
    if plural_complement {
        NumberAgreement::Plural
    } else {
        NumberAgreement::Singular
    }
}

/// Whether the element is, or is headed by, the verb "be".
pub fn is_copular(element: &Element) -> bool {
    match element {
        Element::Word(_) | Element::Inflected(_) => element
            .base_form()
            .is_some_and(|base| base.eq_ignore_ascii_case("be")),
        Element::Phrase(phrase) => phrase_is_copular(phrase),
        _ => false,
    }
}

/// A clause looks at the head of its verb phrase.
pub(super) fn phrase_is_copular(phrase: &PhraseElement) -> bool {
    let head = if phrase.is_clause() {
        match phrase.verb_phrase.as_deref() {
            Some(Element::Phrase(vp)) => vp.head.as_deref(),
            _ => None,
        }
    } else {
        phrase.head.as_deref()
    };
    matches!(head, Some(Element::Word(word)) if word.base_form == "be")
}
