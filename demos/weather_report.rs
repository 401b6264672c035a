//! Builds a short weather report document and prints it.
//!
//! Run with: cargo run --example weather_report
//! Set RUST_LOG=surface_realiser=trace to watch each stage's tree.

use surface_realiser::{Element, Feature, HasFeatures, NumberAgreement, Realiser, RealiseError, Tense};
use tracing_subscriber::EnvFilter;

struct Reading {
    place: &'static str,
    sky: &'static str,
    rain: bool,
}

const READINGS: [Reading; 3] = [
    Reading { place: "Aberdeen", sky: "cloudy", rain: true },
    Reading { place: "Edinburgh", sky: "bright", rain: false },
    Reading { place: "Glasgow", sky: "grey", rain: true },
];

fn main() -> Result<(), RealiseError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let realiser = Realiser::builder().build()?;
    let factory = realiser.factory();

    let mut summary = factory.create_paragraph(Vec::new());
    let mut yesterday = factory.create_clause("it", "be", "wet");
    yesterday.set(Feature::Tense, Tense::Past);
    factory.add_front_modifier(&mut yesterday, "yesterday");
    summary.add_component(factory.create_sentence(yesterday).into());

    let mut tomorrow = factory.create_clause("the wind", "ease", ());
    tomorrow.set(Feature::Tense, Tense::Future);
    factory.add_post_modifier(&mut tomorrow, factory.create_adverb_phrase("tomorrow"));
    summary.add_component(factory.create_sentence(tomorrow).into());

    let mut outlook = factory.create_list(Vec::new());
    for reading in READINGS {
        let mut clause = factory.create_clause(reading.place, "be", reading.sky);
        if reading.rain {
            let mut showers = factory.create_noun_phrase((), "shower");
            showers.set(Feature::Number, NumberAgreement::Plural);
            let with = factory.create_preposition_phrase("with", showers);
            factory.add_post_modifier(&mut clause, with);
        }
        outlook.add_component(factory.create_list_item(clause).into());
    }

    let mut section = factory.create_section(Some("Outlook"), Vec::new());
    section.add_component(outlook.into());

    let mut document = factory.create_document(Some("Weather Report"), Vec::new());
    document.add_component(summary.into());
    document.add_component(section.into());

    let realised = realiser.realise(Element::from(document))?;
    println!("{}", realised.text);
    Ok(())
}
