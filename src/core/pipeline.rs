//! The realiser: syntax → morphology → orthography → formatting.
//!
//! Configuration comes from a RON file or the builder, and the lexicon
//! defaults to the bundled English one.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, trace};

use crate::core::factory::NlgFactory;
use crate::core::formatter::TextFormatter;
use crate::core::lexicon::{ron_options, Lexicon, LexiconError, MemoryLexicon};
use crate::core::morphology::MorphologyProcessor;
use crate::core::orthography::OrthographyProcessor;
use crate::core::syntax::SyntaxProcessor;
use crate::schema::category::DocumentCategory;
use crate::schema::document::DocumentElement;
use crate::schema::element::Element;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

#[derive(Debug, Error)]
pub enum RealiseError {
    #[error("lexicon error: {0}")]
    Lexicon(#[from] LexiconError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("element tree is more than {limit} levels deep (reached {depth})")]
    TooDeep { depth: usize, limit: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RealiserConfig {
    pub comma_separate_premodifiers: bool,
    pub comma_separate_cue_phrase: bool,
    pub max_depth: usize,
    /// A RON lexicon to use instead of the bundled one.
    pub lexicon: Option<PathBuf>,
}

impl Default for RealiserConfig {
    fn default() -> Self {
        Self {
            comma_separate_premodifiers: true,
            comma_separate_cue_phrase: false,
            max_depth: 512,
            lexicon: None,
        }
    }
}

impl RealiserConfig {
    pub fn load_from_ron(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<Self, ConfigError> {
        Ok(ron_options().from_str(input)?)
    }
}

/// A realised tree and its text.
#[derive(Debug, Clone, PartialEq)]
pub struct Realised {
    pub element: Element,
    pub text: String,
}

impl Realised {
    fn empty() -> Self {
        Self {
            element: Element::list(Vec::new()),
            text: String::new(),
        }
    }
}

/// Built via `Realiser::builder()`.
pub struct Realiser {
    lexicon: Arc<dyn Lexicon>,
    orthography: OrthographyProcessor,
    max_depth: usize,
}

#[derive(Default)]
pub struct RealiserBuilder {
    config: Option<RealiserConfig>,
    config_path: Option<PathBuf>,
    lexicon: Option<Arc<dyn Lexicon>>,
    comma_separate_premodifiers: Option<bool>,
    comma_separate_cue_phrase: Option<bool>,
    max_depth: Option<usize>,
}

impl Realiser {
    pub fn builder() -> RealiserBuilder {
        RealiserBuilder::default()
    }

    pub fn lexicon(&self) -> &dyn Lexicon {
        self.lexicon.as_ref()
    }

    /// A factory over this realiser's lexicon.
    pub fn factory(&self) -> NlgFactory<'_> {
        NlgFactory::new(self.lexicon.as_ref())
    }

    pub fn comma_separate_premodifiers(&self) -> bool {
        self.orthography.comma_separate_premodifiers()
    }

    pub fn set_comma_separate_premodifiers(&mut self, value: bool) {
        self.orthography.set_comma_separate_premodifiers(value);
    }

    pub fn comma_separate_cue_phrase(&self) -> bool {
        self.orthography.comma_separate_cue_phrase()
    }

    pub fn set_comma_separate_cue_phrase(&mut self, value: bool) {
        self.orthography.set_comma_separate_cue_phrase(value);
    }

    /// Realise one tree. A tree that realises to nothing gives empty text.
    pub fn realise(&self, element: Element) -> Result<Realised, RealiseError> {
        check_depth(&element, self.max_depth)?;
        trace!(tree = %element.print_tree(), "initial tree");

        let syntax = SyntaxProcessor::new(self.lexicon.as_ref());
        let Some(element) = syntax.realise(element) else {
            return Ok(Realised::empty());
        };
        trace!(tree = %element.print_tree(), "post-syntax tree");

        let morphology = MorphologyProcessor::new(self.lexicon.as_ref());
        let Some(element) = morphology.realise(element) else {
            return Ok(Realised::empty());
        };
        trace!(tree = %element.print_tree(), "post-morphology tree");

        let Some(element) = self.orthography.realise(element) else {
            return Ok(Realised::empty());
        };
        trace!(tree = %element.print_tree(), "post-orthography tree");

        let text = TextFormatter::new().format(&element);
        let text = text.trim_matches(' ').to_string();
        trace!(%text, "formatted");
        Ok(Realised { element, text })
    }

    pub fn realise_many(&self, elements: Vec<Element>) -> Result<Vec<Realised>, RealiseError> {
        elements.into_iter().map(|e| self.realise(e)).collect()
    }

    /// Realise as a sentence, wrapping anything below document level first.
    pub fn realise_sentence(&self, element: Element) -> Result<String, RealiseError> {
        let element = match element {
            Element::Document(_) => element,
            other => {
                let mut sentence = DocumentElement::new(DocumentCategory::Sentence, None);
                sentence.add_component(other);
                sentence.into()
            }
        };
        Ok(self.realise(element)?.text)
    }
}

/// Walk the tree with an explicit stack and fail once it passes `limit`.
fn check_depth(element: &Element, limit: usize) -> Result<(), RealiseError> {
    let mut stack = vec![(element, 1usize)];
    while let Some((node, depth)) = stack.pop() {
        if depth > limit {
            return Err(RealiseError::TooDeep { depth, limit });
        }
        stack.extend(node.children().into_iter().map(|child| (child, depth + 1)));
    }
    Ok(())
}

impl RealiserBuilder {
    pub fn config(mut self, config: RealiserConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Use this lexicon instead of the configured or bundled one.
    pub fn lexicon(mut self, lexicon: Arc<dyn Lexicon>) -> Self {
        self.lexicon = Some(lexicon);
        self
    }

    pub fn comma_separate_premodifiers(mut self, value: bool) -> Self {
        self.comma_separate_premodifiers = Some(value);
        self
    }

    pub fn comma_separate_cue_phrase(mut self, value: bool) -> Self {
        self.comma_separate_cue_phrase = Some(value);
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Options set directly on the builder win over the config file, which
    /// wins over an explicit config.
    pub fn build(self) -> Result<Realiser, RealiseError> {
        let config = match &self.config_path {
            Some(path) => RealiserConfig::load_from_ron(path)?,
            None => self.config.unwrap_or_default(),
        };

        let lexicon: Arc<dyn Lexicon> = match (self.lexicon, &config.lexicon) {
            (Some(lexicon), _) => lexicon,
            (None, Some(path)) => {
                let lexicon = MemoryLexicon::load_from_ron(path)?;
                debug!(path = %path.display(), words = lexicon.len(), "loaded configured lexicon");
                Arc::new(lexicon)
            }
            (None, None) => MemoryLexicon::english()?,
        };

        let orthography = OrthographyProcessor::new(
            self.comma_separate_premodifiers
                .unwrap_or(config.comma_separate_premodifiers),
            self.comma_separate_cue_phrase
                .unwrap_or(config.comma_separate_cue_phrase),
        );

        Ok(Realiser {
            lexicon,
            orthography,
            max_depth: self.max_depth.unwrap_or(config.max_depth),
        })
    }
}
