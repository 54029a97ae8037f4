use serde::{Deserialize, Serialize};

use crate::filter::{FilterRequest, FilterResolver, ResolvedFilter};
use crate::heatmap::DEFAULT_CLASSES;
use crate::matcher::RecipeMatcher;
use crate::model::{Recipe, Settlement};
use crate::parser::{DEFAULT_EXCLUDED_URLS, IngredientListParser};
use crate::tokenizer::{DEFAULT_SUFFIX_WORDS, IngredientTokenizer};

/// Number of categories shown per region on the map overlay.
pub const DEFAULT_TOP_CATEGORIES: usize = 3;

/// Rule sets and presentation knobs of the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Recipe URLs whose ingredient text is ignored.
    pub excluded_urls: Vec<String>,
    /// Final words joined with the word before them. Empty for the plain tokenizer.
    pub suffix_words: Vec<String>,
    pub heatmap_classes: usize,
    pub top_categories: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            excluded_urls: DEFAULT_EXCLUDED_URLS.iter().map(|s| s.to_string()).collect(),
            suffix_words: DEFAULT_SUFFIX_WORDS.iter().map(|s| s.to_string()).collect(),
            heatmap_classes: DEFAULT_CLASSES,
            top_categories: DEFAULT_TOP_CATEGORIES,
        }
    }
}

impl EngineConfig {
    pub fn tokenizer(&self) -> IngredientTokenizer {
        IngredientTokenizer::new(&self.suffix_words)
    }

    pub fn parser(&self) -> IngredientListParser {
        IngredientListParser::new(self.tokenizer(), self.excluded_urls.iter().cloned())
    }
}

/// Resolve and match in one step, holding the configured parser.
#[derive(Debug, Clone)]
pub struct Engine {
    parser: IngredientListParser,
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            parser: config.parser(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn parser(&self) -> &IngredientListParser {
        &self.parser
    }

    pub fn resolve(&self, request: &FilterRequest, settlements: &[Settlement]) -> ResolvedFilter {
        FilterResolver::resolve(request, settlements, self.parser.tokenizer())
    }

    pub fn filter<'r>(
        &self,
        request: &FilterRequest,
        recipes: &'r [Recipe],
        settlements: &[Settlement],
    ) -> Vec<&'r Recipe> {
        let filter = self.resolve(request, settlements);
        RecipeMatcher::new(&self.parser).filter_recipes(recipes, &filter)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
