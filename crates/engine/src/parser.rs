use std::collections::{BTreeSet, HashSet};

use crate::model::Recipe;
use crate::tokenizer::IngredientTokenizer;

/// Recipes whose scraped ingredient list is known to be garbled.
pub const DEFAULT_EXCLUDED_URLS: &[&str] = &[
    "https://www.izorzok.hu/zoldbableves-krumpligomboccal/",
    "https://www.izorzok.hu/klari-kulonleges-meggyes-retese/",
];

/// Splits a recipe's `|` delimited ingredient blob into canonical tokens.
#[derive(Debug, Clone, Default)]
pub struct IngredientListParser {
    tokenizer: IngredientTokenizer,
    excluded_urls: HashSet<String>,
}

impl IngredientListParser {
    pub fn new<I, S>(tokenizer: IngredientTokenizer, excluded_urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokenizer,
            excluded_urls: excluded_urls.into_iter().map(Into::into).collect(),
        }
    }

    pub fn tokenizer(&self) -> &IngredientTokenizer {
        &self.tokenizer
    }

    pub fn is_excluded(&self, url: &str) -> bool {
        self.excluded_urls.contains(url)
    }

    pub fn parse(&self, ingredients_text: &str) -> BTreeSet<String> {
        ingredients_text
            .split('|')
            .filter_map(|line| self.tokenizer.normalize(line))
            .collect()
    }

    /// Tokens of a recipe, or nothing at all for an excluded URL.
    pub fn parse_recipe(&self, recipe: &Recipe) -> BTreeSet<String> {
        if self.is_excluded(&recipe.url) {
            return BTreeSet::new();
        }

        self.parse(&recipe.ingredients_text)
    }

    /// Raw ingredient text of a recipe with the exclusion list applied.
    pub fn recipe_text<'a>(&self, recipe: &'a Recipe) -> &'a str {
        if self.is_excluded(&recipe.url) {
            return "";
        }

        &recipe.ingredients_text
    }
}
