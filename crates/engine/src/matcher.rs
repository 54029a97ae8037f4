use crate::filter::{MatchMode, ResolvedFilter};
use crate::model::Recipe;
use crate::parser::IngredientListParser;

/// Decides which recipes survive a [`ResolvedFilter`].
#[derive(Debug, Clone, Copy)]
pub struct RecipeMatcher<'a> {
    parser: &'a IngredientListParser,
}

impl<'a> RecipeMatcher<'a> {
    pub fn new(parser: &'a IngredientListParser) -> Self {
        Self { parser }
    }

    pub fn matches(&self, recipe: &Recipe, filter: &ResolvedFilter) -> bool {
        if filter.forced_empty {
            return false;
        }

        if !filter.years.is_empty() && !recipe.year.is_some_and(|y| filter.years.contains(&y)) {
            return false;
        }

        if !filter.settlements.contains(recipe.settlement_id) {
            return false;
        }

        if !filter.category_ids.is_empty()
            && !recipe
                .category_id
                .is_some_and(|id| filter.category_ids.contains(&id))
        {
            return false;
        }

        if filter.required_tokens.is_empty() {
            return true;
        }

        match filter.mode {
            MatchMode::Normal => {
                let tokens = self.parser.parse_recipe(recipe);
                !tokens.is_empty() && filter.required_tokens.is_subset(&tokens)
            }
            // Substring test on the raw text, not the negated token check.
            MatchMode::Reverse => {
                let text = self.parser.recipe_text(recipe).to_lowercase();
                filter.terms.iter().all(|term| !text.contains(term.as_str()))
            }
        }
    }

    pub fn filter_recipes<'r>(
        &self,
        recipes: &'r [Recipe],
        filter: &ResolvedFilter,
    ) -> Vec<&'r Recipe> {
        if filter.forced_empty {
            return Vec::new();
        }

        let matched: Vec<&Recipe> = recipes
            .iter()
            .filter(|recipe| self.matches(recipe, filter))
            .collect();

        tracing::debug!(
            candidates = recipes.len(),
            matched = matched.len(),
            mode = %filter.mode,
            "recipes filtered"
        );

        matched
    }
}
