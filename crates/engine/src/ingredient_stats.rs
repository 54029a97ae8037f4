use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::collation;
use crate::model::{Category, Recipe, Region, Settlement, category_name, region_name};
use crate::parser::IngredientListParser;

/// Number of global ingredient segments kept for the overview pie.
pub const GLOBAL_SEGMENTS: usize = 5;

const UNKNOWN_TITLE: &str = "Ismeretlen recept";

/// Five-number summary of a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBox {
    pub category_id: i64,
    pub name: String,
    pub count: usize,
    #[serde(flatten)]
    pub stats: BoxStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankOptions {
    /// Report the least common ingredient instead of the most common one.
    #[serde(default)]
    pub rarest: bool,
    #[serde(default)]
    pub category_id: Option<i64>,
    /// Raw ingredient names to leave out, tokenized before comparison.
    #[serde(default)]
    pub excluded_terms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionIngredient {
    pub region_id: i64,
    pub region_name: String,
    pub ingredient: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientCount {
    pub ingredient: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientRanking {
    pub regions: Vec<RegionIngredient>,
    pub segments: Vec<IngredientCount>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BucketKind {
    Min,
    Avg,
    Max,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub title: String,
    pub url: String,
    pub year: Option<i32>,
    pub settlement_name: Option<String>,
    pub ingredient_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientBucket {
    pub kind: BucketKind,
    pub ingredient_count: usize,
    pub recipes: Vec<RecipeSummary>,
}

fn median(sorted: &[usize]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }

    let mid = n / 2;
    if n % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    } else {
        sorted[mid] as f64
    }
}

/// Most common first, or least common first when `rarest`; ties by Hungarian name.
fn by_frequency(rarest: bool) -> impl Fn(&(String, usize), &(String, usize)) -> Ordering {
    move |a, b| {
        let by_count = if rarest { a.1.cmp(&b.1) } else { b.1.cmp(&a.1) };
        by_count.then_with(|| collation::compare(&a.0, &b.0))
    }
}

pub struct IngredientStatsAggregator;

impl IngredientStatsAggregator {
    /// Median-of-halves summary; `None` below two observations.
    pub fn box_stats(counts: &[usize]) -> Option<BoxStats> {
        if counts.len() < 2 {
            return None;
        }

        let mut sorted = counts.to_vec();
        sorted.sort_unstable();

        let n = sorted.len();
        let mid = n / 2;
        let lower = &sorted[..mid];
        let upper = &sorted[if n % 2 == 0 { mid } else { mid + 1 }..];

        Some(BoxStats {
            min: sorted[0] as f64,
            q1: median(lower),
            median: median(&sorted),
            q3: median(upper),
            max: sorted[n - 1] as f64,
        })
    }

    /// Ingredient-count distribution of every category with at least two recipes.
    pub fn category_boxes(
        matched: &[&Recipe],
        parser: &IngredientListParser,
        categories: &[Category],
    ) -> Vec<CategoryBox> {
        let names: HashMap<i64, &str> = categories
            .iter()
            .filter_map(|c| c.name.as_deref().map(|name| (c.id, name)))
            .collect();

        let mut values: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
        for recipe in matched {
            let Some(category_id) = recipe.category_id else {
                continue;
            };

            let count = parser.parse_recipe(recipe).len();
            if count > 0 {
                values.entry(category_id).or_default().push(count);
            }
        }

        let mut boxes: Vec<CategoryBox> = values
            .into_iter()
            .filter_map(|(category_id, counts)| {
                let stats = Self::box_stats(&counts)?;

                Some(CategoryBox {
                    category_id,
                    name: category_name(category_id, names.get(&category_id).copied()),
                    count: counts.len(),
                    stats,
                })
            })
            .collect();

        boxes.sort_by(|a, b| {
            collation::compare(&a.name, &b.name).then_with(|| a.category_id.cmp(&b.category_id))
        });

        boxes
    }

    /// Leading ingredient of every region plus the global top segments.
    pub fn rank_ingredients(
        by_region: &BTreeMap<i64, Vec<&Recipe>>,
        regions: &[Region],
        parser: &IngredientListParser,
        options: &RankOptions,
    ) -> IngredientRanking {
        let region_names: HashMap<i64, &str> = regions
            .iter()
            .filter_map(|r| r.name.as_deref().map(|name| (r.id, name)))
            .collect();

        let excluded: HashSet<String> = options
            .excluded_terms
            .iter()
            .filter_map(|term| parser.tokenizer().normalize(term))
            .collect();

        let order = by_frequency(options.rarest);
        let mut global: HashMap<String, usize> = HashMap::new();
        let mut leaders = Vec::new();

        for (region_id, recipes) in by_region {
            let mut counts: HashMap<String, usize> = HashMap::new();

            for recipe in recipes {
                if options
                    .category_id
                    .is_some_and(|id| recipe.category_id != Some(id))
                {
                    continue;
                }

                for token in parser.parse_recipe(recipe) {
                    if excluded.contains(&token) {
                        continue;
                    }

                    *global.entry(token.clone()).or_default() += 1;
                    *counts.entry(token).or_default() += 1;
                }
            }

            let Some((ingredient, count)) = counts.into_iter().min_by(&order) else {
                continue;
            };

            leaders.push(RegionIngredient {
                region_id: *region_id,
                region_name: region_name(*region_id, region_names.get(region_id).copied()),
                ingredient,
                count,
            });
        }

        leaders.sort_by(|a, b| {
            let by_count = if options.rarest {
                a.count.cmp(&b.count)
            } else {
                b.count.cmp(&a.count)
            };
            by_count
                .then_with(|| collation::compare(&a.region_name, &b.region_name))
                .then_with(|| a.region_id.cmp(&b.region_id))
        });

        let mut segments: Vec<(String, usize)> = global.into_iter().collect();
        segments.sort_by(&order);
        segments.truncate(GLOBAL_SEGMENTS);

        tracing::debug!(
            regions = leaders.len(),
            rarest = options.rarest,
            excluded = excluded.len(),
            "ingredients ranked"
        );

        IngredientRanking {
            regions: leaders,
            segments: segments
                .into_iter()
                .map(|(ingredient, count)| IngredientCount { ingredient, count })
                .collect(),
        }
    }

    /// Recipes with the fewest, closest-to-average and most ingredients.
    ///
    /// Recipes without tokens or without a known settlement are ignored. An
    /// average tie between two counts resolves to the smaller count.
    pub fn ingredient_extremes(
        matched: &[&Recipe],
        parser: &IngredientListParser,
        settlements: &[Settlement],
    ) -> Vec<IngredientBucket> {
        let settlements: HashMap<i64, &Settlement> = settlements.iter().map(|s| (s.id, s)).collect();

        let mut by_count: BTreeMap<usize, Vec<RecipeSummary>> = BTreeMap::new();
        let mut total = 0usize;
        let mut recipes = 0usize;

        for recipe in matched {
            let Some(settlement) = recipe.settlement_id.and_then(|sid| settlements.get(&sid)) else {
                continue;
            };

            let ingredient_count = parser.parse_recipe(recipe).len();
            if ingredient_count == 0 {
                continue;
            }

            total += ingredient_count;
            recipes += 1;

            by_count
                .entry(ingredient_count)
                .or_default()
                .push(RecipeSummary {
                    title: if recipe.title.is_empty() {
                        UNKNOWN_TITLE.to_string()
                    } else {
                        recipe.title.clone()
                    },
                    url: recipe.url.clone(),
                    year: recipe.year,
                    settlement_name: settlement.name.clone(),
                    ingredient_count,
                });
        }

        let (Some(min), Some(max)) = (
            by_count.keys().next().copied(),
            by_count.keys().next_back().copied(),
        ) else {
            return Vec::new();
        };

        let average = total as f64 / recipes as f64;
        let mut avg = min;
        for count in by_count.keys().copied() {
            if (count as f64 - average).abs() < (avg as f64 - average).abs() {
                avg = count;
            }
        }

        [(BucketKind::Min, min), (BucketKind::Avg, avg), (BucketKind::Max, max)]
            .into_iter()
            .map(|(kind, ingredient_count)| IngredientBucket {
                kind,
                ingredient_count,
                recipes: by_count.get(&ingredient_count).cloned().unwrap_or_default(),
            })
            .collect()
    }
}
