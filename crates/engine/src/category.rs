use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::collation;
use crate::model::{Category, Recipe, Region, category_name, region_name};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category_id: i64,
    pub name: String,
    pub count: usize,
}

impl CategoryCount {
    /// Count descending, then Hungarian name, then id.
    fn rank(a: &Self, b: &Self) -> Ordering {
        b.count
            .cmp(&a.count)
            .then_with(|| collation::compare(&a.name, &b.name))
            .then_with(|| a.category_id.cmp(&b.category_id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionBreakdown {
    pub region_id: i64,
    pub region_name: String,
    pub total: usize,
    pub categories: Vec<CategoryCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearPoint {
    pub year: i32,
    /// `None` when the category has no recipe in that year.
    pub count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySeries {
    pub category_id: i64,
    pub name: String,
    pub total: usize,
    pub points: Vec<YearPoint>,
}

fn names(categories: &[Category]) -> HashMap<i64, &str> {
    categories
        .iter()
        .filter_map(|c| c.name.as_deref().map(|name| (c.id, name)))
        .collect()
}

fn count_categories(recipes: &[&Recipe], names: &HashMap<i64, &str>) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for id in recipes.iter().filter_map(|r| r.category_id) {
        *counts.entry(id).or_default() += 1;
    }

    let mut rows: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(id, count)| CategoryCount {
            category_id: id,
            name: category_name(id, names.get(&id).copied()),
            count,
        })
        .collect();

    rows.sort_by(CategoryCount::rank);
    rows
}

pub struct CategoryBreakdownAggregator;

impl CategoryBreakdownAggregator {
    /// Per-region category ranking, truncated to `k` entries when given.
    ///
    /// Regions whose recipes carry no category are omitted.
    pub fn top_categories(
        by_region: &BTreeMap<i64, Vec<&Recipe>>,
        categories: &[Category],
        k: Option<usize>,
    ) -> BTreeMap<i64, Vec<CategoryCount>> {
        let names = names(categories);

        by_region
            .iter()
            .filter_map(|(region_id, recipes)| {
                let mut rows = count_categories(recipes, &names);
                if let Some(k) = k {
                    rows.truncate(k);
                }

                (!rows.is_empty()).then_some((*region_id, rows))
            })
            .collect()
    }

    /// Category ranking across the whole matched set.
    pub fn category_totals(matched: &[&Recipe], categories: &[Category]) -> Vec<CategoryCount> {
        count_categories(matched, &names(categories))
    }

    /// Side-by-side breakdowns for up to two regions.
    ///
    /// A missing or unknown selection falls back to the regions present in
    /// `by_region` in Hungarian name order: the first for `a`, the first one
    /// other than `a` for `b`. The same region is never returned twice.
    pub fn compare_regions(
        by_region: &BTreeMap<i64, Vec<&Recipe>>,
        regions: &[Region],
        categories: &[Category],
        a: Option<i64>,
        b: Option<i64>,
    ) -> Vec<RegionBreakdown> {
        let region_names: HashMap<i64, &str> = regions
            .iter()
            .filter_map(|r| r.name.as_deref().map(|name| (r.id, name)))
            .collect();
        let category_names = names(categories);

        let mut available: Vec<(i64, String)> = by_region
            .iter()
            .filter(|(_, recipes)| recipes.iter().any(|r| r.category_id.is_some()))
            .map(|(id, _)| (*id, region_name(*id, region_names.get(id).copied())))
            .collect();
        available.sort_by(|x, y| collation::compare(&x.1, &y.1).then_with(|| x.0.cmp(&y.0)));

        let known = |id: Option<i64>| id.filter(|id| available.iter().any(|(rid, _)| rid == id));

        let Some(first) = known(a).or_else(|| available.first().map(|(id, _)| *id)) else {
            return Vec::new();
        };
        let second = known(b)
            .or_else(|| available.iter().map(|(id, _)| *id).find(|id| *id != first))
            .unwrap_or(first);

        let mut selected = vec![first];
        if second != first {
            selected.push(second);
        }

        selected
            .into_iter()
            .filter_map(|region_id| {
                let recipes = by_region.get(&region_id)?;
                let categories = count_categories(recipes, &category_names);

                Some(RegionBreakdown {
                    region_id,
                    region_name: region_name(region_id, region_names.get(&region_id).copied()),
                    total: categories.iter().map(|c| c.count).sum(),
                    categories,
                })
            })
            .collect()
    }

    /// One series per category over every year that appears in the matched set.
    ///
    /// Series are ordered by total descending, then Hungarian name.
    pub fn category_year_series(matched: &[&Recipe], categories: &[Category]) -> Vec<CategorySeries> {
        let names = names(categories);
        let mut years = BTreeSet::new();
        let mut grouped: BTreeMap<i64, BTreeMap<i32, usize>> = BTreeMap::new();

        for recipe in matched {
            let (Some(year), Some(category_id)) = (recipe.year, recipe.category_id) else {
                continue;
            };

            years.insert(year);
            *grouped
                .entry(category_id)
                .or_default()
                .entry(year)
                .or_default() += 1;
        }

        let mut series: Vec<CategorySeries> = grouped
            .into_iter()
            .map(|(category_id, by_year)| CategorySeries {
                category_id,
                name: category_name(category_id, names.get(&category_id).copied()),
                total: by_year.values().sum(),
                points: years
                    .iter()
                    .map(|year| YearPoint {
                        year: *year,
                        count: by_year.get(year).copied(),
                    })
                    .collect(),
            })
            .collect();

        series.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| collation::compare(&a.name, &b.name))
                .then_with(|| a.category_id.cmp(&b.category_id))
        });

        series
    }
}
