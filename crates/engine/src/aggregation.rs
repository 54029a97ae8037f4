use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::collation;
use crate::model::{Recipe, Region, Settlement, region_name};

/// Counts derived from one matched recipe set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregate {
    pub count: usize,
    pub region_counts: BTreeMap<i64, usize>,
    pub settlement_counts: BTreeMap<i64, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionCount {
    pub id: i64,
    pub name: String,
    pub count: usize,
}

pub(crate) fn settlement_regions(settlements: &[Settlement]) -> HashMap<i64, i64> {
    settlements
        .iter()
        .filter_map(|s| s.region_id.map(|rid| (s.id, rid)))
        .collect()
}

/// Widest year span that is filled densely. Wider spans only report observed years.
pub const MAX_DENSE_YEARS: i64 = 500;

pub struct AggregationEngine;

impl AggregationEngine {
    pub fn aggregate(matched: &[&Recipe], settlements: &[Settlement]) -> Aggregate {
        let regions = settlement_regions(settlements);
        let mut aggregate = Aggregate {
            count: matched.len(),
            ..Default::default()
        };

        for recipe in matched {
            let Some(sid) = recipe.settlement_id else {
                continue;
            };

            *aggregate.settlement_counts.entry(sid).or_default() += 1;

            if let Some(rid) = regions.get(&sid) {
                *aggregate.region_counts.entry(*rid).or_default() += 1;
            }
        }

        aggregate
    }

    /// Matched recipes bucketed by the region of their settlement.
    ///
    /// Recipes without a settlement, or whose settlement has no region, are left out.
    pub fn group_by_region<'r>(
        matched: &[&'r Recipe],
        settlements: &[Settlement],
    ) -> BTreeMap<i64, Vec<&'r Recipe>> {
        let regions = settlement_regions(settlements);
        let mut groups: BTreeMap<i64, Vec<&Recipe>> = BTreeMap::new();

        for recipe in matched {
            if let Some(rid) = recipe.settlement_id.and_then(|sid| regions.get(&sid)) {
                groups.entry(*rid).or_default().push(recipe);
            }
        }

        groups
    }

    /// Recipe totals for every year between the first and last observed year.
    ///
    /// Years without recipes are present with a zero count, unless the span is
    /// wider than [`MAX_DENSE_YEARS`].
    pub fn year_totals(matched: &[&Recipe]) -> Vec<YearCount> {
        let mut totals: BTreeMap<i32, usize> = BTreeMap::new();
        for year in matched.iter().filter_map(|r| r.year) {
            *totals.entry(year).or_default() += 1;
        }

        let (Some(first), Some(last)) = (
            totals.keys().next().copied(),
            totals.keys().next_back().copied(),
        ) else {
            return Vec::new();
        };

        if i64::from(last) - i64::from(first) >= MAX_DENSE_YEARS {
            tracing::debug!(first, last, "Year span too wide, gaps left unfilled");
            return totals
                .into_iter()
                .map(|(year, count)| YearCount { year, count })
                .collect();
        }

        (first..=last)
            .map(|year| YearCount {
                year,
                count: totals.get(&year).copied().unwrap_or(0),
            })
            .collect()
    }

    /// Named region counts, largest first.
    pub fn region_rows(region_counts: &BTreeMap<i64, usize>, regions: &[Region]) -> Vec<RegionCount> {
        let names: HashMap<i64, &Region> = regions.iter().map(|r| (r.id, r)).collect();

        let mut rows: Vec<RegionCount> = region_counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(id, count)| RegionCount {
                id: *id,
                name: region_name(*id, names.get(id).and_then(|r| r.name.as_deref())),
                count: *count,
            })
            .collect();

        rows.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| collation::compare(&a.name, &b.name))
                .then_with(|| a.id.cmp(&b.id))
        });

        rows
    }
}
