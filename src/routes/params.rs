//! Dashboard query-string parsing
//!
//! Every list parameter accepts comma-separated and repeated values. Values
//! that fail to parse are dropped, never rejected.

use std::collections::BTreeSet;
use std::str::FromStr;

use receptterkep_engine::{FilterRequest, RankOptions};

#[derive(Debug, Clone, Default)]
pub struct Params(Vec<(String, String)>);

impl From<Vec<(String, String)>> for Params {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl Params {
    fn has(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    /// Raw values of the first spelling present, split on commas.
    pub fn values(&self, keys: &[&str]) -> Vec<String> {
        let Some(key) = keys.iter().find(|key| self.has(key)) else {
            return Vec::new();
        };

        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .flat_map(|(_, v)| v.split(','))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
            .collect()
    }

    pub fn parsed<T: FromStr>(&self, keys: &[&str]) -> Vec<T> {
        self.values(keys)
            .iter()
            .filter_map(|v| v.parse().ok())
            .collect()
    }

    pub fn set<T: FromStr + Ord>(&self, keys: &[&str]) -> BTreeSet<T> {
        self.parsed(keys).into_iter().collect()
    }

    pub fn first<T: FromStr>(&self, keys: &[&str]) -> Option<T> {
        self.parsed(keys).into_iter().next()
    }

    pub fn flag(&self, keys: &[&str]) -> bool {
        self.values(keys).first().is_some_and(|v| is_truthy(v))
    }

    pub fn filter_request(&self) -> FilterRequest {
        FilterRequest {
            years: self.set(&["year"]),
            settlement_ids: self.set(&["settlementId", "settlement_id"]),
            region_ids: self.set(&["regionId", "region_id"]),
            category_ids: self.set(&["categoryId", "category_id"]),
            ingredient_terms: self.values(&["ingredients"]),
            reverse: self.flag(&["reverse"]),
        }
    }

    pub fn rank_options(&self) -> RankOptions {
        RankOptions {
            rarest: self.flag(&["rarest"]),
            category_id: self.first(&["ingredientCategory", "ingredient_category"]),
            excluded_terms: self.values(&["exclude"]),
        }
    }

    /// `None` when no comparison was asked for; unparseable ids fall back to defaults.
    pub fn compare(&self) -> Option<(Option<i64>, Option<i64>)> {
        if !self.has("compare") {
            return None;
        }

        let mut ids = self
            .values(&["compare"])
            .into_iter()
            .map(|v| v.parse::<i64>().ok());

        Some((ids.next().flatten(), ids.next().flatten()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        Params::from(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_comma_separated_and_repeated() {
        let request = params(&[("year", "2020,2021"), ("year", "2019"), ("year", "abc")])
            .filter_request();

        assert_eq!(request.years, BTreeSet::from([2019, 2020, 2021]));
    }

    #[test]
    fn test_non_integer_numbers_are_dropped() {
        let request = params(&[("year", "2020.0,1e3,2021"), ("regionId", "7.5")]).filter_request();

        assert_eq!(request.years, BTreeSet::from([2021]));
        assert!(request.region_ids.is_empty());
    }

    #[test]
    fn test_camel_case_wins() {
        let request = params(&[("region_id", "1"), ("regionId", "2")]).filter_request();

        assert_eq!(request.region_ids, BTreeSet::from([2]));
    }

    #[test]
    fn test_snake_case_alone() {
        let request = params(&[("settlement_id", "7, 8"), ("category_id", "3")]).filter_request();

        assert_eq!(request.settlement_ids, BTreeSet::from([7, 8]));
        assert_eq!(request.category_ids, BTreeSet::from([3]));
    }

    #[test]
    fn test_reverse_flag_values() {
        for value in ["1", "true", "YES", "on"] {
            assert!(params(&[("reverse", value)]).filter_request().reverse, "{value}");
        }
        for value in ["0", "false", "no", ""] {
            assert!(!params(&[("reverse", value)]).filter_request().reverse, "{value}");
        }
        assert!(!params(&[]).filter_request().reverse);
    }

    #[test]
    fn test_ingredient_terms_keep_spaces() {
        let request = params(&[("ingredients", "rozmaring ág, liszt")]).filter_request();

        assert_eq!(request.ingredient_terms, vec!["rozmaring ág", "liszt"]);
    }

    #[test]
    fn test_rank_options() {
        let options = params(&[
            ("rarest", "true"),
            ("ingredient_category", "x"),
            ("ingredient_category", "4"),
            ("exclude", "só,víz"),
        ])
        .rank_options();

        assert!(options.rarest);
        assert_eq!(options.category_id, Some(4));
        assert_eq!(options.excluded_terms, vec!["só", "víz"]);
    }

    #[test]
    fn test_compare() {
        assert_eq!(params(&[]).compare(), None);
        assert_eq!(params(&[("compare", "")]).compare(), Some((None, None)));
        assert_eq!(params(&[("compare", "3,x")]).compare(), Some((Some(3), None)));
        assert_eq!(params(&[("compare", "3,5")]).compare(), Some((Some(3), Some(5))));
    }
}
