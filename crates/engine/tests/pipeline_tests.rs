//! End-to-end filter and aggregation tests
//!
//! Each test runs resolve, match and aggregate over the same small corpus
//! the dashboard would receive from the read layer.

use std::collections::{BTreeMap, BTreeSet};

use receptterkep_engine::{
    AggregationEngine, CategoryBreakdownAggregator, Engine, EngineConfig, FilterRequest,
    HeatmapBinner, IngredientStatsAggregator, RankOptions, Recipe,
};

mod helpers;

use helpers::{REGION_A, REGION_B};

fn titles(matched: &[&Recipe]) -> Vec<String> {
    matched.iter().map(|r| r.title.clone()).collect()
}

#[test]
fn test_year_filter_counts_one_region() {
    let engine = Engine::default();
    let recipes = helpers::sample_recipes();
    let settlements = helpers::settlements();

    let request = FilterRequest {
        years: BTreeSet::from([2020]),
        ..Default::default()
    };
    let matched = engine.filter(&request, &recipes, &settlements);
    let aggregate = AggregationEngine::aggregate(&matched, &settlements);

    assert_eq!(aggregate.count, 1);
    assert_eq!(titles(&matched), vec!["r1"]);
    assert_eq!(aggregate.region_counts, BTreeMap::from([(REGION_A, 1)]));
    assert_eq!(aggregate.settlement_counts, BTreeMap::from([(1, 1)]));
}

#[test]
fn test_ingredient_filter_normal_and_reverse() {
    let engine = Engine::default();
    let recipes = helpers::sample_recipes();
    let settlements = helpers::settlements();

    let normal = FilterRequest {
        ingredient_terms: vec!["liszt".to_owned()],
        ..Default::default()
    };
    let reverse = FilterRequest {
        reverse: true,
        ..normal.clone()
    };

    assert_eq!(
        titles(&engine.filter(&normal, &recipes, &settlements)),
        vec!["r1"]
    );
    assert_eq!(
        titles(&engine.filter(&reverse, &recipes, &settlements)),
        vec!["r2"]
    );
}

#[test]
fn test_single_term_modes_are_complementary() {
    let engine = Engine::default();
    let settlements = helpers::settlements();
    let recipes = vec![
        helpers::recipe("a", 2020, 1, 10, "1 kg liszt"),
        helpers::recipe("b", 2020, 1, 10, "2 db tojás|1 csipet só"),
        helpers::recipe("c", 2020, 2, 10, "Liszt"),
        helpers::recipe("d", 2020, 2, 10, ""),
    ];

    for term in ["liszt", "tojás", "só"] {
        let normal = FilterRequest {
            ingredient_terms: vec![term.to_owned()],
            ..Default::default()
        };
        let reverse = FilterRequest {
            reverse: true,
            ..normal.clone()
        };

        let in_normal = titles(&engine.filter(&normal, &recipes, &settlements));
        let in_reverse = titles(&engine.filter(&reverse, &recipes, &settlements));

        for recipe in &recipes {
            let contains = recipe.ingredients_text.to_lowercase().contains(term);
            assert_eq!(in_normal.contains(&recipe.title), contains, "{term} / {}", recipe.title);
            assert_eq!(in_reverse.contains(&recipe.title), !contains, "{term} / {}", recipe.title);
        }
    }
}

#[test]
fn test_empty_ingredient_terms_ignore_text() {
    let engine = Engine::default();
    let settlements = helpers::settlements();
    let recipes = vec![
        helpers::recipe("a", 2020, 1, 10, "1 kg liszt"),
        helpers::recipe("b", 2020, 1, 10, ""),
        helpers::recipe("c", 2021, 1, 10, "1 kg liszt"),
    ];

    let request = FilterRequest {
        years: BTreeSet::from([2020]),
        ingredient_terms: vec!["   ".to_owned(), "12".to_owned()],
        ..Default::default()
    };

    assert_eq!(
        titles(&engine.filter(&request, &recipes, &settlements)),
        vec!["a", "b"]
    );
}

#[test]
fn test_unknown_region_yields_empty_aggregates() {
    let engine = Engine::default();
    let recipes = helpers::sample_recipes();
    let settlements = helpers::settlements();

    let request = FilterRequest {
        region_ids: BTreeSet::from([999]),
        ..Default::default()
    };
    let matched = engine.filter(&request, &recipes, &settlements);
    let aggregate = AggregationEngine::aggregate(&matched, &settlements);
    let scale = HeatmapBinner::compute_bins(aggregate.region_counts.values().copied(), 5);

    assert!(matched.is_empty());
    assert_eq!(aggregate.count, 0);
    assert!(aggregate.region_counts.is_empty());
    assert!(scale.is_empty());
}

#[test]
fn test_region_filter_feeds_every_view() {
    let engine = Engine::default();
    let settlements = helpers::settlements();
    let recipes = vec![
        helpers::recipe("a", 2019, 1, 10, "1 kg liszt|2 tojás|1 rozmaring ág"),
        helpers::recipe("b", 2021, 1, 11, "1 kg liszt|só"),
        helpers::recipe("c", 2021, 1, 10, "liszt|cukor|vaj"),
        helpers::recipe("d", 2021, 2, 11, "víz"),
    ];

    let request = FilterRequest {
        region_ids: BTreeSet::from([REGION_A]),
        ..Default::default()
    };
    let matched = engine.filter(&request, &recipes, &settlements);
    let by_region = AggregationEngine::group_by_region(&matched, &settlements);

    assert_eq!(titles(&matched), vec!["a", "b", "c"]);

    let top = CategoryBreakdownAggregator::top_categories(
        &by_region,
        &helpers::categories(),
        Some(engine.config().top_categories),
    );
    assert_eq!(top[&REGION_A][0].name, "Sütemények");
    assert_eq!(top[&REGION_A][0].count, 2);
    assert!(!top.contains_key(&REGION_B));

    let years = AggregationEngine::year_totals(&matched);
    let counts: Vec<usize> = years.iter().map(|y| y.count).collect();
    assert_eq!(counts, vec![1, 0, 2]);

    let boxes =
        IngredientStatsAggregator::category_boxes(&matched, engine.parser(), &helpers::categories());
    assert_eq!(boxes.len(), 1);
    assert_eq!(boxes[0].category_id, 10);
    assert_eq!(boxes[0].stats.min, 3.0);

    let ranking = IngredientStatsAggregator::rank_ingredients(
        &by_region,
        &helpers::regions(),
        engine.parser(),
        &RankOptions::default(),
    );
    assert_eq!(ranking.regions[0].ingredient, "liszt");
    assert_eq!(ranking.regions[0].count, 3);
    assert!(
        ranking
            .segments
            .iter()
            .any(|s| s.ingredient == "rozmaring ág")
    );
}

#[test]
fn test_plain_tokenizer_from_config() {
    let engine = Engine::new(EngineConfig {
        suffix_words: Vec::new(),
        ..Default::default()
    });
    let settlements = helpers::settlements();
    let recipes = vec![
        helpers::recipe("a", 2020, 1, 10, "1 rozmaring ág"),
        helpers::recipe("b", 2020, 1, 10, "1 diófa ág"),
    ];

    let request = FilterRequest {
        ingredient_terms: vec!["ág".to_owned()],
        ..Default::default()
    };

    assert_eq!(
        titles(&engine.filter(&request, &recipes, &settlements)),
        vec!["a", "b"]
    );
    assert!(
        Engine::default()
            .filter(&request, &recipes, &settlements)
            .is_empty()
    );
}

#[test]
fn test_heatmap_over_region_counts() {
    let engine = Engine::default();
    let settlements = helpers::settlements();
    let recipes = vec![
        helpers::recipe("a", 2020, 1, 10, "liszt"),
        helpers::recipe("b", 2020, 1, 10, "liszt"),
        helpers::recipe("c", 2020, 1, 10, "liszt"),
        helpers::recipe("d", 2020, 2, 10, "liszt"),
    ];

    let matched = engine.filter(&FilterRequest::default(), &recipes, &settlements);
    let aggregate = AggregationEngine::aggregate(&matched, &settlements);
    let scale = HeatmapBinner::compute_bins(
        aggregate.region_counts.values().copied(),
        engine.config().heatmap_classes,
    );

    assert_eq!((scale.min, scale.max), (1, 3));
    assert_eq!(scale.bins, vec![2, 3, 3, 3, 3]);
    assert_eq!(
        scale.classify(&aggregate.region_counts),
        BTreeMap::from([(REGION_A, 1), (REGION_B, 0)])
    );
}
