use receptterkep_engine::{Category, Recipe, Region, Settlement};

pub const REGION_A: i64 = 100;
pub const REGION_B: i64 = 200;

pub fn recipe(
    url: &str,
    year: i32,
    settlement_id: i64,
    category_id: i64,
    ingredients_text: &str,
) -> Recipe {
    Recipe {
        url: format!("https://receptek.localhost/{url}/"),
        title: url.to_owned(),
        year: Some(year),
        settlement_id: Some(settlement_id),
        category_id: Some(category_id),
        ingredients_text: ingredients_text.to_owned(),
    }
}

/// R1 and R2 from the two-settlement scenario.
pub fn sample_recipes() -> Vec<Recipe> {
    vec![
        recipe("r1", 2020, 1, 10, "1 kg liszt|2 tojás"),
        recipe("r2", 2021, 2, 10, "50g cukor"),
    ]
}

pub fn settlements() -> Vec<Settlement> {
    vec![
        Settlement {
            id: 1,
            name: Some("Szentes".to_owned()),
            region_id: Some(REGION_A),
            geom: None,
        },
        Settlement {
            id: 2,
            name: Some("Mohács".to_owned()),
            region_id: Some(REGION_B),
            geom: None,
        },
    ]
}

#[allow(dead_code)]
pub fn regions() -> Vec<Region> {
    vec![
        Region {
            id: REGION_A,
            name: Some("Csongrád-Csanád".to_owned()),
            geom: None,
        },
        Region {
            id: REGION_B,
            name: Some("Baranya".to_owned()),
            geom: None,
        },
    ]
}

#[allow(dead_code)]
pub fn categories() -> Vec<Category> {
    vec![
        Category {
            id: 10,
            name: Some("Sütemények".to_owned()),
        },
        Category {
            id: 11,
            name: Some("Levesek".to_owned()),
        },
    ]
}
