use serde::{Deserialize, Serialize};

/// A scraped recipe as stored by the ingestion pipeline.
///
/// `url` is the unique identifier. `ingredients_text` holds one free-text
/// ingredient line per `|` separated segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub url: String,
    pub title: String,
    pub year: Option<i32>,
    pub settlement_id: Option<i64>,
    pub category_id: Option<i64>,
    #[serde(default)]
    pub ingredients_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub id: i64,
    pub name: Option<String>,
    #[serde(rename = "regionid")]
    pub region_id: Option<i64>,
    pub geom: Option<serde_json::Value>,
}

impl Settlement {
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name.to_owned(),
            _ => format!("Település {}", self.id),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: i64,
    pub name: Option<String>,
    pub geom: Option<serde_json::Value>,
}

impl Region {
    pub fn display_name(&self) -> String {
        region_name(self.id, self.name.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: Option<String>,
}

impl Category {
    pub fn display_name(&self) -> String {
        category_name(self.id, self.name.as_deref())
    }
}

pub(crate) fn region_name(id: i64, name: Option<&str>) -> String {
    match name {
        Some(name) if !name.trim().is_empty() => name.to_owned(),
        _ => format!("Vármegye {id}"),
    }
}

pub(crate) fn category_name(id: i64, name: Option<&str>) -> String {
    match name {
        Some(name) if !name.trim().is_empty() => name.to_owned(),
        _ => format!("Kategória {id}"),
    }
}
