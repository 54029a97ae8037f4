use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::model::Settlement;
use crate::tokenizer::IngredientTokenizer;

/// One filter query as received from the dashboard.
///
/// Every dimension is optional: an empty set means no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub years: BTreeSet<i32>,
    #[serde(default)]
    pub settlement_ids: BTreeSet<i64>,
    #[serde(default)]
    pub region_ids: BTreeSet<i64>,
    #[serde(default)]
    pub category_ids: BTreeSet<i64>,
    #[serde(default)]
    pub ingredient_terms: Vec<String>,
    #[serde(default)]
    pub reverse: bool,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MatchMode {
    /// Recipe must contain every required token.
    #[default]
    Normal,
    /// Recipe text must not contain any of the terms.
    Reverse,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SettlementScope {
    #[default]
    All,
    Only(HashSet<i64>),
}

impl SettlementScope {
    pub fn contains(&self, settlement_id: Option<i64>) -> bool {
        match self {
            SettlementScope::All => true,
            SettlementScope::Only(ids) => settlement_id.is_some_and(|id| ids.contains(&id)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedFilter {
    pub years: BTreeSet<i32>,
    pub settlements: SettlementScope,
    pub category_ids: BTreeSet<i64>,
    pub required_tokens: BTreeSet<String>,
    /// Trimmed, lowercased raw terms, used by [`MatchMode::Reverse`].
    pub terms: Vec<String>,
    pub mode: MatchMode,
    /// A region selection that covers no settlement at all.
    pub forced_empty: bool,
}

pub struct FilterResolver;

impl FilterResolver {
    pub fn resolve(
        request: &FilterRequest,
        settlements: &[Settlement],
        tokenizer: &IngredientTokenizer,
    ) -> ResolvedFilter {
        let mut forced_empty = false;

        let scope = if !request.settlement_ids.is_empty() {
            SettlementScope::Only(request.settlement_ids.iter().copied().collect())
        } else if !request.region_ids.is_empty() {
            let ids: HashSet<i64> = settlements
                .iter()
                .filter(|s| s.region_id.is_some_and(|rid| request.region_ids.contains(&rid)))
                .map(|s| s.id)
                .collect();

            if ids.is_empty() {
                tracing::debug!(
                    regions = ?request.region_ids,
                    "region selection covers no settlement"
                );
                forced_empty = true;
            }

            SettlementScope::Only(ids)
        } else {
            SettlementScope::All
        };

        let required_tokens = request
            .ingredient_terms
            .iter()
            .filter_map(|term| tokenizer.normalize(term))
            .collect();

        let terms = request
            .ingredient_terms
            .iter()
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect();

        ResolvedFilter {
            years: request.years.clone(),
            settlements: scope,
            category_ids: request.category_ids.clone(),
            required_tokens,
            terms,
            mode: if request.reverse {
                MatchMode::Reverse
            } else {
                MatchMode::Normal
            },
            forced_empty,
        }
    }
}
