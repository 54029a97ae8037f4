pub mod aggregation;
pub mod category;
pub mod collation;
pub mod filter;
pub mod heatmap;
pub mod ingredient_stats;
pub mod matcher;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod tokenizer;

// Re-export commonly used types
pub use aggregation::{Aggregate, AggregationEngine, RegionCount, YearCount};
pub use category::{CategoryBreakdownAggregator, CategoryCount, CategorySeries, RegionBreakdown};
pub use filter::{FilterRequest, FilterResolver, MatchMode, ResolvedFilter, SettlementScope};
pub use heatmap::{HeatmapBinner, HeatmapScale};
pub use ingredient_stats::{
    BoxStats, CategoryBox, IngredientBucket, IngredientRanking, IngredientStatsAggregator,
    RankOptions,
};
pub use matcher::RecipeMatcher;
pub use model::{Category, Recipe, Region, Settlement};
pub use parser::IngredientListParser;
pub use pipeline::{Engine, EngineConfig};
pub use tokenizer::IngredientTokenizer;
