mod category;
mod recipe;
mod region;
mod settlement;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "receptterkep",
    "m0001",
    vec_box![],
    vec_box![
        region::CreateTable,
        settlement::CreateTable,
        settlement::CreateIdx1,
        category::CreateTable,
        recipe::CreateTable,
        recipe::CreateIdx1,
        recipe::CreateIdx2,
    ]
);
