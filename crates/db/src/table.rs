use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Region {
    Table,
    Id,
    Name,
    Geom,
}

#[derive(Iden, Clone)]
pub enum Settlement {
    Table,
    Id,
    Name,
    RegionId,
    Geom,
}

#[derive(Iden, Clone)]
pub enum Category {
    Table,
    Id,
    Name,
}

#[derive(Iden, Clone)]
pub enum Recipe {
    Table,
    Url,
    Title,
    Year,
    SettlementId,
    CategoryId,
    IngredientsText,
}
