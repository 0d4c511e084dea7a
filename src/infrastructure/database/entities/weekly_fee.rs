//! Per-weekday meal fees, keyed by weekday name ("Sunday" ... "Saturday")

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "weekly_fees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub weekday: String,
    pub breakfast_fee: i64,
    pub lunch_fee: i64,
    pub dinner_fee: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
