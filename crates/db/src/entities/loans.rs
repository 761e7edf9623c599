//! `SeaORM` Entity for loans table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::LoanStatusType;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "loans")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub loan_id: Uuid,
    pub user_id: Uuid,
    pub amount: i64,
    #[sea_orm(column_type = "Decimal(Some((9, 4)))")]
    pub interest_rate: Decimal,
    pub repayment_period: i32,
    pub status: LoanStatusType,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
