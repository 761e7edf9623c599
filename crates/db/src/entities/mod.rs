//! `SeaORM` entities.

pub mod prelude;

pub mod entry_adjustments;
pub mod loans;
pub mod sea_orm_active_enums;
pub mod transactions;
