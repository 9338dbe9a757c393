//! SeaORM adapters. Functions here return `DbErr`; repos translate.

pub mod customers_sea;
pub mod orders_sea;
