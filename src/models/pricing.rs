// src/models/pricing.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use validator::Validate;

use crate::common::error::AppError;

// --- 1. Status ---
// O único valor aceito em lista e detalhe é active/inactive; qualquer outra
// coisa é rejeitada antes da fase de escrita.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStatus {
    Active,
    Inactive,
}

impl ListStatus {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw {
            "active" => Ok(ListStatus::Active),
            "inactive" => Ok(ListStatus::Inactive),
            other => Err(AppError::InvalidStatus(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ListStatus::Active => "active",
            ListStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for ListStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- 2. Linhas vindas do banco ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PriceList {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub vendor_id: i64,
    pub location_id: i64,
    pub status: String,
    pub effective_start_date: Option<NaiveDate>,
    pub effective_end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Detalhe pertence exclusivamente à sua lista (excluído em cascata com ela).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PriceListDetail {
    pub id: i64,
    pub price_list_id: i64,
    pub product_id: i64,
    pub location_id: i64,
    pub vendor_id: i64,
    pub uom_id: i64,
    pub upc: String,
    pub item_number: i32,
    pub pricing_method: String,
    pub quantity: i32,
    pub case_qty: i32,
    pub pack: String,
    pub size: String,
    pub net_cost: Decimal,
    pub base_retail: String,
    pub store_retail: String,
    pub base_gp_pct: String,
    pub store_gp_pct: String,
    pub vendor_movement: String,
    pub store_movement: String,
    pub name: String,
    pub description: String,
    pub status: String,
    pub effective_start_date: Option<NaiveDate>,
    pub effective_end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Cabeçalho + detalhes retornados juntos pela criação e pela leitura.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceListWithDetails {
    pub price_list: PriceList,
    pub price_list_details: Vec<PriceListDetail>,
}

// --- 3. Registros prontos para inserção ---
// Chaves já decodificadas e status já validado; é o que atravessa a costura
// com a persistência.

#[derive(Debug, Clone)]
pub struct NewPriceList {
    pub vendor_id: i64,
    pub location_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: ListStatus,
    pub effective_start_date: Option<NaiveDate>,
    pub effective_end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct NewPriceListDetail {
    pub product_id: i64,
    pub location_id: i64,
    pub vendor_id: i64,
    pub uom_id: i64,
    pub upc: String,
    pub item_number: i32,
    pub pricing_method: String,
    pub quantity: i32,
    pub case_qty: i32,
    pub pack: String,
    pub size: String,
    pub net_cost: Decimal,
    pub base_retail: String,
    pub store_retail: String,
    pub base_gp_pct: String,
    pub store_gp_pct: String,
    pub vendor_movement: String,
    pub store_movement: String,
    pub name: String,
    pub description: String,
    pub status: ListStatus,
    pub effective_start_date: Option<NaiveDate>,
    pub effective_end_date: Option<NaiveDate>,
}

// --- 4. Payloads de entrada ---
// Ids chegam como identificadores opacos (String); o serviço decodifica.

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePriceListPayload {
    pub location_id: String,
    pub vendor_id: String,
    #[validate(length(min = 1, message = "O nome não pode ser vazio."))]
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub effective_start_date: Option<NaiveDate>,
    pub effective_end_date: Option<NaiveDate>,
    #[validate(nested)]
    pub price_list_details: Vec<PriceDetailPayload>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PriceDetailPayload {
    pub product_id: String,
    pub location_id: String,
    pub vendor_id: String,
    pub uom_id: String,
    #[validate(length(min = 1, message = "O UPC não pode ser vazio."))]
    pub upc: String,
    pub item_number: i32,
    pub pricing_method: String,
    pub quantity: i32,
    pub case_qty: i32,
    pub pack: String,
    pub size: String,
    pub net_cost: Decimal,
    pub base_retail: String,
    pub store_retail: String,
    pub base_gp_pct: String,
    pub store_gp_pct: String,
    pub vendor_movement: String,
    pub store_movement: String,
    #[validate(length(min = 1, message = "O nome não pode ser vazio."))]
    pub name: String,
    pub description: String,
    pub status: String,
    pub effective_start_date: Option<NaiveDate>,
    pub effective_end_date: Option<NaiveDate>,
}

// Atualizações são parciais: None deixa o campo como está.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePriceListPayload {
    pub location_id: Option<String>,
    pub vendor_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub effective_start_date: Option<NaiveDate>,
    pub effective_end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePriceDetailPayload {
    pub price_list_id: Option<String>,
    pub product_id: Option<String>,
    pub location_id: Option<String>,
    pub vendor_id: Option<String>,
    pub uom_id: Option<String>,
    pub upc: Option<String>,
    pub item_number: Option<i32>,
    pub pricing_method: Option<String>,
    pub quantity: Option<i32>,
    pub case_qty: Option<i32>,
    pub pack: Option<String>,
    pub size: Option<String>,
    pub net_cost: Option<Decimal>,
    pub base_retail: Option<String>,
    pub store_retail: Option<String>,
    pub base_gp_pct: Option<String>,
    pub store_gp_pct: Option<String>,
    pub vendor_movement: Option<String>,
    pub store_movement: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub effective_start_date: Option<NaiveDate>,
    pub effective_end_date: Option<NaiveDate>,
}
