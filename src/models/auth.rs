// src/models/auth.rs

use serde::{Deserialize, Serialize};
use std::fmt;

// O chamador autenticado, entregue pelo colaborador de autenticação a cada
// requisição. O núcleo nunca emite tokens nem carrega sessões.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: i64,
    pub role: UserRole,
    pub is_superuser: bool,
}

// Os papéis são um conjunto fixo; a matriz de permissões é definida sobre eles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Staff,
    StoreManager,
    LocationManager,
    MasterDataManager,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Staff => "staff",
            UserRole::StoreManager => "store_manager",
            UserRole::LocationManager => "location_manager",
            UserRole::MasterDataManager => "master_data_manager",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Os tipos de entidade que o motor conhece. Usado pela matriz de permissões,
// pelo validador referencial e no contexto estruturado dos erros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    User,
    Product,
    UnitOfMeasure,
    Vendor,
    Location,
    Store,
    PriceList,
    PriceListDetail,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityKind::User => "User",
            EntityKind::Product => "Product",
            EntityKind::UnitOfMeasure => "Unit Of Measure",
            EntityKind::Vendor => "Vendor",
            EntityKind::Location => "Location",
            EntityKind::Store => "Store",
            EntityKind::PriceList => "Price List",
            EntityKind::PriceListDetail => "Price List Detail",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Read,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Read => "ler",
            Operation::Create => "criar",
            Operation::Update => "atualizar",
            Operation::Delete => "excluir",
        })
    }
}
