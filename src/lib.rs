// src/lib.rs

// Declaração dos nossos módulos
pub mod common;
pub mod config;
pub mod db;
pub mod models;
pub mod services;

// Reexportações principais, a superfície que a camada de API consome
pub use common::error::AppError;
pub use common::ids::decode_id;
pub use config::AppState;
pub use models::auth::{EntityKind, Operation, Principal, UserRole};
pub use models::pricing::{
    CreatePriceListPayload, PriceDetailPayload, PriceList, PriceListDetail, PriceListWithDetails,
    UpdatePriceDetailPayload, UpdatePriceListPayload,
};
pub use services::policy::AccessPolicy;
pub use services::pricing_service::PriceListService;
pub use services::referential::ReferentialValidator;
pub use services::visibility::VisibilityResolver;
