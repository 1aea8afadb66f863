// src/db/master_data_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::common::error::AppError;
use crate::db::repo::MasterDataLookup;
use crate::models::auth::EntityKind;

// Sonda de existência sobre as tabelas de dados mestres. Leituras simples,
// direto na pool principal.
#[derive(Clone)]
pub struct MasterDataRepository {
    pool: PgPool,
}

impl MasterDataRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MasterDataLookup for MasterDataRepository {
    async fn exists(&self, kind: EntityKind, key: i64) -> Result<bool, AppError> {
        // O match é exaustivo de propósito: um tipo novo de entidade obriga
        // a decidir aqui qual tabela responde por ele.
        let sql = match kind {
            EntityKind::User => "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)",
            EntityKind::Product => "SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)",
            EntityKind::UnitOfMeasure => {
                "SELECT EXISTS(SELECT 1 FROM units_of_measure WHERE id = $1)"
            }
            EntityKind::Vendor => "SELECT EXISTS(SELECT 1 FROM vendors WHERE id = $1)",
            EntityKind::Location => "SELECT EXISTS(SELECT 1 FROM locations WHERE id = $1)",
            EntityKind::Store => "SELECT EXISTS(SELECT 1 FROM stores WHERE id = $1)",
            EntityKind::PriceList => "SELECT EXISTS(SELECT 1 FROM price_lists WHERE id = $1)",
            EntityKind::PriceListDetail => {
                "SELECT EXISTS(SELECT 1 FROM price_list_details WHERE id = $1)"
            }
        };

        let exists: bool = sqlx::query_scalar(sql)
            .bind(key)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}
