// src/db/store_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::common::error::AppError;
use crate::db::repo::StoreDirectory;
use crate::models::stores::Store;

const STORE_COLUMNS: &str = "id, name, number, location_id, manager_id, address, street, city, \
                             zip, phone, primary_contact_name, primary_contact_email, \
                             created_at, updated_at";

// O repositório de lojas e locais, responsável pelas consultas do grafo de
// posse. Só leitura: as atribuições de gerência são estado externo, lido
// fresco a cada chamada.
#[derive(Clone)]
pub struct StoreRepository {
    pool: PgPool,
}

impl StoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreDirectory for StoreRepository {
    async fn find_store(&self, key: i64) -> Result<Option<Store>, AppError> {
        let store = sqlx::query_as::<_, Store>(&format!(
            "SELECT {STORE_COLUMNS} FROM stores WHERE id = $1"
        ))
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(store)
    }

    async fn all_store_keys(&self) -> Result<Vec<i64>, AppError> {
        let keys = sqlx::query_scalar::<_, i64>("SELECT id FROM stores")
            .fetch_all(&self.pool)
            .await?;
        Ok(keys)
    }

    async fn store_keys_managed_by(&self, principal_key: i64) -> Result<Vec<i64>, AppError> {
        let keys = sqlx::query_scalar::<_, i64>("SELECT id FROM stores WHERE manager_id = $1")
            .bind(principal_key)
            .fetch_all(&self.pool)
            .await?;
        Ok(keys)
    }

    async fn location_keys_managed_by(&self, principal_key: i64) -> Result<Vec<i64>, AppError> {
        let keys = sqlx::query_scalar::<_, i64>("SELECT id FROM locations WHERE manager_id = $1")
            .bind(principal_key)
            .fetch_all(&self.pool)
            .await?;
        Ok(keys)
    }

    async fn store_keys_at_locations(&self, location_keys: &[i64]) -> Result<Vec<i64>, AppError> {
        // ANY com array vazio devolve zero linhas, então o chamador não
        // precisa tratar o caso "nenhum local gerenciado" à parte.
        let keys =
            sqlx::query_scalar::<_, i64>("SELECT id FROM stores WHERE location_id = ANY($1)")
                .bind(location_keys.to_vec())
                .fetch_all(&self.pool)
                .await?;
        Ok(keys)
    }
}
