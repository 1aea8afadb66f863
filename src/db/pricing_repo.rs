// src/db/pricing_repo.rs

use async_trait::async_trait;
use sqlx::{Executor, PgPool, Postgres};

use crate::common::error::AppError;
use crate::db::repo::PriceListStore;
use crate::models::pricing::{
    NewPriceList, NewPriceListDetail, PriceList, PriceListDetail, PriceListWithDetails,
};

const DETAIL_COLUMNS: &str = "id, price_list_id, product_id, location_id, vendor_id, uom_id, \
                              upc, item_number, pricing_method, quantity, case_qty, pack, size, \
                              net_cost, base_retail, store_retail, base_gp_pct, store_gp_pct, \
                              vendor_movement, store_movement, name, description, status, \
                              effective_start_date, effective_end_date, created_at, updated_at";

#[derive(Clone)]
pub struct PriceListRepository {
    pool: PgPool,
}

impl PriceListRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Funções de escrita internas
    // ---
    // Usam o padrão genérico 'Executor' para rodar dentro de uma transação.

    async fn insert_header<'e, E>(
        &self,
        executor: E,
        header: &NewPriceList,
    ) -> Result<PriceList, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, PriceList>(
            r#"
            INSERT INTO price_lists
                (name, description, vendor_id, location_id, status,
                 effective_start_date, effective_end_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&header.name)
        .bind(&header.description)
        .bind(header.vendor_id)
        .bind(header.location_id)
        .bind(header.status.as_str())
        .bind(header.effective_start_date)
        .bind(header.effective_end_date)
        .fetch_one(executor)
        .await
    }

    async fn insert_detail<'e, E>(
        &self,
        executor: E,
        price_list_key: i64,
        detail: &NewPriceListDetail,
    ) -> Result<PriceListDetail, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, PriceListDetail>(
            r#"
            INSERT INTO price_list_details
                (price_list_id, product_id, location_id, vendor_id, uom_id, upc,
                 item_number, pricing_method, quantity, case_qty, pack, size,
                 net_cost, base_retail, store_retail, base_gp_pct, store_gp_pct,
                 vendor_movement, store_movement, name, description, status,
                 effective_start_date, effective_end_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                    $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24)
            RETURNING *
            "#,
        )
        .bind(price_list_key)
        .bind(detail.product_id)
        .bind(detail.location_id)
        .bind(detail.vendor_id)
        .bind(detail.uom_id)
        .bind(&detail.upc)
        .bind(detail.item_number)
        .bind(&detail.pricing_method)
        .bind(detail.quantity)
        .bind(detail.case_qty)
        .bind(&detail.pack)
        .bind(&detail.size)
        .bind(detail.net_cost)
        .bind(&detail.base_retail)
        .bind(&detail.store_retail)
        .bind(&detail.base_gp_pct)
        .bind(&detail.store_gp_pct)
        .bind(&detail.vendor_movement)
        .bind(&detail.store_movement)
        .bind(&detail.name)
        .bind(&detail.description)
        .bind(detail.status.as_str())
        .bind(detail.effective_start_date)
        .bind(detail.effective_end_date)
        .fetch_one(executor)
        .await
    }
}

#[async_trait]
impl PriceListStore for PriceListRepository {
    async fn create_with_details(
        &self,
        header: NewPriceList,
        details: Vec<NewPriceListDetail>,
    ) -> Result<PriceListWithDetails, AppError> {
        // Cabeçalho e detalhes na mesma transação: qualquer falha no meio
        // derruba a transação no drop e nenhuma linha fica visível.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::AtomicWriteFailure(e.to_string()))?;

        let price_list = self
            .insert_header(&mut *tx, &header)
            .await
            .map_err(|e| AppError::AtomicWriteFailure(e.to_string()))?;

        let mut price_list_details = Vec::with_capacity(details.len());
        for detail in &details {
            let row = self
                .insert_detail(&mut *tx, price_list.id, detail)
                .await
                .map_err(|e| AppError::AtomicWriteFailure(e.to_string()))?;
            price_list_details.push(row);
        }

        tx.commit()
            .await
            .map_err(|e| AppError::AtomicWriteFailure(e.to_string()))?;

        Ok(PriceListWithDetails {
            price_list,
            price_list_details,
        })
    }

    async fn find(&self, key: i64) -> Result<Option<PriceList>, AppError> {
        let price_list =
            sqlx::query_as::<_, PriceList>("SELECT * FROM price_lists WHERE id = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(price_list)
    }

    async fn details_of(&self, price_list_key: i64) -> Result<Vec<PriceListDetail>, AppError> {
        let details = sqlx::query_as::<_, PriceListDetail>(&format!(
            "SELECT {DETAIL_COLUMNS} FROM price_list_details \
             WHERE price_list_id = $1 ORDER BY id ASC"
        ))
        .bind(price_list_key)
        .fetch_all(&self.pool)
        .await?;
        Ok(details)
    }

    async fn save(&self, price_list: &PriceList) -> Result<PriceList, AppError> {
        let saved = sqlx::query_as::<_, PriceList>(
            r#"
            UPDATE price_lists
            SET name = $1, description = $2, vendor_id = $3, location_id = $4,
                status = $5, effective_start_date = $6, effective_end_date = $7,
                updated_at = NOW()
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(&price_list.name)
        .bind(&price_list.description)
        .bind(price_list.vendor_id)
        .bind(price_list.location_id)
        .bind(&price_list.status)
        .bind(price_list.effective_start_date)
        .bind(price_list.effective_end_date)
        .bind(price_list.id)
        .fetch_one(&self.pool)
        .await?;
        Ok(saved)
    }

    async fn delete(&self, key: i64) -> Result<u64, AppError> {
        // A posse é exclusiva: os detalhes caem junto com o cabeçalho,
        // na mesma transação.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::AtomicWriteFailure(e.to_string()))?;

        sqlx::query("DELETE FROM price_list_details WHERE price_list_id = $1")
            .bind(key)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::AtomicWriteFailure(e.to_string()))?;

        let deleted = sqlx::query("DELETE FROM price_lists WHERE id = $1")
            .bind(key)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::AtomicWriteFailure(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| AppError::AtomicWriteFailure(e.to_string()))?;

        Ok(deleted.rows_affected())
    }

    async fn create_detail(
        &self,
        price_list_key: i64,
        detail: NewPriceListDetail,
    ) -> Result<PriceListDetail, AppError> {
        let row = self.insert_detail(&self.pool, price_list_key, &detail).await?;
        Ok(row)
    }

    async fn find_detail(&self, key: i64) -> Result<Option<PriceListDetail>, AppError> {
        let detail = sqlx::query_as::<_, PriceListDetail>(&format!(
            "SELECT {DETAIL_COLUMNS} FROM price_list_details WHERE id = $1"
        ))
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(detail)
    }

    async fn save_detail(&self, detail: &PriceListDetail) -> Result<PriceListDetail, AppError> {
        let saved = sqlx::query_as::<_, PriceListDetail>(
            r#"
            UPDATE price_list_details
            SET price_list_id = $1, product_id = $2, location_id = $3, vendor_id = $4,
                uom_id = $5, upc = $6, item_number = $7, pricing_method = $8,
                quantity = $9, case_qty = $10, pack = $11, size = $12, net_cost = $13,
                base_retail = $14, store_retail = $15, base_gp_pct = $16,
                store_gp_pct = $17, vendor_movement = $18, store_movement = $19,
                name = $20, description = $21, status = $22,
                effective_start_date = $23, effective_end_date = $24, updated_at = NOW()
            WHERE id = $25
            RETURNING *
            "#,
        )
        .bind(detail.price_list_id)
        .bind(detail.product_id)
        .bind(detail.location_id)
        .bind(detail.vendor_id)
        .bind(detail.uom_id)
        .bind(&detail.upc)
        .bind(detail.item_number)
        .bind(&detail.pricing_method)
        .bind(detail.quantity)
        .bind(detail.case_qty)
        .bind(&detail.pack)
        .bind(&detail.size)
        .bind(detail.net_cost)
        .bind(&detail.base_retail)
        .bind(&detail.store_retail)
        .bind(&detail.base_gp_pct)
        .bind(&detail.store_gp_pct)
        .bind(&detail.vendor_movement)
        .bind(&detail.store_movement)
        .bind(&detail.name)
        .bind(&detail.description)
        .bind(&detail.status)
        .bind(detail.effective_start_date)
        .bind(detail.effective_end_date)
        .bind(detail.id)
        .fetch_one(&self.pool)
        .await?;
        Ok(saved)
    }

    async fn delete_detail(&self, key: i64) -> Result<u64, AppError> {
        let deleted = sqlx::query("DELETE FROM price_list_details WHERE id = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(deleted.rows_affected())
    }
}
