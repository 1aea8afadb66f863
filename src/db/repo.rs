// src/db/repo.rs

use async_trait::async_trait;

use crate::common::error::AppError;
use crate::models::auth::EntityKind;
use crate::models::pricing::{
    NewPriceList, NewPriceListDetail, PriceList, PriceListDetail, PriceListWithDetails,
};
use crate::models::stores::Store;

// A costura entre o motor e a camada de persistência. Os serviços dependem
// só destes traits; as implementações Postgres vivem ao lado e as de teste
// em `db::memory`.

/// Sonda de existência por tipo de entidade. É tudo de que o validador
/// referencial precisa: nenhuma referência cruzada é gravada sem passar aqui.
#[async_trait]
pub trait MasterDataLookup: Send + Sync {
    async fn exists(&self, kind: EntityKind, key: i64) -> Result<bool, AppError>;
}

/// Consultas do grafo de posse usado pela resolução de visibilidade:
/// usuário -> locais gerenciados -> lojas do local, união usuário -> loja.
#[async_trait]
pub trait StoreDirectory: Send + Sync {
    async fn find_store(&self, key: i64) -> Result<Option<Store>, AppError>;
    async fn all_store_keys(&self) -> Result<Vec<i64>, AppError>;
    async fn store_keys_managed_by(&self, principal_key: i64) -> Result<Vec<i64>, AppError>;
    async fn location_keys_managed_by(&self, principal_key: i64) -> Result<Vec<i64>, AppError>;
    async fn store_keys_at_locations(&self, location_keys: &[i64]) -> Result<Vec<i64>, AppError>;
}

/// Persistência de listas de preço e seus detalhes.
///
/// `create_with_details` e `delete` são unidades de trabalho atômicas: ou
/// todas as linhas da operação persistem, ou nenhuma. Uma falha no meio da
/// escrita reverte tudo e sobe como `AtomicWriteFailure`.
#[async_trait]
pub trait PriceListStore: Send + Sync {
    async fn create_with_details(
        &self,
        header: NewPriceList,
        details: Vec<NewPriceListDetail>,
    ) -> Result<PriceListWithDetails, AppError>;

    async fn find(&self, key: i64) -> Result<Option<PriceList>, AppError>;
    async fn details_of(&self, price_list_key: i64) -> Result<Vec<PriceListDetail>, AppError>;
    async fn save(&self, price_list: &PriceList) -> Result<PriceList, AppError>;

    /// Remove o cabeçalho e os detalhes que ele possui. Retorna quantos
    /// cabeçalhos foram removidos (0 = não existia).
    async fn delete(&self, key: i64) -> Result<u64, AppError>;

    async fn create_detail(
        &self,
        price_list_key: i64,
        detail: NewPriceListDetail,
    ) -> Result<PriceListDetail, AppError>;
    async fn find_detail(&self, key: i64) -> Result<Option<PriceListDetail>, AppError>;
    async fn save_detail(&self, detail: &PriceListDetail) -> Result<PriceListDetail, AppError>;
    async fn delete_detail(&self, key: i64) -> Result<u64, AppError>;
}
