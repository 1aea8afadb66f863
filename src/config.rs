// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::sync::Arc;
use std::{env, time::Duration};

use crate::db::{MasterDataRepository, PriceListRepository, StoreRepository};
use crate::services::pricing_service::PriceListService;
use crate::services::referential::ReferentialValidator;
use crate::services::visibility::VisibilityResolver;

// O estado compartilhado que a camada de API embute: a pool e os serviços
// do motor já montados sobre ela.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub visibility: VisibilityResolver,
    pub pricing: PriceListService,
}

impl AppState {
    // Carrega as configurações e monta o estado.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let master_data = Arc::new(MasterDataRepository::new(db_pool.clone()));
        let store_repo = Arc::new(StoreRepository::new(db_pool.clone()));
        let pricing_repo = Arc::new(PriceListRepository::new(db_pool.clone()));

        let visibility = VisibilityResolver::new(store_repo);
        let pricing =
            PriceListService::new(ReferentialValidator::new(master_data), pricing_repo);

        Ok(Self {
            db_pool,
            visibility,
            pricing,
        })
    }
}

// Inicializa o logger. Fica a cargo de quem embute o crate chamar uma vez
// na subida.
pub fn init_tracing() {
    tracing_subscriber::fmt().with_target(false).compact().init();
}
