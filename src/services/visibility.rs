// src/services/visibility.rs

use std::collections::HashSet;
use std::sync::Arc;

use crate::common::error::AppError;
use crate::common::ids::decode_id;
use crate::db::repo::StoreDirectory;
use crate::models::auth::{EntityKind, Operation, Principal};
use crate::models::stores::Store;
use crate::services::policy::AccessPolicy;

// Resolve "quais lojas este usuário enxerga": a união das lojas gerenciadas
// diretamente com as lojas dos locais que ele gerencia. Duas consultas de
// posse por chamada, sempre frescas: gerência muda a qualquer momento e um
// cache aqui viraria bug de posse obsoleta.
#[derive(Clone)]
pub struct VisibilityResolver {
    stores: Arc<dyn StoreDirectory>,
}

impl VisibilityResolver {
    pub fn new(stores: Arc<dyn StoreDirectory>) -> Self {
        Self { stores }
    }

    /// O conjunto de chaves de loja visíveis ao principal. Superusuário vê
    /// todas; quem não gerencia nada recebe o conjunto vazio, não um erro.
    pub async fn visible_stores(&self, principal: &Principal) -> Result<HashSet<i64>, AppError> {
        AccessPolicy::authorize(principal, Operation::Read, EntityKind::Store)?;

        if principal.is_superuser {
            return Ok(self.stores.all_store_keys().await?.into_iter().collect());
        }

        let managed_locations = self.stores.location_keys_managed_by(principal.id).await?;

        let mut visible: HashSet<i64> = self
            .stores
            .store_keys_managed_by(principal.id)
            .await?
            .into_iter()
            .collect();
        visible.extend(
            self.stores
                .store_keys_at_locations(&managed_locations)
                .await?,
        );

        Ok(visible)
    }

    /// Busca uma loja pelo identificador opaco, mas só se ela estiver dentro
    /// do conjunto visível do chamador. Fora dele a loja "não existe".
    pub async fn resolve_store(
        &self,
        principal: &Principal,
        raw_id: &str,
    ) -> Result<Store, AppError> {
        let key = decode_id(raw_id)?;

        if !principal.is_superuser && !self.visible_stores(principal).await?.contains(&key) {
            return Err(AppError::NotFound {
                kind: EntityKind::Store,
                key,
            });
        }

        self.stores
            .find_store(key)
            .await?
            .ok_or(AppError::NotFound {
                kind: EntityKind::Store,
                key,
            })
    }
}
