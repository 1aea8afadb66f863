// src/services/referential.rs

use std::sync::Arc;

use crate::common::error::AppError;
use crate::db::repo::MasterDataLookup;
use crate::models::auth::EntityKind;
use crate::models::pricing::{NewPriceList, NewPriceListDetail};

// Confirma que toda referência cruzada de uma escrita existe ANTES de
// qualquer linha ser gravada. O sistema nunca persiste uma referência
// pendurada, nem transitoriamente.
#[derive(Clone)]
pub struct ReferentialValidator {
    master_data: Arc<dyn MasterDataLookup>,
}

impl ReferentialValidator {
    pub fn new(master_data: Arc<dyn MasterDataLookup>) -> Self {
        Self { master_data }
    }

    /// Checa cada par (tipo, chave) na ordem recebida e falha na primeira
    /// referência ausente. A ordem é contrato: mensagens de erro precisam
    /// ser reproduzíveis.
    pub async fn validate(&self, required: &[(EntityKind, i64)]) -> Result<(), AppError> {
        for &(kind, key) in required {
            if !self.master_data.exists(kind, key).await? {
                return Err(AppError::ReferenceNotFound { kind, key });
            }
        }
        Ok(())
    }
}

/// Monta a lista de referências exigidas por uma lista de preço: vendor e
/// local do cabeçalho, depois, para cada detalhe na ordem de entrada,
/// vendor -> local -> produto -> unidade de medida.
pub fn required_refs_for_price_list(
    header: &NewPriceList,
    details: &[NewPriceListDetail],
) -> Vec<(EntityKind, i64)> {
    let mut refs = vec![
        (EntityKind::Vendor, header.vendor_id),
        (EntityKind::Location, header.location_id),
    ];
    for detail in details {
        refs.push((EntityKind::Vendor, detail.vendor_id));
        refs.push((EntityKind::Location, detail.location_id));
        refs.push((EntityKind::Product, detail.product_id));
        refs.push((EntityKind::UnitOfMeasure, detail.uom_id));
    }
    refs
}
