// src/services/pricing_service.rs

use std::sync::Arc;
use validator::Validate;

use crate::common::error::AppError;
use crate::common::ids::decode_id;
use crate::db::repo::PriceListStore;
use crate::models::auth::{EntityKind, Operation, Principal};
use crate::models::pricing::{
    CreatePriceListPayload, ListStatus, NewPriceList, NewPriceListDetail, PriceDetailPayload,
    PriceList, PriceListDetail, PriceListWithDetails, UpdatePriceDetailPayload,
    UpdatePriceListPayload,
};
use crate::services::policy::AccessPolicy;
use crate::services::referential::{ReferentialValidator, required_refs_for_price_list};

// Orquestra a escrita de lista de preço + detalhes: autoriza, valida status
// e referências, e só então grava cabeçalho e filhos como uma unidade
// atômica. Qualquer falha antes do commit deixa zero linhas para trás.
#[derive(Clone)]
pub struct PriceListService {
    validator: ReferentialValidator,
    repo: Arc<dyn PriceListStore>,
}

impl PriceListService {
    pub fn new(validator: ReferentialValidator, repo: Arc<dyn PriceListStore>) -> Self {
        Self { validator, repo }
    }

    // --- CREATE (cabeçalho + detalhes) ---
    pub async fn create_price_list(
        &self,
        principal: &Principal,
        payload: CreatePriceListPayload,
    ) -> Result<PriceListWithDetails, AppError> {
        // 1. Autorização: negar aborta antes de qualquer outra coisa.
        AccessPolicy::authorize(principal, Operation::Create, EntityKind::PriceList)?;

        // 2. Validação de campos do payload.
        payload.validate()?;

        // 3. Decodifica identificadores e status (cabeçalho e cada detalhe,
        //    na ordem de entrada).
        let header = decode_header(&payload)?;
        let mut details = Vec::with_capacity(payload.price_list_details.len());
        for detail in &payload.price_list_details {
            details.push(decode_detail(detail)?);
        }

        // 4. Toda referência cruzada precisa existir antes da escrita.
        let required = required_refs_for_price_list(&header, &details);
        self.validator.validate(&required).await?;

        // 5. Escrita atômica.
        self.repo.create_with_details(header, details).await
    }

    // --- READ ---
    pub async fn get_price_list(
        &self,
        principal: &Principal,
        raw_id: &str,
    ) -> Result<PriceListWithDetails, AppError> {
        AccessPolicy::authorize(principal, Operation::Read, EntityKind::PriceList)?;

        let key = decode_id(raw_id)?;
        let price_list = self.repo.find(key).await?.ok_or(AppError::NotFound {
            kind: EntityKind::PriceList,
            key,
        })?;
        let price_list_details = self.repo.details_of(key).await?;

        Ok(PriceListWithDetails {
            price_list,
            price_list_details,
        })
    }

    // --- UPDATE (parcial) ---
    pub async fn update_price_list(
        &self,
        principal: &Principal,
        raw_id: &str,
        patch: UpdatePriceListPayload,
    ) -> Result<PriceList, AppError> {
        AccessPolicy::authorize(principal, Operation::Update, EntityKind::PriceList)?;

        let key = decode_id(raw_id)?;
        let mut price_list = self.repo.find(key).await?.ok_or(AppError::NotFound {
            kind: EntityKind::PriceList,
            key,
        })?;

        let vendor_key = patch.vendor_id.as_deref().map(decode_id).transpose()?;
        let location_key = patch.location_id.as_deref().map(decode_id).transpose()?;
        let status = patch
            .status
            .as_deref()
            .map(ListStatus::parse)
            .transpose()?;

        // Trocar uma referência exige que a nova exista: a invariante de
        // nenhuma referência pendurada vale no update também.
        let mut required = Vec::new();
        if let Some(vendor) = vendor_key {
            required.push((EntityKind::Vendor, vendor));
        }
        if let Some(location) = location_key {
            required.push((EntityKind::Location, location));
        }
        self.validator.validate(&required).await?;

        if let Some(vendor) = vendor_key {
            price_list.vendor_id = vendor;
        }
        if let Some(location) = location_key {
            price_list.location_id = location;
        }
        if let Some(name) = patch.name {
            price_list.name = name;
        }
        if let Some(description) = patch.description {
            price_list.description = Some(description);
        }
        if let Some(status) = status {
            price_list.status = status.as_str().to_string();
        }
        if let Some(start) = patch.effective_start_date {
            price_list.effective_start_date = Some(start);
        }
        if let Some(end) = patch.effective_end_date {
            price_list.effective_end_date = Some(end);
        }

        self.repo.save(&price_list).await
    }

    // --- DELETE (em cascata, posse exclusiva) ---
    pub async fn delete_price_list(
        &self,
        principal: &Principal,
        raw_id: &str,
    ) -> Result<(), AppError> {
        AccessPolicy::authorize(principal, Operation::Delete, EntityKind::PriceList)?;

        let key = decode_id(raw_id)?;
        if self.repo.delete(key).await? == 0 {
            return Err(AppError::NotFound {
                kind: EntityKind::PriceList,
                key,
            });
        }
        Ok(())
    }

    // --- DETALHE avulso ---
    // Criado fora da transação do cabeçalho, mas passa pela mesma checagem
    // referencial, com a lista-mãe na frente.
    pub async fn create_price_list_detail(
        &self,
        principal: &Principal,
        price_list_raw_id: &str,
        payload: PriceDetailPayload,
    ) -> Result<PriceListDetail, AppError> {
        AccessPolicy::authorize(principal, Operation::Create, EntityKind::PriceListDetail)?;

        payload.validate()?;

        let price_list_key = decode_id(price_list_raw_id)?;
        let detail = decode_detail(&payload)?;

        let required = [
            (EntityKind::PriceList, price_list_key),
            (EntityKind::Vendor, detail.vendor_id),
            (EntityKind::Location, detail.location_id),
            (EntityKind::Product, detail.product_id),
            (EntityKind::UnitOfMeasure, detail.uom_id),
        ];
        self.validator.validate(&required).await?;

        self.repo.create_detail(price_list_key, detail).await
    }

    pub async fn update_price_list_detail(
        &self,
        principal: &Principal,
        raw_id: &str,
        patch: UpdatePriceDetailPayload,
    ) -> Result<PriceListDetail, AppError> {
        AccessPolicy::authorize(principal, Operation::Update, EntityKind::PriceListDetail)?;

        let key = decode_id(raw_id)?;
        let mut detail = self.repo.find_detail(key).await?.ok_or(AppError::NotFound {
            kind: EntityKind::PriceListDetail,
            key,
        })?;

        let price_list_key = patch.price_list_id.as_deref().map(decode_id).transpose()?;
        let vendor_key = patch.vendor_id.as_deref().map(decode_id).transpose()?;
        let location_key = patch.location_id.as_deref().map(decode_id).transpose()?;
        let product_key = patch.product_id.as_deref().map(decode_id).transpose()?;
        let uom_key = patch.uom_id.as_deref().map(decode_id).transpose()?;
        let status = patch
            .status
            .as_deref()
            .map(ListStatus::parse)
            .transpose()?;

        let mut required = Vec::new();
        if let Some(price_list) = price_list_key {
            required.push((EntityKind::PriceList, price_list));
        }
        if let Some(vendor) = vendor_key {
            required.push((EntityKind::Vendor, vendor));
        }
        if let Some(location) = location_key {
            required.push((EntityKind::Location, location));
        }
        if let Some(product) = product_key {
            required.push((EntityKind::Product, product));
        }
        if let Some(uom) = uom_key {
            required.push((EntityKind::UnitOfMeasure, uom));
        }
        self.validator.validate(&required).await?;

        if let Some(price_list) = price_list_key {
            detail.price_list_id = price_list;
        }
        if let Some(vendor) = vendor_key {
            detail.vendor_id = vendor;
        }
        if let Some(location) = location_key {
            detail.location_id = location;
        }
        if let Some(product) = product_key {
            detail.product_id = product;
        }
        if let Some(uom) = uom_key {
            detail.uom_id = uom;
        }

        // Cópia 1:1, campo a campo.
        if let Some(upc) = patch.upc {
            detail.upc = upc;
        }
        if let Some(item_number) = patch.item_number {
            detail.item_number = item_number;
        }
        if let Some(pricing_method) = patch.pricing_method {
            detail.pricing_method = pricing_method;
        }
        if let Some(quantity) = patch.quantity {
            detail.quantity = quantity;
        }
        if let Some(case_qty) = patch.case_qty {
            detail.case_qty = case_qty;
        }
        if let Some(pack) = patch.pack {
            detail.pack = pack;
        }
        if let Some(size) = patch.size {
            detail.size = size;
        }
        if let Some(net_cost) = patch.net_cost {
            detail.net_cost = net_cost;
        }
        if let Some(base_retail) = patch.base_retail {
            detail.base_retail = base_retail;
        }
        if let Some(store_retail) = patch.store_retail {
            detail.store_retail = store_retail;
        }
        if let Some(base_gp_pct) = patch.base_gp_pct {
            detail.base_gp_pct = base_gp_pct;
        }
        if let Some(store_gp_pct) = patch.store_gp_pct {
            detail.store_gp_pct = store_gp_pct;
        }
        if let Some(vendor_movement) = patch.vendor_movement {
            detail.vendor_movement = vendor_movement;
        }
        if let Some(store_movement) = patch.store_movement {
            detail.store_movement = store_movement;
        }
        if let Some(name) = patch.name {
            detail.name = name;
        }
        if let Some(description) = patch.description {
            detail.description = description;
        }
        if let Some(status) = status {
            detail.status = status.as_str().to_string();
        }
        if let Some(start) = patch.effective_start_date {
            detail.effective_start_date = Some(start);
        }
        if let Some(end) = patch.effective_end_date {
            detail.effective_end_date = Some(end);
        }

        self.repo.save_detail(&detail).await
    }

    pub async fn delete_price_list_detail(
        &self,
        principal: &Principal,
        raw_id: &str,
    ) -> Result<(), AppError> {
        AccessPolicy::authorize(principal, Operation::Delete, EntityKind::PriceListDetail)?;

        let key = decode_id(raw_id)?;
        if self.repo.delete_detail(key).await? == 0 {
            return Err(AppError::NotFound {
                kind: EntityKind::PriceListDetail,
                key,
            });
        }
        Ok(())
    }
}

fn decode_header(payload: &CreatePriceListPayload) -> Result<NewPriceList, AppError> {
    Ok(NewPriceList {
        vendor_id: decode_id(&payload.vendor_id)?,
        location_id: decode_id(&payload.location_id)?,
        name: payload.name.clone(),
        description: payload.description.clone(),
        status: ListStatus::parse(&payload.status)?,
        effective_start_date: payload.effective_start_date,
        effective_end_date: payload.effective_end_date,
    })
}

fn decode_detail(payload: &PriceDetailPayload) -> Result<NewPriceListDetail, AppError> {
    Ok(NewPriceListDetail {
        product_id: decode_id(&payload.product_id)?,
        location_id: decode_id(&payload.location_id)?,
        vendor_id: decode_id(&payload.vendor_id)?,
        uom_id: decode_id(&payload.uom_id)?,
        upc: payload.upc.clone(),
        item_number: payload.item_number,
        pricing_method: payload.pricing_method.clone(),
        quantity: payload.quantity,
        case_qty: payload.case_qty,
        pack: payload.pack.clone(),
        size: payload.size.clone(),
        net_cost: payload.net_cost,
        base_retail: payload.base_retail.clone(),
        store_retail: payload.store_retail.clone(),
        base_gp_pct: payload.base_gp_pct.clone(),
        store_gp_pct: payload.store_gp_pct.clone(),
        vendor_movement: payload.vendor_movement.clone(),
        store_movement: payload.store_movement.clone(),
        name: payload.name.clone(),
        description: payload.description.clone(),
        status: ListStatus::parse(&payload.status)?,
        effective_start_date: payload.effective_start_date,
        effective_end_date: payload.effective_end_date,
    })
}
