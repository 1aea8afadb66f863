// src/db/memory.rs
//
// Implementações em memória da costura de persistência, usadas pelos testes
// dos serviços. Mesmos contratos das implementações Postgres, incluindo o
// tudo-ou-nada de `create_with_details` e do `delete` em cascata.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::common::error::AppError;
use crate::db::repo::{MasterDataLookup, PriceListStore, StoreDirectory};
use crate::models::auth::EntityKind;
use crate::models::pricing::{
    NewPriceList, NewPriceListDetail, PriceList, PriceListDetail, PriceListWithDetails,
};
use crate::models::stores::Store;

#[derive(Default)]
struct Inner {
    users: HashSet<i64>,
    products: HashSet<i64>,
    vendors: HashSet<i64>,
    uoms: HashSet<i64>,
    // local -> gerente
    locations: HashMap<i64, Option<i64>>,
    stores: HashMap<i64, Store>,
    price_lists: HashMap<i64, PriceList>,
    details: HashMap<i64, PriceListDetail>,
    next_key: i64,
}

impl Inner {
    fn next_key(&mut self) -> i64 {
        self.next_key += 1;
        self.next_key
    }
}

pub struct MemoryCatalog {
    inner: Mutex<Inner>,
    fail_detail_writes: AtomicBool,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_key: 1000,
                ..Inner::default()
            }),
            fail_detail_writes: AtomicBool::new(false),
        }
    }

    pub fn add_user(&self, key: i64) {
        self.inner.lock().unwrap().users.insert(key);
    }

    pub fn add_product(&self, key: i64) {
        self.inner.lock().unwrap().products.insert(key);
    }

    pub fn add_vendor(&self, key: i64) {
        self.inner.lock().unwrap().vendors.insert(key);
    }

    pub fn add_uom(&self, key: i64) {
        self.inner.lock().unwrap().uoms.insert(key);
    }

    pub fn add_location(&self, key: i64, manager: Option<i64>) {
        self.inner.lock().unwrap().locations.insert(key, manager);
    }

    pub fn add_store(&self, key: i64, manager: Option<i64>, location: Option<i64>) {
        let now = Utc::now();
        let store = Store {
            id: key,
            name: format!("Store {key}"),
            number: format!("{key:04}"),
            location_id: location,
            manager_id: manager,
            address: None,
            street: None,
            city: None,
            zip: None,
            phone: None,
            primary_contact_name: None,
            primary_contact_email: None,
            created_at: now,
            updated_at: now,
        };
        self.inner.lock().unwrap().stores.insert(key, store);
    }

    /// Simula uma falha do banco na escrita dos detalhes, para exercitar o
    /// caminho de rollback.
    pub fn fail_detail_writes(&self, fail: bool) {
        self.fail_detail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn price_list_count(&self) -> usize {
        self.inner.lock().unwrap().price_lists.len()
    }

    pub fn detail_count(&self) -> usize {
        self.inner.lock().unwrap().details.len()
    }
}

fn materialize_header(key: i64, header: &NewPriceList) -> PriceList {
    let now = Utc::now();
    PriceList {
        id: key,
        name: header.name.clone(),
        description: header.description.clone(),
        vendor_id: header.vendor_id,
        location_id: header.location_id,
        status: header.status.as_str().to_string(),
        effective_start_date: header.effective_start_date,
        effective_end_date: header.effective_end_date,
        created_at: now,
        updated_at: now,
    }
}

fn materialize_detail(key: i64, price_list_key: i64, d: &NewPriceListDetail) -> PriceListDetail {
    let now = Utc::now();
    PriceListDetail {
        id: key,
        price_list_id: price_list_key,
        product_id: d.product_id,
        location_id: d.location_id,
        vendor_id: d.vendor_id,
        uom_id: d.uom_id,
        upc: d.upc.clone(),
        item_number: d.item_number,
        pricing_method: d.pricing_method.clone(),
        quantity: d.quantity,
        case_qty: d.case_qty,
        pack: d.pack.clone(),
        size: d.size.clone(),
        net_cost: d.net_cost,
        base_retail: d.base_retail.clone(),
        store_retail: d.store_retail.clone(),
        base_gp_pct: d.base_gp_pct.clone(),
        store_gp_pct: d.store_gp_pct.clone(),
        vendor_movement: d.vendor_movement.clone(),
        store_movement: d.store_movement.clone(),
        name: d.name.clone(),
        description: d.description.clone(),
        status: d.status.as_str().to_string(),
        effective_start_date: d.effective_start_date,
        effective_end_date: d.effective_end_date,
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl MasterDataLookup for MemoryCatalog {
    async fn exists(&self, kind: EntityKind, key: i64) -> Result<bool, AppError> {
        let inner = self.inner.lock().unwrap();
        let found = match kind {
            EntityKind::User => inner.users.contains(&key),
            EntityKind::Product => inner.products.contains(&key),
            EntityKind::UnitOfMeasure => inner.uoms.contains(&key),
            EntityKind::Vendor => inner.vendors.contains(&key),
            EntityKind::Location => inner.locations.contains_key(&key),
            EntityKind::Store => inner.stores.contains_key(&key),
            EntityKind::PriceList => inner.price_lists.contains_key(&key),
            EntityKind::PriceListDetail => inner.details.contains_key(&key),
        };
        Ok(found)
    }
}

#[async_trait]
impl StoreDirectory for MemoryCatalog {
    async fn find_store(&self, key: i64) -> Result<Option<Store>, AppError> {
        Ok(self.inner.lock().unwrap().stores.get(&key).cloned())
    }

    async fn all_store_keys(&self) -> Result<Vec<i64>, AppError> {
        Ok(self.inner.lock().unwrap().stores.keys().copied().collect())
    }

    async fn store_keys_managed_by(&self, principal_key: i64) -> Result<Vec<i64>, AppError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .stores
            .values()
            .filter(|s| s.manager_id == Some(principal_key))
            .map(|s| s.id)
            .collect())
    }

    async fn location_keys_managed_by(&self, principal_key: i64) -> Result<Vec<i64>, AppError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .locations
            .iter()
            .filter(|(_, manager)| **manager == Some(principal_key))
            .map(|(key, _)| *key)
            .collect())
    }

    async fn store_keys_at_locations(&self, location_keys: &[i64]) -> Result<Vec<i64>, AppError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .stores
            .values()
            .filter(|s| s.location_id.is_some_and(|l| location_keys.contains(&l)))
            .map(|s| s.id)
            .collect())
    }
}

#[async_trait]
impl PriceListStore for MemoryCatalog {
    async fn create_with_details(
        &self,
        header: NewPriceList,
        details: Vec<NewPriceListDetail>,
    ) -> Result<PriceListWithDetails, AppError> {
        let mut inner = self.inner.lock().unwrap();

        // Tudo é montado à parte e só entra nos mapas no "commit" do fim,
        // espelhando a transação da implementação Postgres.
        let header_key = inner.next_key();
        let price_list = materialize_header(header_key, &header);

        let mut price_list_details = Vec::with_capacity(details.len());
        for detail in &details {
            if self.fail_detail_writes.load(Ordering::SeqCst) {
                return Err(AppError::AtomicWriteFailure(
                    "falha simulada na escrita de detalhe".to_string(),
                ));
            }
            let key = inner.next_key();
            price_list_details.push(materialize_detail(key, header_key, detail));
        }

        inner.price_lists.insert(header_key, price_list.clone());
        for detail in &price_list_details {
            inner.details.insert(detail.id, detail.clone());
        }

        Ok(PriceListWithDetails {
            price_list,
            price_list_details,
        })
    }

    async fn find(&self, key: i64) -> Result<Option<PriceList>, AppError> {
        Ok(self.inner.lock().unwrap().price_lists.get(&key).cloned())
    }

    async fn details_of(&self, price_list_key: i64) -> Result<Vec<PriceListDetail>, AppError> {
        let mut details: Vec<PriceListDetail> = self
            .inner
            .lock()
            .unwrap()
            .details
            .values()
            .filter(|d| d.price_list_id == price_list_key)
            .cloned()
            .collect();
        details.sort_by_key(|d| d.id);
        Ok(details)
    }

    async fn save(&self, price_list: &PriceList) -> Result<PriceList, AppError> {
        let mut updated = price_list.clone();
        updated.updated_at = Utc::now();
        self.inner
            .lock()
            .unwrap()
            .price_lists
            .insert(updated.id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, key: i64) -> Result<u64, AppError> {
        let mut inner = self.inner.lock().unwrap();
        inner.details.retain(|_, d| d.price_list_id != key);
        Ok(if inner.price_lists.remove(&key).is_some() {
            1
        } else {
            0
        })
    }

    async fn create_detail(
        &self,
        price_list_key: i64,
        detail: NewPriceListDetail,
    ) -> Result<PriceListDetail, AppError> {
        let mut inner = self.inner.lock().unwrap();
        let key = inner.next_key();
        let row = materialize_detail(key, price_list_key, &detail);
        inner.details.insert(key, row.clone());
        Ok(row)
    }

    async fn find_detail(&self, key: i64) -> Result<Option<PriceListDetail>, AppError> {
        Ok(self.inner.lock().unwrap().details.get(&key).cloned())
    }

    async fn save_detail(&self, detail: &PriceListDetail) -> Result<PriceListDetail, AppError> {
        let mut updated = detail.clone();
        updated.updated_at = Utc::now();
        self.inner
            .lock()
            .unwrap()
            .details
            .insert(updated.id, updated.clone());
        Ok(updated)
    }

    async fn delete_detail(&self, key: i64) -> Result<u64, AppError> {
        Ok(if self.inner.lock().unwrap().details.remove(&key).is_some() {
            1
        } else {
            0
        })
    }
}
