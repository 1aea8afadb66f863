pub mod repo;
pub use repo::{MasterDataLookup, PriceListStore, StoreDirectory};
pub mod master_data_repo;
pub use master_data_repo::MasterDataRepository;
pub mod store_repo;
pub use store_repo::StoreRepository;
pub mod pricing_repo;
pub use pricing_repo::PriceListRepository;

#[cfg(test)]
pub mod memory;
