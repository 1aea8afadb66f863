// src/services/policy.rs

use crate::common::error::AppError;
use crate::models::auth::{EntityKind, Operation, Principal, UserRole};

// A matriz papel -> operação -> entidade, centralizada em um lugar só em vez
// de condicionais espalhadas por operação. Leitura e escrita têm conjuntos
// separados; create/update/delete compartilham o conjunto de escrita.

struct PolicyEntry {
    entity: EntityKind,
    read: &'static [UserRole],
    write: &'static [UserRole],
}

const ADMIN_ONLY: &[UserRole] = &[UserRole::Admin];
const MASTER_DATA: &[UserRole] = &[UserRole::Admin, UserRole::MasterDataManager];
const PRICING_READ: &[UserRole] = &[
    UserRole::Admin,
    UserRole::StoreManager,
    UserRole::LocationManager,
    UserRole::Staff,
];
const PRICING_WRITE: &[UserRole] = &[
    UserRole::Admin,
    UserRole::StoreManager,
    UserRole::LocationManager,
];
const ANY_ROLE: &[UserRole] = &[
    UserRole::Admin,
    UserRole::Staff,
    UserRole::StoreManager,
    UserRole::LocationManager,
    UserRole::MasterDataManager,
];

const MATRIX: &[PolicyEntry] = &[
    PolicyEntry {
        entity: EntityKind::User,
        read: ADMIN_ONLY,
        write: ADMIN_ONLY,
    },
    PolicyEntry {
        entity: EntityKind::Product,
        read: MASTER_DATA,
        write: MASTER_DATA,
    },
    PolicyEntry {
        entity: EntityKind::UnitOfMeasure,
        read: MASTER_DATA,
        write: MASTER_DATA,
    },
    PolicyEntry {
        entity: EntityKind::Vendor,
        read: ANY_ROLE,
        write: MASTER_DATA,
    },
    PolicyEntry {
        entity: EntityKind::Location,
        read: ANY_ROLE,
        write: ADMIN_ONLY,
    },
    PolicyEntry {
        entity: EntityKind::Store,
        read: ANY_ROLE,
        write: ADMIN_ONLY,
    },
    PolicyEntry {
        entity: EntityKind::PriceList,
        read: PRICING_READ,
        write: PRICING_WRITE,
    },
    PolicyEntry {
        entity: EntityKind::PriceListDetail,
        read: PRICING_READ,
        write: PRICING_WRITE,
    },
];

pub struct AccessPolicy;

impl AccessPolicy {
    /// Permite ou nega (principal, operação, entidade). Superusuário passa
    /// por cima de qualquer papel. Entidade sem linha na matriz nega: falta
    /// de configuração fecha a porta, nunca abre.
    pub fn authorize(
        principal: &Principal,
        operation: Operation,
        entity: EntityKind,
    ) -> Result<(), AppError> {
        if principal.is_superuser {
            return Ok(());
        }

        let Some(entry) = MATRIX.iter().find(|entry| entry.entity == entity) else {
            tracing::error!(
                "Nenhuma política definida para {:?}; negando por padrão.",
                entity
            );
            return Err(AppError::PermissionDenied { entity, operation });
        };

        let allowed = match operation {
            Operation::Read => entry.read,
            Operation::Create | Operation::Update | Operation::Delete => entry.write,
        };

        if allowed.contains(&principal.role) {
            Ok(())
        } else {
            Err(AppError::PermissionDenied { entity, operation })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: UserRole) -> Principal {
        Principal {
            id: 1,
            role,
            is_superuser: false,
        }
    }

    fn superuser() -> Principal {
        Principal {
            id: 1,
            role: UserRole::Staff,
            is_superuser: true,
        }
    }

    const ALL_ENTITIES: &[EntityKind] = &[
        EntityKind::User,
        EntityKind::Product,
        EntityKind::UnitOfMeasure,
        EntityKind::Vendor,
        EntityKind::Location,
        EntityKind::Store,
        EntityKind::PriceList,
        EntityKind::PriceListDetail,
    ];

    const ALL_OPERATIONS: &[Operation] = &[
        Operation::Read,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
    ];

    #[test]
    fn superusuario_passa_em_toda_combinacao() {
        for &entity in ALL_ENTITIES {
            for &operation in ALL_OPERATIONS {
                assert!(AccessPolicy::authorize(&superuser(), operation, entity).is_ok());
            }
        }
    }

    #[test]
    fn staff_le_mas_nao_escreve_listas_de_preco() {
        let staff = principal(UserRole::Staff);
        assert!(AccessPolicy::authorize(&staff, Operation::Read, EntityKind::PriceList).is_ok());
        for &operation in &[Operation::Create, Operation::Update, Operation::Delete] {
            let denied = AccessPolicy::authorize(&staff, operation, EntityKind::PriceList);
            assert!(matches!(
                denied,
                Err(AppError::PermissionDenied {
                    entity: EntityKind::PriceList,
                    ..
                })
            ));
        }
    }

    #[test]
    fn gerentes_escrevem_listas_de_preco() {
        for role in [UserRole::Admin, UserRole::StoreManager, UserRole::LocationManager] {
            let p = principal(role);
            assert!(
                AccessPolicy::authorize(&p, Operation::Create, EntityKind::PriceListDetail)
                    .is_ok()
            );
        }
    }

    #[test]
    fn catalogo_e_exclusivo_de_dados_mestres() {
        let mdm = principal(UserRole::MasterDataManager);
        assert!(AccessPolicy::authorize(&mdm, Operation::Update, EntityKind::Product).is_ok());
        assert!(
            AccessPolicy::authorize(&mdm, Operation::Read, EntityKind::UnitOfMeasure).is_ok()
        );

        let staff = principal(UserRole::Staff);
        assert!(AccessPolicy::authorize(&staff, Operation::Read, EntityKind::Product).is_err());
        assert!(
            AccessPolicy::authorize(&mdm, Operation::Create, EntityKind::PriceList).is_err()
        );
    }

    #[test]
    fn lojas_e_locais_leitura_livre_escrita_so_admin() {
        for role in [
            UserRole::Admin,
            UserRole::Staff,
            UserRole::StoreManager,
            UserRole::LocationManager,
            UserRole::MasterDataManager,
        ] {
            let p = principal(role);
            assert!(AccessPolicy::authorize(&p, Operation::Read, EntityKind::Store).is_ok());
            assert!(AccessPolicy::authorize(&p, Operation::Read, EntityKind::Location).is_ok());
        }

        assert!(
            AccessPolicy::authorize(
                &principal(UserRole::StoreManager),
                Operation::Delete,
                EntityKind::Store
            )
            .is_err()
        );
        assert!(
            AccessPolicy::authorize(
                &principal(UserRole::Admin),
                Operation::Create,
                EntityKind::Location
            )
            .is_ok()
        );
    }

    #[test]
    fn usuarios_so_admin() {
        assert!(
            AccessPolicy::authorize(&principal(UserRole::Admin), Operation::Read, EntityKind::User)
                .is_ok()
        );
        for role in [
            UserRole::Staff,
            UserRole::StoreManager,
            UserRole::LocationManager,
            UserRole::MasterDataManager,
        ] {
            assert!(
                AccessPolicy::authorize(&principal(role), Operation::Read, EntityKind::User)
                    .is_err()
            );
        }
    }
}
