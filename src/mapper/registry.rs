use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use super::{FieldTable, MappingError, Projection};

type Entry = Arc<dyn Any + Send + Sync>;

static TABLES: Lazy<RwLock<HashMap<(TypeId, TypeId), Entry>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Compute and store the field table of `D` for entity `E`.
///
/// Registering the same pair again keeps the first table; tables are derived
/// from type definitions only, so both would be identical.
pub fn register<D, E>() -> Result<(), MappingError>
where
    D: Projection<E>,
    E: 'static,
{
    let key = (TypeId::of::<D>(), TypeId::of::<E>());
    let mut tables = TABLES.write().map_err(|_| MappingError::RegistryPoisoned)?;
    if !tables.contains_key(&key) {
        tracing::debug!("registering projection {} <-> {}", type_name::<D>(), type_name::<E>());
        let entry: Entry = Arc::new(D::describe());
        tables.insert(key, entry);
    }
    Ok(())
}

pub fn table<D, E>() -> Result<Arc<FieldTable<D, E>>, MappingError>
where
    D: Projection<E>,
    E: 'static,
{
    let unregistered = || MappingError::Unregistered {
        dto: type_name::<D>(),
        entity: type_name::<E>(),
    };
    let entry = {
        let tables = TABLES.read().map_err(|_| MappingError::RegistryPoisoned)?;
        tables
            .get(&(TypeId::of::<D>(), TypeId::of::<E>()))
            .cloned()
            .ok_or_else(unregistered)?
    };
    entry
        .downcast::<FieldTable<D, E>>()
        .map_err(|_| unregistered())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::FieldMapping;

    #[derive(Default)]
    struct Never;

    #[derive(Default)]
    struct NeverDto;

    impl Projection<Never> for NeverDto {
        fn describe() -> FieldTable<Self, Never> {
            FieldTable::new(vec![FieldMapping::new("nothing", |_: &NeverDto| true)])
        }
    }

    #[test]
    fn lookup_before_registration_fails() {
        let err = table::<NeverDto, Never>().err();
        assert!(matches!(err, Some(MappingError::Unregistered { .. })));
    }
}
