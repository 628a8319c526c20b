//! Field-descriptor based copying between DTOs and entities.
//!
//! Every DTO describes, once, which of its fields are exposed and how each of
//! them is read from and written to a given entity type. The tables are
//! registered at startup (see [`registry::register`]) and looked up on every
//! projection.

pub mod registry;

use thiserror::Error;

pub use registry::{register, table};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("no field table registered for {dto} <-> {entity}")]
    Unregistered {
        dto: &'static str,
        entity: &'static str,
    },
    #[error("field `{field}` cannot be set to null")]
    NullNotAllowed { field: &'static str },
    #[error("projection registry lock poisoned")]
    RegistryPoisoned,
}

/// Copies one field from the entity into the DTO.
pub type Loader<D, E> = fn(&E, &mut D);
/// Copies one field from the DTO onto the entity.
pub type Storer<D, E> = fn(&D, &mut E) -> Result<(), MappingError>;

pub struct FieldMapping<D, E> {
    name: &'static str,
    is_null: fn(&D) -> bool,
    load: Option<Loader<D, E>>,
    store: Option<Storer<D, E>>,
}

impl<D, E> FieldMapping<D, E> {
    pub fn new(name: &'static str, is_null: fn(&D) -> bool) -> Self {
        Self {
            name,
            is_null,
            load: None,
            store: None,
        }
    }

    pub fn load(mut self, load: Loader<D, E>) -> Self {
        self.load = Some(load);
        self
    }

    pub fn store(mut self, store: Storer<D, E>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

pub struct FieldTable<D, E> {
    fields: Vec<FieldMapping<D, E>>,
    configurable: Vec<&'static str>,
}

impl<D, E> FieldTable<D, E> {
    pub fn new(fields: Vec<FieldMapping<D, E>>) -> Self {
        Self {
            fields,
            configurable: Vec::new(),
        }
    }

    /// Constructor inputs that are not part of the projection surface.
    pub fn with_configurable(mut self, names: &[&'static str]) -> Self {
        self.configurable.extend_from_slice(names);
        self
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    pub fn configurable_attributes(&self) -> &[&'static str] {
        &self.configurable
    }

    fn fields(&self) -> &[FieldMapping<D, E>] {
        &self.fields
    }
}

/// A transient DTO shaped after the entity `E`.
pub trait Projection<E: 'static>: Default + Sized + Send + Sync + 'static {
    /// Field table for this DTO/entity pair. Called once, at registration.
    fn describe() -> FieldTable<Self, E>;

    /// Build the DTO from `entity`, or an all-default DTO when absent.
    fn create_from_entity(entity: Option<&E>) -> Result<Self, MappingError> {
        let mut dto = Self::default();
        let Some(entity) = entity else {
            return Ok(dto);
        };
        let table = table::<Self, E>()?;
        for field in table.fields() {
            if let Some(load) = field.load {
                load(entity, &mut dto);
            }
        }
        Ok(dto)
    }

    /// Write the DTO fields onto `entity`.
    ///
    /// For a new entity, null DTO fields are skipped so entity defaults
    /// survive. On update every field is written, nulls included.
    fn set_entity_attributes<'a>(
        &self,
        entity: &'a mut E,
        is_new: bool,
    ) -> Result<&'a mut E, MappingError> {
        let table = table::<Self, E>()?;
        for field in table.fields() {
            if is_new && (field.is_null)(self) {
                continue;
            }
            if let Some(store) = field.store {
                store(self, entity)?;
            }
        }
        Ok(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Account {
        handle: String,
        bio: Option<String>,
        secret: String,
    }

    #[derive(Debug, Default, PartialEq)]
    struct AccountDto {
        handle: Option<String>,
        bio: Option<String>,
    }

    impl Projection<Account> for AccountDto {
        fn describe() -> FieldTable<Self, Account> {
            type Field = FieldMapping<AccountDto, Account>;
            FieldTable::new(vec![
                Field::new("handle", |d| d.handle.is_none())
                    .load(|e, d| d.handle = Some(e.handle.clone()))
                    .store(|d, e| {
                        e.handle = d
                            .handle
                            .clone()
                            .ok_or(MappingError::NullNotAllowed { field: "handle" })?;
                        Ok(())
                    }),
                Field::new("bio", |d| d.bio.is_none())
                    .load(|e, d| d.bio = e.bio.clone())
                    .store(|d, e| {
                        e.bio = d.bio.clone();
                        Ok(())
                    }),
            ])
            .with_configurable(&["locale"])
        }
    }

    fn account() -> Account {
        Account {
            handle: "neo".into(),
            bio: Some("the one".into()),
            secret: "red pill".into(),
        }
    }

    #[test]
    fn absent_entity_gives_default_dto() {
        register::<AccountDto, Account>().unwrap();
        let dto = AccountDto::create_from_entity(None).unwrap();
        assert_eq!(dto, AccountDto::default());
    }

    #[test]
    fn round_trip_preserves_entity() {
        register::<AccountDto, Account>().unwrap();
        let original = account();
        let dto = AccountDto::create_from_entity(Some(&original)).unwrap();
        let mut copy = original.clone();
        dto.set_entity_attributes(&mut copy, false).unwrap();
        assert_eq!(copy, original);
    }

    #[test]
    fn new_entity_skips_null_fields() {
        register::<AccountDto, Account>().unwrap();
        let dto = AccountDto {
            handle: Some("trinity".into()),
            bio: None,
        };
        let mut entity = Account {
            bio: Some("kept".into()),
            ..Account::default()
        };
        dto.set_entity_attributes(&mut entity, true).unwrap();
        assert_eq!(entity.handle, "trinity");
        assert_eq!(entity.bio.as_deref(), Some("kept"));
    }

    #[test]
    fn update_writes_nulls_and_rejects_non_nullable() {
        register::<AccountDto, Account>().unwrap();
        let dto = AccountDto {
            handle: Some("morpheus".into()),
            bio: None,
        };
        let mut entity = account();
        dto.set_entity_attributes(&mut entity, false).unwrap();
        assert_eq!(entity.bio, None);

        let dto = AccountDto::default();
        let err = dto.set_entity_attributes(&mut account(), false).unwrap_err();
        assert_eq!(err, MappingError::NullNotAllowed { field: "handle" });
    }

    #[test]
    fn table_exposes_metadata() {
        register::<AccountDto, Account>().unwrap();
        let table = table::<AccountDto, Account>().unwrap();
        assert_eq!(table.field_names(), ["handle", "bio"]);
        assert_eq!(table.configurable_attributes(), ["locale"]);
    }
}
