use crate::{
    binding::{Field, FieldAccess, FieldValue, Record},
    catalog::Catalog,
    error::Error,
    model::Entity,
    query::Query,
    value::Value,
};
use std::{any::Any, collections::HashMap, fmt, sync::Arc};

///
/// AsAny
///

pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

///
/// Model
///
/// Anything a query can materialize rows into: the dynamic [`Record`], or a
/// typed structure embedding one. Typed structures also expose themselves
/// as the host whose fields receive aliased columns.
///

pub trait Model: AsAny {
    fn record(&self) -> &Record;

    fn record_mut(&mut self) -> &mut Record;

    fn host(&self) -> Option<&dyn FieldAccess> {
        None
    }

    fn host_mut(&mut self) -> Option<&mut dyn FieldAccess> {
        None
    }
}

impl dyn Model {
    #[must_use]
    pub fn downcast_ref<T: Model>(&self) -> Option<&T> {
        <Self as AsAny>::as_any(self).downcast_ref()
    }

    pub fn downcast_mut<T: Model>(&mut self) -> Option<&mut T> {
        <Self as AsAny>::as_any_mut(self).downcast_mut()
    }

    /// Recover the concrete model; `None` if it is some other type.
    #[must_use]
    pub fn downcast<T: Model>(self: Box<Self>) -> Option<Box<T>> {
        <Self as AsAny>::into_any(self).downcast().ok()
    }
}

impl fmt::Debug for dyn Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.record(), f)
    }
}

///
/// ModelExt
///
/// Field and relationship operations shared by every model.
///

pub trait ModelExt: Model {
    fn name(&self) -> &str {
        &self.record().name
    }

    /// Field by logical name.
    fn field(&self, name: &str) -> Field<'_> {
        Field::new(self.record().fields.get(name), self.host())
    }

    /// Assign a field by logical name.
    ///
    /// Aliased fields write through to the host; copied fields accept a
    /// value of the same kind, or NULL on either side. Returns false and
    /// changes nothing for unknown fields and incompatible kinds.
    fn set_field(&mut self, name: &str, value: impl Into<Value>) -> bool {
        let value = value.into();

        let alias = match self.record().fields.get(name) {
            None => return false,
            Some(FieldValue::Alias { attr }) => Some(attr.clone()),
            Some(FieldValue::Copied(current)) => {
                let fits = current.is_null() || value.is_null() || current.kind() == value.kind();
                if !fits {
                    return false;
                }
                None
            }
        };

        match alias {
            Some(attr) => self
                .host_mut()
                .is_some_and(|host| host.write_field(&attr, &value)),
            None => {
                self.record_mut()
                    .fields
                    .insert(name.to_string(), FieldValue::Copied(value));
                true
            }
        }
    }

    /// Logical field names, sorted.
    fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.record().fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Logical name → physical column.
    fn field_mapping(&self) -> &HashMap<String, String> {
        &self.record().field_mapping
    }

    fn catalog(&self) -> Option<&Arc<Catalog>> {
        self.record().catalog.as_ref()
    }

    fn entity(&self) -> Result<&Entity, Error> {
        let catalog = self.catalog().ok_or_else(|| {
            Error::binding_invariant(format!(
                "record '{}' is not attached to a catalog",
                self.name()
            ))
        })?;

        catalog
            .entity(self.name())
            .ok_or_else(|| Error::entity_not_found(self.name()))
    }

    /// Value of the entity's key field.
    fn key(&self) -> Result<Value, Error> {
        let entity = self.entity()?;
        let key = entity.single_key()?;

        Ok(self.field(entity.logical_name(&key.name)).get())
    }

    /// Follow the foreign key `<model>_<short>` to the record it references.
    ///
    /// `Ok(None)` when the record is detached, the relationship is not
    /// declared, or no referenced row exists.
    fn reference(&self, short: &str) -> Result<Option<Box<dyn Model>>, Error> {
        let Some(catalog) = self.catalog() else {
            return Ok(None);
        };
        let Some(entity) = catalog.entity(self.name()) else {
            return Ok(None);
        };

        let foreign_key = catalog.naming().foreign_key(self.name(), short);
        let Some(relationship) = entity.relationship(&foreign_key) else {
            return Ok(None);
        };

        let target = catalog.trim_table_affixes(&relationship.referenced_table);
        let value = self.field(short).get();

        catalog.query(&target).get(value)
    }

    /// Query for every `target` record that refers back to this one.
    ///
    /// Filters `<target>_<model>` (or `foreign_key`, when given) on this
    /// record's key.
    fn back_reference(&self, target: &str, foreign_key: Option<&str>) -> Result<Query, Error> {
        let catalog = self.catalog().ok_or_else(|| {
            Error::binding_invariant(format!(
                "record '{}' is not attached to a catalog",
                self.name()
            ))
        })?;
        let entity = catalog
            .entity(target)
            .ok_or_else(|| Error::entity_not_found(target))?;

        let column = foreign_key.map_or_else(
            || catalog.naming().back_reference_key(target, self.name()),
            ToString::to_string,
        );
        let key = self.key()?;

        Ok(catalog.query(target).filter([entity.col(&column).eq(key)]))
    }
}

impl<T: Model + ?Sized> ModelExt for T {}
