use crate::{
    binding::{FieldValue, Model},
    catalog::Catalog,
    value::Value,
};
use std::sync::Arc;

/// Bind one result row onto a freshly constructed model.
///
/// Registered models keep only the columns their entity declares; the
/// dynamic record keeps every column. Logical names strip the entity's
/// field prefix, or the naming policy's when the entity is unknown.
///
/// A column whose upper-camel logical name matches a host attribute is
/// coerced into that attribute and stored as an alias, anything else is
/// kept as a copy of the raw value.
pub(crate) fn materialize(
    model: &mut dyn Model,
    catalog: &Arc<Catalog>,
    columns: &[String],
    row: Vec<Value>,
) {
    let name = model.record().name.clone();
    let naming = catalog.naming();
    let entity = catalog.entity(&name);
    let prefix = entity.map_or_else(
        || naming.field_prefix(&name),
        |entity| entity.field_prefix.clone(),
    );
    let declared = entity.filter(|_| catalog.is_registered(&name));

    for (column, raw) in columns.iter().zip(row) {
        if declared.is_some_and(|entity| entity.field(column).is_none()) {
            continue;
        }

        let logical = column.strip_prefix(prefix.as_str()).unwrap_or(column);
        let attr = naming.attribute_name(logical);

        let bound = model
            .host_mut()
            .is_some_and(|host| host.bind_field(&attr, &raw));
        let slot = if bound {
            FieldValue::Alias { attr }
        } else {
            FieldValue::Copied(raw)
        };

        model.record_mut().insert(logical, column.as_str(), slot);
    }

    model.record_mut().attach(catalog);
}
