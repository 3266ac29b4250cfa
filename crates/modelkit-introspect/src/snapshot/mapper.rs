use tracing::debug;

use modelkit_core::{Attribute, AttributeKind, Choice, RecordFamily, RecordType};

use crate::options::InspectOptions;

use super::raw::{RawField, RawModel};

/// Map an ORM field class name to an attribute kind.
///
/// Returns `None` for classes this mapper does not know.
pub fn kind_from_field_type(field_type: &str) -> Option<AttributeKind> {
    let kind = match field_type {
        "CharField" | "SlugField" | "EmailField" | "URLField" | "UUIDField"
        | "GenericIPAddressField" | "IPAddressField" | "FilePathField" | "TimeField"
        | "DurationField" => AttributeKind::Text,
        "TextField" => AttributeKind::LongText,
        "AutoField" | "BigAutoField" | "SmallAutoField" | "IntegerField" | "BigIntegerField"
        | "SmallIntegerField" | "PositiveIntegerField" | "PositiveSmallIntegerField"
        | "PositiveBigIntegerField" => AttributeKind::Integer,
        "DecimalField" | "FloatField" => AttributeKind::Decimal,
        "BooleanField" | "NullBooleanField" => AttributeKind::Boolean,
        "DateField" => AttributeKind::Date,
        "DateTimeField" => AttributeKind::DateTime,
        "ForeignKey" | "OneToOneField" => AttributeKind::RelationshipSingle,
        "ManyToManyField" => AttributeKind::RelationshipMany,
        "FileField" => AttributeKind::File,
        "ImageField" => AttributeKind::Image,
        "JSONField" | "BinaryField" | "HStoreField" | "ArrayField" => {
            AttributeKind::StructuredData
        }
        _ => return None,
    };
    Some(kind)
}

fn is_auto_field(field_type: &str) -> bool {
    matches!(field_type, "AutoField" | "BigAutoField" | "SmallAutoField")
}

pub fn family_of(model: &RawModel) -> RecordFamily {
    if model.is_abstract {
        RecordFamily::Abstract
    } else if model.proxy {
        RecordFamily::Proxy
    } else if model.managed == Some(false) {
        RecordFamily::View
    } else {
        RecordFamily::Model
    }
}

pub fn map_models(raw: Vec<RawModel>, opts: &InspectOptions) -> Vec<RecordType> {
    raw.into_iter()
        .filter_map(|model| {
            let family = family_of(&model);
            if !opts.families.contains(&family) {
                debug!(model = %model.name, %family, "skipping model family");
                return None;
            }
            Some(map_model(model, family))
        })
        .collect()
}

fn map_model(model: RawModel, family: RecordFamily) -> RecordType {
    let primary_key = model
        .fields
        .iter()
        .find(|field| field.primary_key)
        .map(|field| field.name.clone())
        .unwrap_or_else(|| "id".to_string());

    let attributes = model
        .fields
        .into_iter()
        .map(|field| map_field(&model.name, field))
        .collect();

    RecordType {
        name: model.name,
        family,
        label: model.verbose_name,
        primary_key,
        natural_key: model.natural_key,
        attributes,
    }
}

pub fn map_field(model: &str, field: RawField) -> Attribute {
    let kind = kind_from_field_type(&field.field_type).unwrap_or_else(|| {
        debug!(
            model,
            field = %field.name,
            field_type = %field.field_type,
            "unknown field class, treating as structured data"
        );
        AttributeKind::StructuredData
    });

    let auto_managed = field.auto_now || field.auto_now_add;
    let editable = field
        .editable
        .unwrap_or(!(auto_managed || is_auto_field(&field.field_type)));

    Attribute {
        name: field.name,
        kind,
        editable: editable && !auto_managed,
        auto_managed,
        technical: field.parent_link,
        nullable: field.null,
        choices: field
            .choices
            .into_iter()
            .map(|(value, label)| Choice { value, label })
            .collect(),
        related_to: if kind.is_relationship() {
            field.related_model
        } else {
            None
        },
        max_length: field.max_length,
        label: field.verbose_name,
        help_text: field.help_text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_common_field_classes() {
        assert_eq!(kind_from_field_type("CharField"), Some(AttributeKind::Text));
        assert_eq!(kind_from_field_type("TextField"), Some(AttributeKind::LongText));
        assert_eq!(
            kind_from_field_type("ForeignKey"),
            Some(AttributeKind::RelationshipSingle)
        );
        assert_eq!(
            kind_from_field_type("ManyToManyField"),
            Some(AttributeKind::RelationshipMany)
        );
        assert_eq!(kind_from_field_type("ImageField"), Some(AttributeKind::Image));
        assert_eq!(
            kind_from_field_type("JSONField"),
            Some(AttributeKind::StructuredData)
        );
        assert_eq!(kind_from_field_type("GeometryField"), None);
    }

    #[test]
    fn auto_now_fields_are_auto_managed_and_read_only() {
        let field: RawField = serde_json::from_value(serde_json::json!({
            "name": "created_at",
            "type": "DateTimeField",
            "auto_now_add": true
        }))
        .expect("raw field");

        let attribute = map_field("Sample", field);
        assert!(attribute.auto_managed);
        assert!(!attribute.editable);
        assert_eq!(attribute.kind, AttributeKind::DateTime);
    }

    #[test]
    fn auto_primary_key_is_not_editable() {
        let field: RawField = serde_json::from_value(serde_json::json!({
            "name": "id",
            "type": "BigAutoField",
            "primary_key": true
        }))
        .expect("raw field");

        assert!(!map_field("Sample", field).editable);
    }
}
