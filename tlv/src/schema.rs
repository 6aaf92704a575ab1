//! Schemas: an ordered list of field descriptors describing a record type.

use tlv_core::tag::Tag;

use crate::field::Field;

/// Whether a schema's elements are wrapped as a structure (each tag appears at most once,
/// declaration order carries no wire meaning but lookup is by tag) or as a list (elements
/// may repeat and appear in any order; wire order is meaningful).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    /// Each tag appears at most once; wrapped on the wire as a STRUCTURE container.
    Struct,
    /// Tags may repeat and appear in any order; wrapped on the wire as a LIST container.
    List,
}

/// A record type: an ordered list of field descriptors, plus whether it is struct- or
/// list-shaped on the wire.
#[derive(Debug, Clone)]
pub struct Schema {
    /// The wire container shape.
    pub kind: SchemaKind,
    /// The fields, in declaration order. Declaration order is the order fields are
    /// emitted on encode; for `Struct`-kind schemas it carries no decode meaning since
    /// lookup is by tag, but for `List`-kind schemas it is the only way to express
    /// "build mode" append order before encoding.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Declare a struct-shaped schema from its fields.
    pub fn struct_of(fields: Vec<Field>) -> Schema {
        Schema {
            kind: SchemaKind::Struct,
            fields,
        }
    }

    /// Declare a list-shaped schema from its fields.
    pub fn list_of(fields: Vec<Field>) -> Schema {
        Schema {
            kind: SchemaKind::List,
            fields,
        }
    }

    /// The maximum number of bytes a record of this schema can occupy once encoded: the
    /// sum of every field's own `max_length`. Stable for the life of the schema.
    pub fn max_length(&self) -> usize {
        self.fields.iter().map(Field::max_length).sum()
    }

    /// Look up the field declared for `tag`, if any.
    pub fn field(&self, tag: Tag) -> Option<&Field> {
        self.fields.iter().find(|f| f.tag == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;

    #[test]
    fn max_length_is_sum_of_fields() {
        let schema = Schema::struct_of(vec![
            Field::new(
                Tag::Context(0),
                FieldKind::Int {
                    signed: false,
                    octets: 1,
                    min: None,
                    max: None,
                },
            )
            .unwrap(),
            Field::new(Tag::Context(1), FieldKind::Bool).unwrap(),
        ]);
        // ctx(1) + U1(1) = 3, ctx(1) + bool(0) = 2
        assert_eq!(schema.max_length(), 5);
    }
}
