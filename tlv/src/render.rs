//! Human-readable tree rendering for a decoded or built [`Record`]. Not round-trippable;
//! intended for logs and debugging output, the same role `dicom-parser`'s printer plays for
//! a data set.

use tlv_core::error::Result;
use tlv_core::value::Value;

use crate::field::{Field, FieldKind};
use crate::record::Record;
use crate::schema::SchemaKind;

pub(crate) fn render_record(record: &mut Record<'_>, indent: usize) -> Result<String> {
    let schema = record.schema().clone();
    let pad = "  ".repeat(indent);
    let mut out = String::new();
    let opener = match schema.kind {
        SchemaKind::Struct => "{",
        SchemaKind::List => "[",
    };
    let closer = match schema.kind {
        SchemaKind::Struct => "}",
        SchemaKind::List => "]",
    };
    out.push_str(opener);
    out.push('\n');
    for field in &schema.fields {
        render_field(record, field, indent + 1, &mut out)?;
    }
    out.push_str(&pad);
    out.push_str(closer);
    Ok(out)
}

fn render_field(record: &mut Record<'_>, field: &Field, indent: usize, out: &mut String) -> Result<()> {
    let pad = "  ".repeat(indent);
    match &field.kind {
        FieldKind::Struct { .. } => match record.get_struct(field)? {
            Some(mut inner) => {
                out.push_str(&pad);
                out.push_str(&format!("{:?}: ", field.tag));
                out.push_str(&render_record(&mut inner, indent)?);
                out.push('\n');
            }
            None => render_absent(field, indent, out),
        },
        FieldKind::Array { .. } => {
            let elements: Vec<_> = record
                .iter_array(field)?
                .collect::<Result<Vec<_>>>()?;
            if elements.is_empty() {
                out.push_str(&pad);
                out.push_str(&format!("{:?}: [[]]\n", field.tag));
            } else {
                out.push_str(&pad);
                out.push_str(&format!("{:?}: [[\n", field.tag));
                for mut element in elements {
                    out.push_str("  ");
                    out.push_str(&pad);
                    out.push_str(&render_record(&mut element, indent + 1)?);
                    out.push('\n');
                }
                out.push_str(&pad);
                out.push_str("]]\n");
            }
        }
        _ => match record.get(field)? {
            Some(value) => {
                out.push_str(&pad);
                out.push_str(&format!("{:?}: {}\n", field.tag, render_value(field, &value)));
            }
            None => render_absent(field, indent, out),
        },
    }
    Ok(())
}

fn render_absent(field: &Field, indent: usize, out: &mut String) {
    if field.optional {
        return;
    }
    let pad = "  ".repeat(indent);
    out.push_str(&pad);
    out.push_str(&format!("{:?}: <missing>\n", field.tag));
}

fn render_value(field: &Field, value: &Value) -> String {
    field.render(value)
}
