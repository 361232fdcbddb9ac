// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Human-readable descriptor rendering.

use super::{Type, TypeKind};

const INDENT: &str = "  ";

pub(super) fn write_type(out: &mut String, ty: &Type, indent: usize) {
    match ty.kind() {
        TypeKind::Primitive(kind) => out.push_str(kind.name()),
        TypeKind::List(elem) => write_compound(out, "List", &[elem], indent),
        TypeKind::Set(elem) => write_compound(out, "Set", &[elem], indent),
        TypeKind::Ref(target) => write_compound(out, "Ref", &[target], indent),
        TypeKind::Map(key, value) => write_compound(out, "Map", &[key, value], indent),
        TypeKind::Union(members) if members.is_empty() => out.push_str("Value"),
        TypeKind::Union(members) => {
            for (i, member) in members.iter().enumerate() {
                if i != 0 {
                    out.push_str(" | ");
                }
                write_type(out, member, indent);
            }
        }
        TypeKind::Cycle(depth) => {
            out.push_str("Cycle<");
            out.push_str(&depth.to_string());
            out.push('>');
        }
        TypeKind::Struct(s) => {
            out.push_str("struct ");
            if !s.name.is_empty() {
                out.push_str(&s.name);
                out.push(' ');
            }
            out.push('{');
            if s.fields.is_empty() {
                out.push('}');
                return;
            }
            out.push('\n');
            for field in &s.fields {
                push_indent(out, indent + 1);
                out.push_str(&field.name);
                if field.optional {
                    out.push('?');
                }
                out.push_str(": ");
                write_type(out, &field.ty, indent + 1);
                out.push_str(",\n");
            }
            push_indent(out, indent);
            out.push('}');
        }
    }
}

fn write_compound(out: &mut String, kind: &str, elems: &[&Type], indent: usize) {
    out.push_str(kind);
    out.push('<');
    for (i, elem) in elems.iter().enumerate() {
        if i != 0 {
            out.push_str(", ");
        }
        write_type(out, elem, indent);
    }
    out.push('>');
}

fn push_indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str(INDENT);
    }
}
