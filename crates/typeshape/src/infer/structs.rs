// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Struct descent: field policy, flattening and naming.

use super::Descent;
use crate::error::InferError;
use crate::native::{NativeKind, NativeStruct, NativeType, TypeHandle};
use crate::tags::{resolve_field_name, FieldTags};
use crate::types::{StructField, Type};

impl Descent<'_> {
    pub(super) fn resolve_struct(
        &mut self,
        handle: &TypeHandle,
        native: &NativeType,
        declared: &NativeStruct,
    ) -> Result<Type, InferError> {
        let name = match native.struct_namer() {
            Some(namer) => namer(),
            None => declared.name.to_string(),
        };

        log::debug!(
            "[infer] descending into struct {:?} ({}, depth {})",
            name,
            handle.type_name(),
            self.cycles.len()
        );
        self.touched.push(handle.id());
        self.cycles.push(handle.id(), name.clone());
        let mut fields = Vec::with_capacity(declared.fields.len());
        let collected = self.collect_fields(handle, declared, &mut fields);
        self.cycles.pop();
        collected?;

        fields.sort_by(|a, b| a.name.cmp(&b.name));
        if let Some(pair) = fields.windows(2).find(|pair| pair[0].name == pair[1].name) {
            return Err(InferError::DuplicateFieldName {
                type_name: handle.type_name().to_string(),
                name: pair[0].name.clone(),
            });
        }
        Ok(Type::structure_sorted(name, fields))
    }

    /// Append the descriptor fields of `declared` to `out`, flattening
    /// untagged embedded structs in place.
    fn collect_fields(
        &mut self,
        owner: &TypeHandle,
        declared: &NativeStruct,
        out: &mut Vec<StructField>,
    ) -> Result<(), InferError> {
        for field in &declared.fields {
            let tags = FieldTags::parse(field.tag_str())?;
            if tags.skip {
                continue;
            }

            if !field.is_visible() && tags.name.is_some() {
                return Err(InferError::NonVisibleField {
                    type_name: owner.type_name().to_string(),
                    field: field.name().to_string(),
                });
            }
            if !field.is_visible() && !field.is_embedded() {
                log::trace!(
                    "[infer] omitting hidden field {}.{}",
                    owner.type_name(),
                    field.name()
                );
                continue;
            }

            let name = resolve_field_name(field.name(), tags.name.as_deref())?;

            if tags.original {
                continue;
            }

            if field.is_embedded() && tags.name.is_none() {
                let embedded = field.ty().native_type();
                if embedded.type_marshaler().is_none() {
                    if let NativeKind::Struct(inner) = embedded.kind() {
                        self.collect_fields(field.ty(), inner, out)?;
                        continue;
                    }
                }
            }

            let ty = self.resolve(field.ty(), tags.set)?;
            out.push(StructField {
                name,
                ty,
                optional: tags.omit_empty,
            });
        }
        Ok(())
    }
}
