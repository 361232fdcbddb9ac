// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Derive + inference integration tests.
//!
//! Exercises the public API the way a downstream crate does: `#[derive(Shape)]`
//! on plain structs, then `infer` through the global cache.

use std::collections::{BTreeMap, HashMap};
use typeshape::{
    infer, infer_of_val, infer_or_panic, infer_with, InferError, Options, Shape, StructField,
    StructNamer, Type, TypeMarshaler,
};

#[derive(Shape)]
pub struct Face {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

#[derive(Shape)]
pub struct Exif {
    pub camera: String,
    #[shape(tag = "iso,omitempty")]
    pub iso_speed: u32,
}

#[derive(Shape)]
pub struct Photo {
    pub title: String,
    #[shape(tag = ",set")]
    pub faces: Vec<Face>,
    #[shape(embed)]
    pub exif: Exif,
    #[shape(tag = "-")]
    pub thumbnail: Vec<u8>,
    pub labels: BTreeMap<String, f64>,
    #[shape(tag = ",set")]
    pub albums: HashMap<String, ()>,
}

fn face_type() -> Type {
    Type::structure(
        "Face",
        vec![
            StructField::new("height", Type::number()),
            StructField::new("width", Type::number()),
            StructField::new("x", Type::number()),
            StructField::new("y", Type::number()),
        ],
    )
}

#[test]
fn photo_shape() {
    let ty = infer::<Photo>().expect("photo infers");
    assert_eq!(
        ty,
        Type::structure(
            "Photo",
            vec![
                StructField::new("albums", Type::set(Type::string())),
                StructField::new("camera", Type::string()),
                StructField::new("faces", Type::set(face_type())),
                StructField::optional("iso", Type::number()),
                StructField::new("labels", Type::map(Type::string(), Type::number())),
                StructField::new("title", Type::string()),
            ],
        )
    );
}

#[test]
fn repeated_inference_returns_cached_instance() {
    let first = infer::<Face>().expect("first");
    let second = infer::<Face>().expect("second");
    assert!(Type::ptr_eq(&first, &second));
    assert_eq!(first, face_type());
}

#[test]
fn infer_of_val_matches_infer() {
    let face = Face {
        x: 1,
        y: 2,
        width: 3,
        height: 4,
    };
    assert_eq!(infer_of_val(&face).expect("value"), face_type());
    assert_eq!(infer_of_val(&vec![true]).expect("vec"), Type::list(Type::bool()));
}

#[test]
fn top_level_set_option() {
    let ty = infer_with::<Vec<Face>>(Options::new().force_set(true)).expect("set");
    assert_eq!(ty, Type::set(face_type()));

    // The forced result must not leak into later plain calls.
    let ty = infer::<Vec<Face>>().expect("list");
    assert_eq!(ty, Type::list(face_type()));
}

#[derive(Shape)]
#[shape(struct_name)]
pub struct Versioned<T> {
    pub version: u32,
    pub payload: T,
}

impl<T> StructNamer for Versioned<T> {
    fn struct_name() -> String {
        "Versioned".to_string()
    }
}

#[test]
fn generic_struct() {
    let ty = infer::<Versioned<String>>().expect("generic");
    assert_eq!(
        ty,
        Type::structure(
            "Versioned",
            vec![
                StructField::new("payload", Type::string()),
                StructField::new("version", Type::number()),
            ],
        )
    );
    assert_ne!(ty, infer::<Versioned<bool>>().expect("other instance"));
}

#[derive(Shape)]
#[shape(type_marshaler)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanos: u32,
}

impl TypeMarshaler for Timestamp {
    fn marshal_type() -> Result<Option<Type>, typeshape::HookError> {
        Ok(Some(Type::number()))
    }
}

#[derive(Shape)]
pub struct Event {
    pub at: Timestamp,
    pub name: String,
}

#[test]
fn type_marshaler_inside_struct() {
    assert_eq!(
        infer::<Event>().expect("event"),
        Type::structure(
            "Event",
            vec![
                StructField::new("at", Type::number()),
                StructField::new("name", Type::string()),
            ],
        )
    );
}

#[derive(Shape)]
pub struct Tree {
    pub label: String,
    pub children: Vec<Tree>,
    pub parent: Option<Box<Tree>>,
}

#[test]
fn recursive_describe() {
    let ty = infer_or_panic::<Tree>();
    assert_eq!(
        ty.describe(),
        "struct Tree {\n  children: List<Cycle<0>>,\n  label: String,\n  parent: Cycle<0>,\n}"
    );
}

#[derive(Shape)]
pub struct BadTag {
    #[shape(tag = "ok,sett")]
    pub items: Vec<i32>,
}

#[test]
fn errors_are_reported_not_cached() {
    for _ in 0..2 {
        let err = infer::<BadTag>().expect_err("bad tag");
        assert!(matches!(err, InferError::UnrecognizedTag { ref token } if token == "sett"));
    }
}
