//! Owned, type-erased model of a serde value.
//!
//! Capturing a value into [`Value`] is the deep copy: the tree owns every
//! string, byte buffer and nested container, and shares nothing with the
//! original. The traversal engine mutates the tree in place, and the result is
//! either rebuilt into the caller's type or emitted to another serde format.
//!
//! The variants mirror the serde data model one to one so that a capture
//! followed by a rebuild reproduces the original value exactly.

mod de;
mod ser;

use serde::ser::{
    Serialize, SerializeMap, SerializeSeq, SerializeStruct, SerializeStructVariant,
    SerializeTuple, SerializeTupleStruct, SerializeTupleVariant, Serializer,
};
use serde::de::DeserializeOwned;

use crate::error::Result;

pub use de::ValueDeserializer;
pub use ser::{SerializeElements, SerializeEntries, SerializeFields, ValueSerializer};

/// Identifies an enum variant as serde reports it.
#[derive(Clone, Debug, PartialEq)]
pub struct Variant {
    /// Name of the enum type.
    pub name: &'static str,
    /// Declaration index of the variant.
    pub index: u32,
    /// Name of the variant.
    pub variant: &'static str,
}

/// A captured serde value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Unit,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    F32(f32),
    F64(f64),
    Char(char),
    String(String),
    Bytes(Vec<u8>),
    None,
    Some(Box<Value>),
    UnitStruct(&'static str),
    NewtypeStruct(&'static str, Box<Value>),
    /// Variable-length sequence (`Vec<T>`, sets, slices).
    Seq(Vec<Value>),
    /// Fixed-length tuple (`(A, B)`, `[T; N]`).
    Tuple(Vec<Value>),
    TupleStruct(&'static str, Vec<Value>),
    /// Map entries in serialization order.
    Map(Vec<(Value, Value)>),
    /// Struct fields in declaration order, minus fields serde skipped.
    Struct(&'static str, Vec<(&'static str, Value)>),
    UnitVariant(Variant),
    NewtypeVariant(Variant, Box<Value>),
    TupleVariant(Variant, Vec<Value>),
    StructVariant(Variant, Vec<(&'static str, Value)>),
}

/// Captures `value` into an owned [`Value`] tree.
///
/// Fails with [`Error::Introspect`](crate::Error::Introspect) when the
/// value's `Serialize` impl reports an error.
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: Serialize + ?Sized,
{
    value.serialize(ValueSerializer)
}

/// Rebuilds a `T` from a [`Value`] tree.
///
/// Fails with [`Error::Rebuild`](crate::Error::Rebuild) when `T` does not
/// accept the tree.
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

impl Serialize for Value {
    #[allow(clippy::too_many_lines)]
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Unit => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::I8(v) => serializer.serialize_i8(*v),
            Value::I16(v) => serializer.serialize_i16(*v),
            Value::I32(v) => serializer.serialize_i32(*v),
            Value::I64(v) => serializer.serialize_i64(*v),
            Value::I128(v) => serializer.serialize_i128(*v),
            Value::U8(v) => serializer.serialize_u8(*v),
            Value::U16(v) => serializer.serialize_u16(*v),
            Value::U32(v) => serializer.serialize_u32(*v),
            Value::U64(v) => serializer.serialize_u64(*v),
            Value::U128(v) => serializer.serialize_u128(*v),
            Value::F32(v) => serializer.serialize_f32(*v),
            Value::F64(v) => serializer.serialize_f64(*v),
            Value::Char(v) => serializer.serialize_char(*v),
            Value::String(v) => serializer.serialize_str(v),
            Value::Bytes(v) => serializer.serialize_bytes(v),
            Value::None => serializer.serialize_none(),
            Value::Some(v) => serializer.serialize_some(v.as_ref()),
            Value::UnitStruct(name) => serializer.serialize_unit_struct(*name),
            Value::NewtypeStruct(name, v) => {
                serializer.serialize_newtype_struct(*name, v.as_ref())
            }
            Value::Seq(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Tuple(items) => {
                let mut tuple = serializer.serialize_tuple(items.len())?;
                for item in items {
                    tuple.serialize_element(item)?;
                }
                tuple.end()
            }
            Value::TupleStruct(name, items) => {
                let mut tuple = serializer.serialize_tuple_struct(*name, items.len())?;
                for item in items {
                    tuple.serialize_field(item)?;
                }
                tuple.end()
            }
            Value::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Value::Struct(name, fields) => {
                let mut record = serializer.serialize_struct(*name, fields.len())?;
                for (field, value) in fields {
                    record.serialize_field(*field, value)?;
                }
                record.end()
            }
            Value::UnitVariant(v) => {
                serializer.serialize_unit_variant(v.name, v.index, v.variant)
            }
            Value::NewtypeVariant(v, inner) => {
                serializer.serialize_newtype_variant(v.name, v.index, v.variant, inner.as_ref())
            }
            Value::TupleVariant(v, items) => {
                let mut tuple =
                    serializer.serialize_tuple_variant(v.name, v.index, v.variant, items.len())?;
                for item in items {
                    tuple.serialize_field(item)?;
                }
                tuple.end()
            }
            Value::StructVariant(v, fields) => {
                let mut record =
                    serializer.serialize_struct_variant(v.name, v.index, v.variant, fields.len())?;
                for (field, value) in fields {
                    record.serialize_field(*field, value)?;
                }
                record.end()
            }
        }
    }
}
