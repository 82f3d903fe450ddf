//! Capture: a `serde::Serializer` whose output is an owned [`Value`] tree.

use serde::ser::{self, Serialize};

use super::{Value, Variant};
use crate::error::{Error, Result};

/// Serializer that captures any `Serialize` value as a [`Value`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ValueSerializer;

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeElements;
    type SerializeTuple = SerializeElements;
    type SerializeTupleStruct = SerializeElements;
    type SerializeTupleVariant = SerializeElements;
    type SerializeMap = SerializeEntries;
    type SerializeStruct = SerializeFields;
    type SerializeStructVariant = SerializeFields;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::I8(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::I16(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::I32(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::I64(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        Ok(Value::I128(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::U8(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::U16(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::U32(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::U64(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        Ok(Value::U128(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::F32(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::F64(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::Char(v))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_owned()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Bytes(v.to_vec()))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Ok(Value::Some(Box::new(value.serialize(self)?)))
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Unit)
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Value> {
        Ok(Value::UnitStruct(name))
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::UnitVariant(Variant {
            name,
            index,
            variant,
        }))
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Ok(Value::NewtypeStruct(name, Box::new(value.serialize(self)?)))
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let variant = Variant {
            name,
            index,
            variant,
        };
        Ok(Value::NewtypeVariant(variant, Box::new(value.serialize(self)?)))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeElements> {
        Ok(SerializeElements::new(Elements::Seq, len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeElements> {
        Ok(SerializeElements::new(Elements::Tuple, len))
    }

    fn serialize_tuple_struct(self, name: &'static str, len: usize) -> Result<SerializeElements> {
        Ok(SerializeElements::new(Elements::TupleStruct(name), len))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeElements> {
        let variant = Variant {
            name,
            index,
            variant,
        };
        Ok(SerializeElements::new(Elements::TupleVariant(variant), len))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeEntries> {
        Ok(SerializeEntries {
            entries: Vec::with_capacity(len.unwrap_or(0)),
            pending_key: None,
        })
    }

    fn serialize_struct(self, name: &'static str, len: usize) -> Result<SerializeFields> {
        Ok(SerializeFields::new(Fields::Struct(name), len))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeFields> {
        let variant = Variant {
            name,
            index,
            variant,
        };
        Ok(SerializeFields::new(Fields::Variant(variant), len))
    }
}

/// Which positional container a [`SerializeElements`] is building.
#[derive(Debug)]
enum Elements {
    Seq,
    Tuple,
    TupleStruct(&'static str),
    TupleVariant(Variant),
}

/// Collects positional elements for seqs, tuples and their struct/variant forms.
#[derive(Debug)]
pub struct SerializeElements {
    kind: Elements,
    items: Vec<Value>,
}

impl SerializeElements {
    fn new(kind: Elements, len: usize) -> Self {
        Self {
            kind,
            items: Vec::with_capacity(len),
        }
    }

    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn finish(self) -> Value {
        match self.kind {
            Elements::Seq => Value::Seq(self.items),
            Elements::Tuple => Value::Tuple(self.items),
            Elements::TupleStruct(name) => Value::TupleStruct(name, self.items),
            Elements::TupleVariant(variant) => Value::TupleVariant(variant, self.items),
        }
    }
}

impl ser::SerializeSeq for SerializeElements {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeElements {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeElements {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeElements {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

/// Collects map entries, pairing each key with the value that follows it.
#[derive(Debug)]
pub struct SerializeEntries {
    entries: Vec<(Value, Value)>,
    pending_key: Option<Value>,
}

impl ser::SerializeMap for SerializeEntries {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.pending_key = Some(key.serialize(ValueSerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| <Error as ser::Error>::custom("map value serialized before its key"))?;
        self.entries.push((key, value.serialize(ValueSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<Value> {
        if self.pending_key.is_some() {
            return Err(ser::Error::custom("map key serialized without a value"));
        }
        Ok(Value::Map(self.entries))
    }
}

/// Which named-field container a [`SerializeFields`] is building.
#[derive(Debug)]
enum Fields {
    Struct(&'static str),
    Variant(Variant),
}

/// Collects named fields for structs and struct variants.
#[derive(Debug)]
pub struct SerializeFields {
    kind: Fields,
    fields: Vec<(&'static str, Value)>,
}

impl SerializeFields {
    fn new(kind: Fields, len: usize) -> Self {
        Self {
            kind,
            fields: Vec::with_capacity(len),
        }
    }

    fn push<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.fields.push((key, value.serialize(ValueSerializer)?));
        Ok(())
    }

    fn finish(self) -> Value {
        match self.kind {
            Fields::Struct(name) => Value::Struct(name, self.fields),
            Fields::Variant(variant) => Value::StructVariant(variant, self.fields),
        }
    }
}

impl ser::SerializeStruct for SerializeFields {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(key, value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for SerializeFields {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(key, value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde::Serialize;

    use super::super::to_value;
    use super::Value;
    use crate::Error;

    #[test]
    fn smart_pointers_are_transparent() {
        let boxed: Box<Option<String>> = Box::new(Some("token".into()));
        assert_eq!(
            to_value(&boxed).unwrap(),
            Value::Some(Box::new(Value::String("token".into())))
        );
    }

    #[test]
    fn newtype_structs_keep_their_wrapper() {
        #[derive(Serialize)]
        struct UserId(String);

        assert_eq!(
            to_value(&UserId("u-1".into())).unwrap(),
            Value::NewtypeStruct("UserId", Box::new(Value::String("u-1".into())))
        );
    }

    #[test]
    fn failing_serialize_impl_is_an_introspection_fault() {
        struct Handle;

        impl Serialize for Handle {
            fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("opaque handle"))
            }
        }

        let err = to_value(&vec![Handle]).unwrap_err();
        assert_eq!(err, Error::Introspect("opaque handle".into()));
    }

    #[test]
    fn poisoned_mutex_cannot_be_captured() {
        let shared = Arc::new(Mutex::new("secret".to_string()));
        let poisoner = Arc::clone(&shared);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison");
        })
        .join();

        assert!(matches!(to_value(&*shared), Err(Error::Introspect(_))));
    }
}
