//! Rebuild: a `serde::Deserializer` that reads an owned [`Value`] tree.
//!
//! Type hints are honored where the tree shape alone is ambiguous: byte
//! buffers can feed `Vec<u8>` through `deserialize_seq`, options accept bare
//! values, and enums are only entered through `deserialize_enum` or
//! self-describing `deserialize_any`.

use serde::de::{
    self,
    value::{BorrowedStrDeserializer, StringDeserializer},
    DeserializeSeed, EnumAccess, IntoDeserializer, MapAccess, SeqAccess, Unexpected,
    VariantAccess, Visitor,
};

use super::{Value, Variant};
use crate::error::{Error, Result};

/// Deserializer over an owned [`Value`].
#[derive(Clone, Debug)]
pub struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    /// Wraps a value for deserialization.
    pub fn new(value: Value) -> Self {
        Self { value }
    }
}

impl Value {
    fn unexpected(&self) -> Unexpected<'_> {
        match self {
            Value::Unit | Value::UnitStruct(_) => Unexpected::Unit,
            Value::Bool(v) => Unexpected::Bool(*v),
            Value::I8(v) => Unexpected::Signed(i64::from(*v)),
            Value::I16(v) => Unexpected::Signed(i64::from(*v)),
            Value::I32(v) => Unexpected::Signed(i64::from(*v)),
            Value::I64(v) => Unexpected::Signed(*v),
            Value::I128(_) => Unexpected::Other("i128"),
            Value::U8(v) => Unexpected::Unsigned(u64::from(*v)),
            Value::U16(v) => Unexpected::Unsigned(u64::from(*v)),
            Value::U32(v) => Unexpected::Unsigned(u64::from(*v)),
            Value::U64(v) => Unexpected::Unsigned(*v),
            Value::U128(_) => Unexpected::Other("u128"),
            Value::F32(v) => Unexpected::Float(f64::from(*v)),
            Value::F64(v) => Unexpected::Float(*v),
            Value::Char(v) => Unexpected::Char(*v),
            Value::String(v) => Unexpected::Str(v),
            Value::Bytes(v) => Unexpected::Bytes(v),
            Value::None | Value::Some(_) => Unexpected::Option,
            Value::NewtypeStruct(..) => Unexpected::NewtypeStruct,
            Value::Seq(_) | Value::Tuple(_) | Value::TupleStruct(..) => Unexpected::Seq,
            Value::Map(_) | Value::Struct(..) => Unexpected::Map,
            Value::UnitVariant(_) => Unexpected::UnitVariant,
            Value::NewtypeVariant(..) => Unexpected::NewtypeVariant,
            Value::TupleVariant(..) => Unexpected::TupleVariant,
            Value::StructVariant(..) => Unexpected::StructVariant,
        }
    }
}

impl<'de> IntoDeserializer<'de, Error> for Value {
    type Deserializer = ValueDeserializer;

    fn into_deserializer(self) -> ValueDeserializer {
        ValueDeserializer::new(self)
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Unit | Value::UnitStruct(_) => visitor.visit_unit(),
            Value::Bool(v) => visitor.visit_bool(v),
            Value::I8(v) => visitor.visit_i8(v),
            Value::I16(v) => visitor.visit_i16(v),
            Value::I32(v) => visitor.visit_i32(v),
            Value::I64(v) => visitor.visit_i64(v),
            Value::I128(v) => visitor.visit_i128(v),
            Value::U8(v) => visitor.visit_u8(v),
            Value::U16(v) => visitor.visit_u16(v),
            Value::U32(v) => visitor.visit_u32(v),
            Value::U64(v) => visitor.visit_u64(v),
            Value::U128(v) => visitor.visit_u128(v),
            Value::F32(v) => visitor.visit_f32(v),
            Value::F64(v) => visitor.visit_f64(v),
            Value::Char(v) => visitor.visit_char(v),
            Value::String(v) => visitor.visit_string(v),
            Value::Bytes(v) => visitor.visit_byte_buf(v),
            Value::None => visitor.visit_none(),
            Value::Some(v) => visitor.visit_some(ValueDeserializer::new(*v)),
            Value::NewtypeStruct(_, v) => visitor.visit_newtype_struct(ValueDeserializer::new(*v)),
            Value::Seq(items) | Value::Tuple(items) | Value::TupleStruct(_, items) => {
                visit_elements(items, visitor)
            }
            Value::Map(entries) => visit_entries(entries, visitor),
            Value::Struct(_, fields) => visit_fields(fields, visitor),
            variant @ (Value::UnitVariant(_)
            | Value::NewtypeVariant(..)
            | Value::TupleVariant(..)
            | Value::StructVariant(..)) => visitor.visit_enum(EnumAccessor { value: variant }),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::None | Value::Unit => visitor.visit_none(),
            Value::Some(v) => visitor.visit_some(ValueDeserializer::new(*v)),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Unit | Value::UnitStruct(_) => visitor.visit_unit(),
            _ => self.deserialize_any(visitor),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::NewtypeStruct(_, v) => visitor.visit_newtype_struct(ValueDeserializer::new(*v)),
            _ => visitor.visit_newtype_struct(self),
        }
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Bytes(v) => visitor.visit_byte_buf(v),
            _ => self.deserialize_any(visitor),
        }
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Bytes(v) => visit_elements(v.into_iter().map(Value::U8).collect(), visitor),
            _ => self.deserialize_any(visitor),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            variant @ (Value::UnitVariant(_)
            | Value::NewtypeVariant(..)
            | Value::TupleVariant(..)
            | Value::StructVariant(..)) => visitor.visit_enum(EnumAccessor { value: variant }),
            Value::String(name) => {
                let access: StringDeserializer<Error> = name.into_deserializer();
                visitor.visit_enum(access)
            }
            other => Err(de::Error::invalid_type(other.unexpected(), &"enum")),
        }
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        drop(self);
        visitor.visit_unit()
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        map struct identifier
    }
}

fn visit_elements<'de, V>(items: Vec<Value>, visitor: V) -> Result<V::Value>
where
    V: Visitor<'de>,
{
    let len = items.len();
    let mut access = ElementAccessor {
        items: items.into_iter(),
    };
    let value = visitor.visit_seq(&mut access)?;
    if access.items.len() == 0 {
        Ok(value)
    } else {
        Err(de::Error::invalid_length(len, &"fewer elements in sequence"))
    }
}

fn visit_entries<'de, V>(entries: Vec<(Value, Value)>, visitor: V) -> Result<V::Value>
where
    V: Visitor<'de>,
{
    let len = entries.len();
    let mut access = EntryAccessor {
        entries: entries.into_iter(),
        pending: None,
    };
    let value = visitor.visit_map(&mut access)?;
    if access.entries.len() == 0 {
        Ok(value)
    } else {
        Err(de::Error::invalid_length(len, &"fewer entries in map"))
    }
}

fn visit_fields<'de, V>(fields: Vec<(&'static str, Value)>, visitor: V) -> Result<V::Value>
where
    V: Visitor<'de>,
{
    let len = fields.len();
    let mut access = FieldAccessor {
        fields: fields.into_iter(),
        pending: None,
    };
    let value = visitor.visit_map(&mut access)?;
    if access.fields.len() == 0 {
        Ok(value)
    } else {
        Err(de::Error::invalid_length(len, &"fewer fields in struct"))
    }
}

struct ElementAccessor {
    items: std::vec::IntoIter<Value>,
}

impl<'de> SeqAccess<'de> for ElementAccessor {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: DeserializeSeed<'de>,
    {
        match self.items.next() {
            Some(item) => seed.deserialize(ValueDeserializer::new(item)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.items.len())
    }
}

struct EntryAccessor {
    entries: std::vec::IntoIter<(Value, Value)>,
    pending: Option<Value>,
}

impl<'de> MapAccess<'de> for EntryAccessor {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        match self.entries.next() {
            Some((key, value)) => {
                self.pending = Some(value);
                seed.deserialize(ValueDeserializer::new(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<T>(&mut self, seed: T) -> Result<T::Value>
    where
        T: DeserializeSeed<'de>,
    {
        let value = self
            .pending
            .take()
            .ok_or_else(|| <Error as de::Error>::custom("map value requested before its key"))?;
        seed.deserialize(ValueDeserializer::new(value))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}

struct FieldAccessor {
    fields: std::vec::IntoIter<(&'static str, Value)>,
    pending: Option<Value>,
}

impl<'de> MapAccess<'de> for FieldAccessor {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        match self.fields.next() {
            Some((name, value)) => {
                self.pending = Some(value);
                seed.deserialize(BorrowedStrDeserializer::<Error>::new(name))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<T>(&mut self, seed: T) -> Result<T::Value>
    where
        T: DeserializeSeed<'de>,
    {
        let value = self
            .pending
            .take()
            .ok_or_else(|| <Error as de::Error>::custom("field value requested before its name"))?;
        seed.deserialize(ValueDeserializer::new(value))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.fields.len())
    }
}

struct EnumAccessor {
    value: Value,
}

impl<'de> EnumAccess<'de> for EnumAccessor {
    type Error = Error;
    type Variant = VariantPayload;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, VariantPayload)>
    where
        V: DeserializeSeed<'de>,
    {
        let (variant, payload): (Variant, VariantPayload) = match self.value {
            Value::UnitVariant(variant) => (variant, VariantPayload::Unit),
            Value::NewtypeVariant(variant, inner) => (variant, VariantPayload::Newtype(*inner)),
            Value::TupleVariant(variant, items) => (variant, VariantPayload::Tuple(items)),
            Value::StructVariant(variant, fields) => (variant, VariantPayload::Struct(fields)),
            other => return Err(de::Error::invalid_type(other.unexpected(), &"enum variant")),
        };
        let name = seed.deserialize(BorrowedStrDeserializer::<Error>::new(variant.variant))?;
        Ok((name, payload))
    }
}

enum VariantPayload {
    Unit,
    Newtype(Value),
    Tuple(Vec<Value>),
    Struct(Vec<(&'static str, Value)>),
}

impl VariantPayload {
    fn unexpected(&self) -> Unexpected<'static> {
        match self {
            VariantPayload::Unit => Unexpected::UnitVariant,
            VariantPayload::Newtype(_) => Unexpected::NewtypeVariant,
            VariantPayload::Tuple(_) => Unexpected::TupleVariant,
            VariantPayload::Struct(_) => Unexpected::StructVariant,
        }
    }
}

impl<'de> VariantAccess<'de> for VariantPayload {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self {
            VariantPayload::Unit => Ok(()),
            other => Err(de::Error::invalid_type(other.unexpected(), &"unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: DeserializeSeed<'de>,
    {
        match self {
            VariantPayload::Newtype(inner) => seed.deserialize(ValueDeserializer::new(inner)),
            other => Err(de::Error::invalid_type(other.unexpected(), &"newtype variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            VariantPayload::Tuple(items) => visit_elements(items, visitor),
            other => Err(de::Error::invalid_type(other.unexpected(), &"tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            VariantPayload::Struct(fields) => visit_fields(fields, visitor),
            other => Err(de::Error::invalid_type(other.unexpected(), &"struct variant")),
        }
    }
}
