//! Shape classification: "what kind of node is this?"
//!
//! The value model has one variant per serde data-model type. The traversal
//! engine does not care about most of those distinctions, so every node is
//! classified into one of eight shapes and the engine dispatches on the shape
//! alone.

use crate::value::Value;

/// The shape of a node, borrowed mutably so the engine can rewrite it.
pub(crate) enum ShapeMut<'a> {
    /// `Some`, newtype structs, and `None` (no referent).
    Indirection(Option<&'a mut Value>),
    /// Newtype enum variants: the payload type depends on the runtime variant.
    Polymorphic(&'a mut Value),
    /// Raw binary data, rewritten as a whole.
    ByteSequence(ByteSequence<'a>),
    /// Positional containers. Elements carry no location name.
    Sequence(&'a mut [Value]),
    /// Keyed entries. Keys are never rewritten.
    Map(&'a mut [(Value, Value)]),
    /// Named fields of structs and struct variants.
    Record(&'a mut [(&'static str, Value)]),
    Text(&'a mut String),
    /// Numbers, booleans, chars, units and unit variants.
    Opaque,
}

/// Storage behind a byte sequence.
pub(crate) enum ByteSequence<'a> {
    /// `serialize_bytes` output.
    Buffer(&'a mut Vec<u8>),
    /// A variable-length seq of `u8`, e.g. `Vec<u8>`.
    Growable(&'a mut Vec<Value>),
    /// A fixed-length tuple of `u8`, e.g. `[u8; 32]`. Its length is preserved.
    Fixed(&'a mut [Value]),
}

impl ByteSequence<'_> {
    pub(crate) fn is_empty(&self) -> bool {
        match self {
            ByteSequence::Buffer(bytes) => bytes.is_empty(),
            ByteSequence::Growable(items) => items.is_empty(),
            ByteSequence::Fixed(items) => items.is_empty(),
        }
    }

    /// Replaces the content with `placeholder`.
    ///
    /// Fixed-length storage is filled by repeating `placeholder` so the value
    /// still fits its array type.
    pub(crate) fn overwrite(self, placeholder: &[u8]) {
        match self {
            ByteSequence::Buffer(bytes) => {
                bytes.clear();
                bytes.extend_from_slice(placeholder);
            }
            ByteSequence::Growable(items) => {
                *items = placeholder.iter().copied().map(Value::U8).collect();
            }
            ByteSequence::Fixed(items) => {
                for (slot, byte) in items.iter_mut().zip(placeholder.iter().cycle()) {
                    *slot = Value::U8(*byte);
                }
            }
        }
    }
}

fn is_byte_run(items: &[Value]) -> bool {
    !items.is_empty() && items.iter().all(|item| matches!(item, Value::U8(_)))
}

impl Value {
    /// Classifies this node.
    pub(crate) fn shape_mut(&mut self) -> ShapeMut<'_> {
        match self {
            Value::None => ShapeMut::Indirection(None),
            Value::Some(inner) | Value::NewtypeStruct(_, inner) => {
                ShapeMut::Indirection(Some(inner.as_mut()))
            }
            Value::NewtypeVariant(_, inner) => ShapeMut::Polymorphic(inner.as_mut()),
            Value::Bytes(bytes) => ShapeMut::ByteSequence(ByteSequence::Buffer(bytes)),
            Value::Seq(items) => {
                if is_byte_run(items) {
                    ShapeMut::ByteSequence(ByteSequence::Growable(items))
                } else {
                    ShapeMut::Sequence(items)
                }
            }
            Value::Tuple(items) => {
                if is_byte_run(items) {
                    ShapeMut::ByteSequence(ByteSequence::Fixed(items))
                } else {
                    ShapeMut::Sequence(items)
                }
            }
            Value::TupleStruct(_, items) | Value::TupleVariant(_, items) => {
                ShapeMut::Sequence(items)
            }
            Value::Map(entries) => ShapeMut::Map(entries),
            Value::Struct(_, fields) | Value::StructVariant(_, fields) => ShapeMut::Record(fields),
            Value::String(text) => ShapeMut::Text(text),
            Value::Unit
            | Value::Bool(_)
            | Value::I8(_)
            | Value::I16(_)
            | Value::I32(_)
            | Value::I64(_)
            | Value::I128(_)
            | Value::U8(_)
            | Value::U16(_)
            | Value::U32(_)
            | Value::U64(_)
            | Value::U128(_)
            | Value::F32(_)
            | Value::F64(_)
            | Value::Char(_)
            | Value::UnitStruct(_)
            | Value::UnitVariant(_) => ShapeMut::Opaque,
        }
    }

    /// Textual name of this node when it is used as a map key.
    ///
    /// Strings, chars and unit variants (through any newtype wrappers) have a
    /// name. Numeric and composite keys do not.
    pub(crate) fn key_name(&self) -> Option<std::borrow::Cow<'_, str>> {
        use std::borrow::Cow;

        match self {
            Value::String(name) => Some(Cow::Borrowed(name)),
            Value::Char(c) => Some(Cow::Owned(c.to_string())),
            Value::UnitVariant(variant) => Some(Cow::Borrowed(variant.variant)),
            Value::NewtypeStruct(_, inner) => inner.key_name(),
            _ => None,
        }
    }
}
