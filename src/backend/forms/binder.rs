/**
 * Form Binder
 *
 * Decodes an `application/x-www-form-urlencoded` body into a plain struct
 * through serde. Each struct field is looked up by its serde name; keys with
 * no matching field are ignored and missing keys keep the struct's default.
 *
 * # Field Types
 *
 * - `String` and other string-like types take the raw value
 * - integers, floats, `bool` and `char` are parsed from the value; an
 *   empty value leaves a number or `bool` at zero / `false`
 * - `Option<T>` is `None` for an empty value
 * - unit enums match the value against the variant names
 *
 * Repeated keys bind the first occurrence. A value that fails to parse is a
 * [`BindError::Malformed`] (the client's fault). A destination that cannot
 * be bound at all, such as a field of sequence or nested struct type, is a
 * [`BindError::InvalidDeclaration`] (the programmer's fault). Declarations
 * are checked field by field before the body is read, so a bad destination
 * fails on every request, not only on requests that send the offending key.
 */

use std::collections::HashSet;
use std::fmt;

use serde::de::{
    self, value::StringDeserializer, DeserializeOwned, DeserializeSeed, IntoDeserializer,
    MapAccess, Visitor,
};
use serde::forward_to_deserialize_any;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// The submitted data does not fit the destination
    #[error("malformed form data: {0}")]
    Malformed(String),

    /// The destination type cannot be bound from form data
    #[error("invalid form declaration: {0}")]
    InvalidDeclaration(String),
}

impl de::Error for BindError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self::Malformed(msg.to_string())
    }
}

/// Decode a urlencoded body into `T`
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, BindError> {
    check_declaration::<T>()?;
    T::deserialize(FormDeserializer::new(body))
}

/// Fail if any field of `T` could never be bound from a form value.
///
/// Binds an empty value into each declared field on its own. Only
/// [`BindError::InvalidDeclaration`] counts here; other failures (a missing
/// required field, an empty enum value) depend on the request and are left
/// to the real decode.
pub fn check_declaration<T: DeserializeOwned>() -> Result<(), BindError> {
    let mut fields = None;
    let _ = T::deserialize(StructFields(&mut fields));

    for field in fields.unwrap_or_default() {
        let single = FormDeserializer {
            pairs: vec![(field.to_string(), String::new())],
        };
        if let Err(e @ BindError::InvalidDeclaration(_)) = T::deserialize(single) {
            return Err(e);
        }
    }
    Ok(())
}

/// Records the field list of a struct destination and binds nothing
struct StructFields<'a>(&'a mut Option<&'static [&'static str]>);

impl<'de> de::Deserializer<'de> for StructFields<'_> {
    type Error = BindError;

    fn deserialize_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, BindError> {
        Err(BindError::InvalidDeclaration("not a struct".to_string()))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value, BindError> {
        *self.0 = Some(fields);
        Err(BindError::InvalidDeclaration("field list only".to_string()))
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map enum identifier ignored_any
    }
}

/// Top-level deserializer: the whole form as a map of first-occurrence pairs
pub struct FormDeserializer {
    pairs: Vec<(String, String)>,
}

impl FormDeserializer {
    pub fn new(body: &[u8]) -> Self {
        let mut seen = HashSet::new();
        let pairs = form_urlencoded::parse(body)
            .into_owned()
            .filter(|(key, _)| seen.insert(key.clone()))
            .collect();
        Self { pairs }
    }
}

impl<'de> de::Deserializer<'de> for FormDeserializer {
    type Error = BindError;

    fn deserialize_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, BindError> {
        Err(BindError::InvalidDeclaration(
            "form destination must be a struct or map".to_string(),
        ))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, BindError> {
        self.deserialize_map(visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        visitor.visit_map(FormMap {
            pairs: self.pairs.into_iter(),
            value: None,
        })
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, BindError> {
        visitor.visit_newtype_struct(self)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct seq tuple tuple_struct enum
        identifier ignored_any
    }
}

struct FormMap {
    pairs: std::vec::IntoIter<(String, String)>,
    value: Option<String>,
}

impl<'de> MapAccess<'de> for FormMap {
    type Error = BindError;

    fn next_key_seed<K: DeserializeSeed<'de>>(
        &mut self,
        seed: K,
    ) -> Result<Option<K::Value>, BindError> {
        match self.pairs.next() {
            Some((key, value)) => {
                self.value = Some(value);
                let key: StringDeserializer<BindError> = key.into_deserializer();
                seed.deserialize(key).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value, BindError> {
        let value = self.value.take().unwrap_or_default();
        seed.deserialize(FieldValue(value))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.pairs.len())
    }
}

/// Deserializer for a single submitted value
pub struct FieldValue(pub String);

impl FieldValue {
    fn parse<T>(&self, kind: &str) -> Result<T, BindError>
    where
        T: std::str::FromStr,
    {
        self.0
            .parse()
            .map_err(|_| BindError::Malformed(format!("{:?} is not a valid {}", self.0, kind)))
    }

    fn parse_bool(&self) -> Result<bool, BindError> {
        match self.0.as_str() {
            "" => Ok(false),
            "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
            "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
            other => Err(BindError::Malformed(format!("{:?} is not a valid bool", other))),
        }
    }

    fn unsupported(kind: &str) -> BindError {
        BindError::InvalidDeclaration(format!("cannot bind a form value into a {}", kind))
    }
}

// An empty value binds as zero
macro_rules! parse_number {
    ($($method:ident => $visit:ident : $ty:ty,)*) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
                if self.0.is_empty() {
                    return visitor.$visit(<$ty>::default());
                }
                visitor.$visit(self.parse::<$ty>(stringify!($ty))?)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for FieldValue {
    type Error = BindError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        visitor.visit_string(self.0)
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        visitor.visit_bool(self.parse_bool()?)
    }

    parse_number! {
        deserialize_i8 => visit_i8: i8,
        deserialize_i16 => visit_i16: i16,
        deserialize_i32 => visit_i32: i32,
        deserialize_i64 => visit_i64: i64,
        deserialize_i128 => visit_i128: i128,
        deserialize_u8 => visit_u8: u8,
        deserialize_u16 => visit_u16: u16,
        deserialize_u32 => visit_u32: u32,
        deserialize_u64 => visit_u64: u64,
        deserialize_u128 => visit_u128: u128,
        deserialize_f32 => visit_f32: f32,
        deserialize_f64 => visit_f64: f64,
    }

    fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        visitor.visit_char(self.parse::<char>("char")?)
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        visitor.visit_string(self.0)
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        visitor.visit_string(self.0)
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        visitor.visit_byte_buf(self.0.into_bytes())
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        visitor.visit_byte_buf(self.0.into_bytes())
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        if self.0.is_empty() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, BindError> {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, BindError> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, BindError> {
        Err(Self::unsupported("sequence"))
    }

    fn deserialize_tuple<V: Visitor<'de>>(
        self,
        _len: usize,
        _visitor: V,
    ) -> Result<V::Value, BindError> {
        Err(Self::unsupported("tuple"))
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        _len: usize,
        _visitor: V,
    ) -> Result<V::Value, BindError> {
        Err(Self::unsupported(name))
    }

    fn deserialize_map<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, BindError> {
        Err(Self::unsupported("map"))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        _fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value, BindError> {
        Err(Self::unsupported(name))
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, BindError> {
        let variant: StringDeserializer<BindError> = self.0.into_deserializer();
        visitor.visit_enum(variant)
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        visitor.visit_string(self.0)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, BindError> {
        visitor.visit_unit()
    }
}
