//! Decoding side of a naming profile.
//!
//! Incoming object keys are matched against the declared names that serde
//! hands over in `deserialize_struct` and `deserialize_enum`. Anything that
//! is not a declared field or variant keeps its key.

use serde::de::value::StringDeserializer;
use serde::de::{
    self, DeserializeSeed, Deserializer, Error as _, IntoDeserializer, MapAccess, SeqAccess,
    Unexpected, Visitor,
};
use serde::forward_to_deserialize_any;
use serde_json::{Error, Map, Value};

use super::NamingPolicy;

pub(super) fn from_value<T>(value: Value, naming: NamingPolicy) -> Result<T, Error>
where
    T: de::DeserializeOwned,
{
    T::deserialize(PayloadDeserializer { value, naming })
}

struct PayloadDeserializer {
    value: Value,
    naming: NamingPolicy,
}

impl PayloadDeserializer {
    /// Declared name whose wire form is `key`, or `key` itself
    fn declared_name(naming: NamingPolicy, key: String, declared: &[&'static str]) -> String {
        declared
            .iter()
            .find(|name| naming.convert_name(name) == key)
            .map(|name| name.to_string())
            .unwrap_or(key)
    }

    fn visit_array<'de, V>(
        items: Vec<Value>,
        naming: NamingPolicy,
        visitor: V,
    ) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        let len = items.len();
        let mut seq = SeqDeserializer {
            iter: items.into_iter(),
            naming,
        };
        let value = visitor.visit_seq(&mut seq)?;
        if seq.iter.len() == 0 {
            Ok(value)
        } else {
            Err(Error::invalid_length(len, &"fewer elements in array"))
        }
    }

    fn visit_object<'de, V>(
        object: Map<String, Value>,
        naming: NamingPolicy,
        fields: Option<&'static [&'static str]>,
        visitor: V,
    ) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        let len = object.len();
        let mut map = MapDeserializer {
            iter: object.into_iter(),
            pending: None,
            naming,
            fields,
        };
        let value = visitor.visit_map(&mut map)?;
        if map.iter.len() == 0 {
            Ok(value)
        } else {
            Err(Error::invalid_length(len, &"fewer elements in map"))
        }
    }
}

impl<'de> Deserializer<'de> for PayloadDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(n) => n.deserialize_any(visitor),
            Value::String(s) => visitor.visit_string(s),
            Value::Array(items) => Self::visit_array(items, self.naming, visitor),
            Value::Object(object) => Self::visit_object(object, self.naming, None, visitor),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Object(object) => Self::visit_object(object, self.naming, Some(fields), visitor),
            Value::Array(items) => Self::visit_array(items, self.naming, visitor),
            other => Err(Error::invalid_type(unexpected(&other), &visitor)),
        }
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        let naming = self.naming;
        match self.value {
            Value::String(name) => {
                let variant: StringDeserializer<Error> =
                    Self::declared_name(naming, name, variants).into_deserializer();
                visitor.visit_enum(variant)
            }
            Value::Object(object) if object.len() == 1 => {
                let Some((name, value)) = object.into_iter().next() else {
                    return Err(Error::invalid_length(0, &"map with a single key"));
                };
                visitor.visit_enum(EnumDeserializer {
                    variant: Self::declared_name(naming, name, variants),
                    value,
                    naming,
                })
            }
            Value::Object(object) => {
                Err(Error::invalid_length(object.len(), &"map with a single key"))
            }
            other => Err(Error::invalid_type(unexpected(&other), &"string or map")),
        }
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map identifier
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
    naming: NamingPolicy,
}

impl<'de> SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>, Error>
    where
        T: DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed
                .deserialize(PayloadDeserializer {
                    value,
                    naming: self.naming,
                })
                .map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer {
    iter: serde_json::map::IntoIter,
    pending: Option<Value>,
    naming: NamingPolicy,
    /// Declared struct fields; `None` for maps, whose keys are data
    fields: Option<&'static [&'static str]>,
}

impl<'de> MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, Error>
    where
        K: DeserializeSeed<'de>,
    {
        let Some((key, value)) = self.iter.next() else {
            return Ok(None);
        };
        self.pending = Some(value);
        let key = match self.fields {
            Some(fields) => PayloadDeserializer::declared_name(self.naming, key, fields),
            None => key,
        };
        seed.deserialize(KeyDeserializer { key }).map(Some)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value, Error>
    where
        V: DeserializeSeed<'de>,
    {
        let value = self
            .pending
            .take()
            .ok_or_else(|| Error::custom("map value read before its key"))?;
        seed.deserialize(PayloadDeserializer {
            value,
            naming: self.naming,
        })
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct EnumDeserializer {
    variant: String,
    value: Value,
    naming: NamingPolicy,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, VariantDeserializer), Error>
    where
        V: DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(KeyDeserializer { key: self.variant })?;
        Ok((
            variant,
            VariantDeserializer {
                value: self.value,
                naming: self.naming,
            },
        ))
    }
}

struct VariantDeserializer {
    value: Value,
    naming: NamingPolicy,
}

impl VariantDeserializer {
    fn into_payload(self) -> PayloadDeserializer {
        PayloadDeserializer {
            value: self.value,
            naming: self.naming,
        }
    }
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<(), Error> {
        match self.value {
            Value::Null => Ok(()),
            other => Err(Error::invalid_type(unexpected(&other), &"unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value, Error>
    where
        T: DeserializeSeed<'de>,
    {
        seed.deserialize(self.into_payload())
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        Deserializer::deserialize_seq(self.into_payload(), visitor)
    }

    fn struct_variant<V>(
        self,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        Deserializer::deserialize_struct(self.into_payload(), "", fields, visitor)
    }
}

/// Object keys; numeric and boolean map keys are parsed on request
struct KeyDeserializer {
    key: String,
}

macro_rules! deserialize_parsed_key {
    ($de:lifetime; $($method:ident => $visit:ident: $ty:ty),*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value, Error>
            where
                V: Visitor<$de>,
            {
                match self.key.parse::<$ty>() {
                    Ok(parsed) => visitor.$visit(parsed),
                    Err(_) => visitor.visit_string(self.key),
                }
            }
        )*
    };
}

impl<'de> Deserializer<'de> for KeyDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_string(self.key)
    }

    deserialize_parsed_key! {
        'de;
        deserialize_bool => visit_bool: bool,
        deserialize_i8 => visit_i8: i8,
        deserialize_i16 => visit_i16: i16,
        deserialize_i32 => visit_i32: i32,
        deserialize_i64 => visit_i64: i64,
        deserialize_u8 => visit_u8: u8,
        deserialize_u16 => visit_u16: u16,
        deserialize_u32 => visit_u32: u32,
        deserialize_u64 => visit_u64: u64
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        let variant: StringDeserializer<Error> = self.key.into_deserializer();
        visitor.visit_enum(variant)
    }

    forward_to_deserialize_any! {
        i128 u128 f32 f64 char str string bytes byte_buf unit unit_struct
        seq tuple tuple_struct map struct identifier ignored_any
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(n) => match (n.as_u64(), n.as_i64(), n.as_f64()) {
            (Some(u), _, _) => Unexpected::Unsigned(u),
            (_, Some(i), _) => Unexpected::Signed(i),
            (_, _, Some(f)) => Unexpected::Float(f),
            _ => Unexpected::Other("number"),
        },
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}
