//! Raw text codec.
//!
//! The payload is taken verbatim as a string. Only destination types that
//! deserialize from a plain string (`String`, `PathBuf`, unit-variant enums,
//! ...) are accepted; anything else is [`Error::InvalidType`].

use serde::Serialize;
use serde::de::value::{Error as ValueError, StrDeserializer};
use serde::de::{DeserializeOwned, IntoDeserializer};

use super::Decoder;
use crate::error::{Error, Result};

const EXPECTED: &str = "string";

/// Copies the payload into string-like values and back.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextDecoder;

impl TextDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl<T> Decoder<T> for TextDecoder
where
    T: Serialize + DeserializeOwned,
{
    fn marshal(&self, value: &T) -> Result<Vec<u8>> {
        match serde_json::to_value(value) {
            Ok(serde_json::Value::String(text)) => Ok(text.into_bytes()),
            Ok(serde_json::Value::Null) => Err(Error::NilPointer),
            _ => Err(Error::InvalidType { expected: EXPECTED }),
        }
    }

    fn unmarshal(&self, data: &[u8], dest: &mut T) -> Result<()> {
        let text = std::str::from_utf8(data)?;
        let deserializer: StrDeserializer<'_, ValueError> = text.into_deserializer();
        *dest = T::deserialize(deserializer).map_err(|_| Error::InvalidType { expected: EXPECTED })?;
        Ok(())
    }
}
