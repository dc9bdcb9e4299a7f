//! YAML codec.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::Decoder;
use crate::error::Result;

/// YAML via `serde_yaml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlDecoder;

impl YamlDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl<T> Decoder<T> for YamlDecoder
where
    T: Serialize + DeserializeOwned,
{
    fn marshal(&self, value: &T) -> Result<Vec<u8>> {
        Ok(serde_yaml::to_string(value)?.into_bytes())
    }

    fn unmarshal(&self, data: &[u8], dest: &mut T) -> Result<()> {
        *dest = serde_yaml::from_slice(data)?;
        Ok(())
    }
}
