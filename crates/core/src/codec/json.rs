//! JSON codec.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::Decoder;
use crate::error::Result;

/// JSON via `serde_json`; works for any serde type.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder {
    pretty: bool,
}

impl JsonDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indent marshaled output.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl<T> Decoder<T> for JsonDecoder
where
    T: Serialize + DeserializeOwned,
{
    fn marshal(&self, value: &T) -> Result<Vec<u8>> {
        let data = if self.pretty {
            serde_json::to_vec_pretty(value)?
        } else {
            serde_json::to_vec(value)?
        };
        Ok(data)
    }

    fn unmarshal(&self, data: &[u8], dest: &mut T) -> Result<()> {
        *dest = serde_json::from_slice(data)?;
        Ok(())
    }
}
