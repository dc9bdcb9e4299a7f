//! The [`Decoder`] capability and built-in formats.
//!
//! # Submodules
//! - `json`: serde_json, the built-in format
//! - `yaml`: serde_yaml
//! - `text`: raw UTF-8 payload to string-like values
//! - `group`: ordered fallback over several decoders
//!
//! Decoders are synchronous and stateless; they never see the operation
//! context because decoding does not block.

mod group;
mod json;
mod text;
mod yaml;

use std::sync::Arc;

use crate::error::Result;

pub use self::group::DecoderGroup;
pub use self::json::JsonDecoder;
pub use self::text::TextDecoder;
pub use self::yaml::YamlDecoder;

/// Converts between raw bytes and values of type `T`.
pub trait Decoder<T>: Send + Sync {
    /// Encode `value` into bytes.
    fn marshal(&self, value: &T) -> Result<Vec<u8>>;

    /// Decode `data` into `dest`.
    ///
    /// Implementations may leave `dest` partially written when they fail;
    /// [`DecoderGroup`] stages into a temporary to keep callers safe.
    fn unmarshal(&self, data: &[u8], dest: &mut T) -> Result<()>;
}

impl<T, D: Decoder<T> + ?Sized> Decoder<T> for Box<D> {
    fn marshal(&self, value: &T) -> Result<Vec<u8>> {
        (**self).marshal(value)
    }

    fn unmarshal(&self, data: &[u8], dest: &mut T) -> Result<()> {
        (**self).unmarshal(data, dest)
    }
}

impl<T, D: Decoder<T> + ?Sized> Decoder<T> for Arc<D> {
    fn marshal(&self, value: &T) -> Result<Vec<u8>> {
        (**self).marshal(value)
    }

    fn unmarshal(&self, data: &[u8], dest: &mut T) -> Result<()> {
        (**self).unmarshal(data, dest)
    }
}

impl<T, D: Decoder<T> + ?Sized> Decoder<T> for &D {
    fn marshal(&self, value: &T) -> Result<Vec<u8>> {
        (**self).marshal(value)
    }

    fn unmarshal(&self, data: &[u8], dest: &mut T) -> Result<()> {
        (**self).unmarshal(data, dest)
    }
}

/// A decoder assembled from an encode and a decode function.
///
/// ```rust,ignore
/// let upper = Codec::new(
///     |v: &String| Ok(v.to_uppercase().into_bytes()),
///     |data: &[u8], dest: &mut String| {
///         *dest = String::from_utf8_lossy(data).to_lowercase();
///         Ok(())
///     },
/// );
/// ```
pub struct Codec<E, D> {
    encode: E,
    decode: D,
}

impl<E, D> Codec<E, D> {
    pub fn new(encode: E, decode: D) -> Self {
        Self { encode, decode }
    }
}

impl<T, E, D> Decoder<T> for Codec<E, D>
where
    E: Fn(&T) -> Result<Vec<u8>> + Send + Sync,
    D: Fn(&[u8], &mut T) -> Result<()> + Send + Sync,
{
    fn marshal(&self, value: &T) -> Result<Vec<u8>> {
        (self.encode)(value)
    }

    fn unmarshal(&self, data: &[u8], dest: &mut T) -> Result<()> {
        (self.decode)(data, dest)
    }
}

impl<E, D> std::fmt::Debug for Codec<E, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Codec").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_forwards_to_closures() {
        let codec = Codec::new(
            |v: &u32| -> Result<Vec<u8>> { Ok(v.to_string().into_bytes()) },
            |data: &[u8], dest: &mut u32| -> Result<()> {
                *dest = std::str::from_utf8(data)?
                    .parse()
                    .map_err(crate::Error::other)?;
                Ok(())
            },
        );

        assert_eq!(codec.marshal(&7).unwrap(), b"7");
        let mut out = 0;
        codec.unmarshal(b"42", &mut out).unwrap();
        assert_eq!(out, 42);
    }

    #[test]
    fn test_boxed_decoder_forwards() {
        let boxed: Box<dyn Decoder<serde_json::Value>> = Box::new(JsonDecoder::new());
        let mut out = serde_json::Value::Null;
        boxed.unmarshal(br#"{"a":1}"#, &mut out).unwrap();
        assert_eq!(out["a"], 1);
    }
}
