//! Ordered fallback over several decoders.
//!
//! Responsibilities:
//! - Try decoders in declaration order and stop at the first success.
//! - Stage every decode into a fresh `T::default()` so a failing decoder can
//!   never leave the caller's value half-written.
//! - Aggregate every failure, tagged by position, when nothing succeeds.
//!
//! Does NOT handle:
//! - Format sniffing or reordering; order is the caller's choice.
//! - Concurrent decodes into the same destination.
//!
//! Invariants:
//! - On failure the destination is exactly what it was before the call.
//! - An empty group fails with `NoDecoders`, never `DecodeExhausted`.

use tracing::trace;

use super::Decoder;
use crate::error::{Error, Result};

/// Fallback chain of decoders for `T`.
///
/// # Example
///
/// ```rust,ignore
/// use confstore::{DecoderGroup, JsonDecoder, YamlDecoder};
///
/// let group = DecoderGroup::new()
///     .with(JsonDecoder::new())
///     .with(YamlDecoder::new());
/// let config: AppConfig = confstore::load(&ctx, &source, &group).await?;
/// ```
pub struct DecoderGroup<T> {
    decoders: Vec<Box<dyn Decoder<T>>>,
}

impl<T> Default for DecoderGroup<T> {
    fn default() -> Self {
        Self {
            decoders: Vec::new(),
        }
    }
}

impl<T> std::fmt::Debug for DecoderGroup<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecoderGroup")
            .field("decoders", &self.decoders.len())
            .finish()
    }
}

impl<T> DecoderGroup<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a decoder; it is tried after every decoder already added.
    pub fn with(mut self, decoder: impl Decoder<T> + 'static) -> Self {
        self.decoders.push(Box::new(decoder));
        self
    }

    /// Build a group from already boxed decoders, in order.
    pub fn from_decoders(decoders: Vec<Box<dyn Decoder<T>>>) -> Self {
        Self { decoders }
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    /// Decode straight into `dest` without staging.
    ///
    /// For destination types that cannot be freshly constructed. A decoder that
    /// writes part of `dest` and then fails leaves those writes in place.
    pub fn unmarshal_in_place(&self, data: &[u8], dest: &mut T) -> Result<()> {
        if let Some(e) = self.empty_error("unmarshal") {
            return Err(e);
        }
        self.try_each("unmarshal", |decoder| decoder.unmarshal(data, dest))
            .map_err(|failures| Error::DecodeExhausted { failures })
    }

    fn try_each<R>(
        &self,
        operation: &'static str,
        mut attempt: impl FnMut(&dyn Decoder<T>) -> Result<R>,
    ) -> std::result::Result<R, Vec<Error>> {
        let mut failures = Vec::with_capacity(self.decoders.len());
        for (position, decoder) in self.decoders.iter().enumerate() {
            match attempt(decoder.as_ref()) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    trace!(position, operation, error = %e, "Decoder failed, trying next");
                    failures.push(e);
                }
            }
        }
        Err(failures)
    }

    fn empty_error(&self, operation: &'static str) -> Option<Error> {
        self.decoders
            .is_empty()
            .then_some(Error::NoDecoders { operation })
    }
}

impl<T> Decoder<T> for DecoderGroup<T>
where
    T: Default,
{
    fn marshal(&self, value: &T) -> Result<Vec<u8>> {
        if let Some(e) = self.empty_error("marshal") {
            return Err(e);
        }
        self.try_each("marshal", |decoder| decoder.marshal(value))
            .map_err(|failures| Error::EncodeExhausted { failures })
    }

    fn unmarshal(&self, data: &[u8], dest: &mut T) -> Result<()> {
        if let Some(e) = self.empty_error("unmarshal") {
            return Err(e);
        }
        let staged = self.try_each("unmarshal", |decoder| {
            let mut staged = T::default();
            decoder.unmarshal(data, &mut staged).map(|()| staged)
        });
        match staged {
            Ok(value) => {
                *dest = value;
                Ok(())
            }
            Err(failures) => Err(Error::DecodeExhausted { failures }),
        }
    }
}
