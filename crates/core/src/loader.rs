//! Read-then-decode entry points.
//!
//! These compose one [`Source`] read with one [`Decoder`] call. Errors from
//! either side are returned unchanged so callers can match on their kind.

use tracing::debug;

use crate::codec::Decoder;
use crate::context::OperationContext;
use crate::error::Result;
use crate::source::Source;

/// Read `source` and decode the payload into a fresh `T`.
pub async fn load<T, S, D>(ctx: &OperationContext, source: &S, decoder: &D) -> Result<T>
where
    T: Default,
    S: Source + ?Sized,
    D: Decoder<T> + ?Sized,
{
    let mut value = T::default();
    fill(ctx, source, decoder, &mut value).await?;
    Ok(value)
}

/// Read `source` and decode the payload into `dest`.
///
/// `dest` is only touched once the read succeeds; how much of it survives a
/// decode failure is up to `decoder`.
pub async fn fill<T, S, D>(
    ctx: &OperationContext,
    source: &S,
    decoder: &D,
    dest: &mut T,
) -> Result<()>
where
    S: Source + ?Sized,
    D: Decoder<T> + ?Sized,
{
    let data = source.read(ctx).await?;
    debug!(bytes = data.len(), "Read configuration payload");
    decoder.unmarshal(&data, dest)
}

/// Build a source with `factory`, then [`load`] from it.
pub async fn load_from<T, S, F, D>(ctx: &OperationContext, factory: F, decoder: &D) -> Result<T>
where
    T: Default,
    S: Source,
    F: FnOnce() -> Result<S>,
    D: Decoder<T> + ?Sized,
{
    let source = factory()?;
    load(ctx, &source, decoder).await
}

/// Build a source with `factory`, then [`fill`] `dest` from it.
pub async fn fill_from<T, S, F, D>(
    ctx: &OperationContext,
    factory: F,
    decoder: &D,
    dest: &mut T,
) -> Result<()>
where
    S: Source,
    F: FnOnce() -> Result<S>,
    D: Decoder<T> + ?Sized,
{
    let source = factory()?;
    fill(ctx, &source, decoder, dest).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{DecoderGroup, JsonDecoder, YamlDecoder};
    use crate::error::{Error, ErrorKind};
    use crate::source::BytesSource;
    use serde::Deserialize;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default, PartialEq, Deserialize, serde::Serialize)]
    struct Service {
        name: String,
        workers: u32,
    }

    #[tokio::test]
    async fn test_load_json() {
        let ctx = OperationContext::background();
        let source = BytesSource::from(r#"{"name":"api","workers":4}"#);

        let service: Service = load(&ctx, &source, &JsonDecoder::new()).await.unwrap();

        assert_eq!(
            service,
            Service {
                name: "api".to_string(),
                workers: 4
            }
        );
    }

    #[tokio::test]
    async fn test_load_with_group_accepts_yaml() {
        let ctx = OperationContext::background();
        let group: DecoderGroup<Service> = DecoderGroup::new()
            .with(JsonDecoder::new())
            .with(YamlDecoder::new());

        let service = load(&ctx, &BytesSource::from("name: worker\nworkers: 2\n"), &group)
            .await
            .unwrap();

        assert_eq!(service.name, "worker");
        assert_eq!(service.workers, 2);
    }

    #[tokio::test]
    async fn test_decode_error_propagates_unchanged() {
        let ctx = OperationContext::background();
        let err = load::<Service, _, _>(&ctx, &BytesSource::from("not json"), &JsonDecoder::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[tokio::test]
    async fn test_cancelled_context_leaves_destination_untouched() {
        let ctx = OperationContext::background();
        ctx.cancel();
        let mut dest = BTreeMap::from([("kept".to_string(), 1u32)]);

        let err = fill(&ctx, &BytesSource::from(r#"{"a":2}"#), &JsonDecoder::new(), &mut dest)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Cancelled);
        assert_eq!(dest.len(), 1);
        assert_eq!(dest["kept"], 1);
    }

    #[tokio::test]
    async fn test_load_from_propagates_factory_error() {
        let ctx = OperationContext::background();
        let err = load_from::<Service, BytesSource, _, _>(
            &ctx,
            || Err(Error::NilCapability),
            &JsonDecoder::new(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NilCapability);
    }

    #[tokio::test]
    async fn test_fill_from_invokes_factory_once() {
        let ctx = OperationContext::background();
        let calls = AtomicUsize::new(0);
        let mut dest = Service::default();

        fill_from(
            &ctx,
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(BytesSource::from(r#"{"name":"x","workers":1}"#))
            },
            &JsonDecoder::new(),
            &mut dest,
        )
        .await
        .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(dest.name, "x");
    }

    #[tokio::test]
    async fn test_load_from_boxed_source() {
        let ctx = OperationContext::background();
        let source: crate::source::BoxSource = Box::new(BytesSource::from("[1,2,3]"));
        let values: Vec<u32> = load(&ctx, &source, &JsonDecoder::new()).await.unwrap();
        assert_eq!(values, vec![1, 2, 3]);
    }
}
