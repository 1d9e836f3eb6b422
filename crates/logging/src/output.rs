//! crates/logging/src/output.rs
//! Output capability: the destination a formatted payload is written to.

use std::fmt;
use std::sync::Arc;

use crate::error::BoxError;
use crate::record::Payload;

/// Destination for formatted payloads.
///
/// Implementations must be shareable across threads because a single output
/// may be bound to several levels of the same logger at once.
pub trait Sink: Send + Sync {
    /// Writes one payload.
    fn write(&self, payload: &Payload) -> Result<(), BoxError>;
}

impl<F> Sink for F
where
    F: Fn(&Payload) -> Result<(), BoxError> + Send + Sync,
{
    fn write(&self, payload: &Payload) -> Result<(), BoxError> {
        self(payload)
    }
}

/// Output that discards everything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NullSink;

impl Sink for NullSink {
    fn write(&self, _payload: &Payload) -> Result<(), BoxError> {
        Ok(())
    }
}

/// Returns a shared [`NullSink`].
#[must_use]
pub fn null_sink() -> Arc<dyn Sink> {
    Arc::new(NullSink)
}

/// Wraps an infallible closure as a shared output.
///
/// ```
/// use logging::{sink_fn, Payload, Sink};
///
/// let sink = sink_fn(|payload: &Payload| println!("{payload}"));
/// sink.write(&Payload::from("hello")).unwrap();
/// ```
pub fn sink_fn<F>(write: F) -> Arc<dyn Sink>
where
    F: Fn(&Payload) + Send + Sync + 'static,
{
    Arc::new(FnSink(write))
}

struct FnSink<F>(F);

impl<F> Sink for FnSink<F>
where
    F: Fn(&Payload) + Send + Sync,
{
    fn write(&self, payload: &Payload) -> Result<(), BoxError> {
        (self.0)(payload);
        Ok(())
    }
}

impl<F> fmt::Debug for FnSink<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnSink")
    }
}
