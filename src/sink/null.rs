use super::Sink;
use crate::error::SinkError;
use crate::line::Record;

/// Discards everything. Default sink of every registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

/// Shared null sink for `Registry::new` and flight builds.
pub const NULL_SINK: &dyn Sink = &NullSink;

impl Sink for NullSink {
    #[inline(always)]
    fn accept(&self, _record: &Record<'_>) -> Result<(), SinkError> {
        Ok(())
    }
}
