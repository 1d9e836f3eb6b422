//! crates/logging/src/dispatch.rs
//! Per-level output table.
//!
//! Every level, special levels included, owns one slot. An empty slot means
//! "unmapped": [`DispatchTable::get`] reports the no-op output for it while
//! [`DispatchTable::resolve`] falls back to the `DEFAULT` slot. Removing a
//! mapping stores an explicit no-op output, so a removed level stays silent
//! instead of inheriting the default.

use std::fmt;
use std::sync::Arc;

use crate::levels::{LEVEL_COUNT, LogLevel};
use crate::output::{NullSink, Sink, null_sink};

/// Mapping from level to output.
#[derive(Clone, Default)]
pub struct DispatchTable {
    slots: [Option<Arc<dyn Sink>>; LEVEL_COUNT],
}

impl DispatchTable {
    /// Creates a table with every level unmapped.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `level` to `output`, replacing any previous mapping.
    pub fn set(&mut self, level: LogLevel, output: Arc<dyn Sink>) {
        self.slots[level.index()] = Some(output);
    }

    /// Returns the output bound to `level`, or a no-op output when unmapped.
    #[must_use]
    pub fn get(&self, level: LogLevel) -> Arc<dyn Sink> {
        self.slots[level.index()].clone().unwrap_or_else(null_sink)
    }

    /// Reports whether `level` has its own mapping.
    #[must_use]
    pub fn is_mapped(&self, level: LogLevel) -> bool {
        self.slots[level.index()].is_some()
    }

    /// Returns the output an emission at `level` reaches.
    ///
    /// Order: the level's own mapping, then the `DEFAULT` mapping, then a
    /// no-op output.
    #[must_use]
    pub fn resolve(&self, level: LogLevel) -> Arc<dyn Sink> {
        self.slots[level.index()]
            .as_ref()
            .or_else(|| self.slots[LogLevel::Default.index()].as_ref())
            .map_or_else(null_sink, Arc::clone)
    }

    /// Silences `level` by binding it to a no-op output.
    pub fn remove(&mut self, level: LogLevel) {
        self.slots[level.index()] = Some(Arc::new(NullSink));
    }

    /// Points `DEFAULT` at `output` and drops every level-specific mapping.
    pub fn reset_to_default(&mut self, output: Arc<dyn Sink>) {
        self.slots = Default::default();
        self.set(LogLevel::Default, output);
    }

    /// Applies several bindings in order; later entries win.
    pub fn extend<I>(&mut self, outputs: I)
    where
        I: IntoIterator<Item = (LogLevel, Arc<dyn Sink>)>,
    {
        for (level, output) in outputs {
            self.set(level, output);
        }
    }
}

impl fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mapped: Vec<&'static str> = LogLevel::ALL
            .into_iter()
            .filter(|level| self.is_mapped(*level))
            .map(LogLevel::label)
            .collect();
        f.debug_struct("DispatchTable")
            .field("mapped", &mapped)
            .finish()
    }
}
