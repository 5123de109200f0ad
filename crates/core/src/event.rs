use chrono::{DateTime, Utc};

/// A domain event emitted by a catalog or order aggregate.
///
/// Events are immutable facts with a stable dotted name
/// (e.g. "catalog.product.variants_saved") and a schema version.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    fn event_type(&self) -> &'static str;

    fn version(&self) -> u32;

    /// Business time of the operator action that produced the event.
    fn occurred_at(&self) -> DateTime<Utc>;
}
