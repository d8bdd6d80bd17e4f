#![forbid(unsafe_code)]

use oracle_kernel_contracts::DomainEvent;

/// Events buffered for the invocation in flight. Dropping the log without
/// draining it discards them.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<DomainEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: DomainEvent) {
        self.events.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = DomainEvent>) {
        self.events.extend(events);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Hand over everything emitted so far, in emission order.
    pub fn drain(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }
}
