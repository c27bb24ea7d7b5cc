use sdk::cosmwasm_std::Event;

use crate::{batch::Batch, emit::Emitter};

/// The messages to dispatch and the events to emit as an outcome of an execution
#[must_use]
#[derive(Default)]
pub struct Response {
    pub(crate) messages: Batch,
    pub(crate) events: Vec<Event>,
}

impl Response {
    pub fn messages_with_events<I>(messages: Batch, events: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Event>,
    {
        Self {
            messages,
            events: events.into_iter().map(Into::into).collect(),
        }
    }

    pub fn add_event<E>(mut self, event: E) -> Self
    where
        E: Into<Event>,
    {
        self.events.push(event.into());

        self
    }
}

impl From<Emitter> for Response {
    fn from(emitter: Emitter) -> Self {
        Self::default().add_event(emitter)
    }
}
