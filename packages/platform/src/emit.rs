use currency::Asset;
use finance::{coin::Amount, percent::Percent};
use sdk::cosmwasm_std::{Env, Event, Timestamp};

pub trait Emit
where
    Self: Sized,
{
    fn emit<K, V>(self, event_key: K, event_value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>;

    /// Specialization of [`emit`](Self::emit) for [`Timestamp`].
    fn emit_timestamp<K>(self, event_key: K, timestamp: &Timestamp) -> Self
    where
        K: Into<String>,
    {
        self.emit_to_string_value(event_key, timestamp.nanos())
    }

    /// Specialization of [`emit`](Self::emit) for values implementing [`ToString`].
    fn emit_to_string_value<K, V>(self, event_key: K, value: V) -> Self
    where
        K: Into<String>,
        V: ToString,
    {
        self.emit(event_key, value.to_string())
    }

    /// Specialization of [`emit`](Self::emit) for [`Amount`].
    fn emit_amount<K>(self, event_key: K, amount: Amount) -> Self
    where
        K: Into<String>,
    {
        self.emit_to_string_value(event_key, amount)
    }

    /// Specialization of [`emit`](Self::emit) for [`Asset`].
    fn emit_asset<K>(self, event_key: K, asset: &Asset) -> Self
    where
        K: Into<String>,
    {
        self.emit(event_key, asset.denom())
    }

    /// Specialization of [`emit`](Self::emit) for [`Percent`] in basis points.
    fn emit_percent_amount<K>(self, event_key: K, percent: Percent) -> Self
    where
        K: Into<String>,
    {
        self.emit_to_string_value(event_key, percent.units())
    }

    fn emit_tx_info(self, env: &Env) -> Self {
        self.emit_to_string_value("height", env.block.height)
            .emit_timestamp("at", &env.block.time)
            .emit_to_string_value(
                "idx",
                env.transaction
                    .as_ref()
                    .map(|transaction| transaction.index)
                    .unwrap_or_default(),
            )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Emitter {
    event: Event,
}

impl Emitter {
    pub fn of_type<T>(event_type: T) -> Self
    where
        T: Into<String>,
    {
        Self {
            event: Event::new(event_type.into()),
        }
    }
}

impl Emit for Emitter {
    fn emit<K, V>(mut self, event_key: K, event_value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.event = self.event.add_attribute(event_key, event_value);

        self
    }
}

impl From<Emitter> for Event {
    fn from(emitter: Emitter) -> Self {
        emitter.event
    }
}
