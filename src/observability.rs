use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("verdant.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("verdant.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("verdant.client.request_duration_seconds");

pub(crate) static CHAT_TURNS: Counter = Counter::new("verdant.chat.turns");
pub(crate) static CHAT_TURN_ERRORS: Counter = Counter::new("verdant.chat.turn_errors");
pub(crate) static CHAT_RESETS: Counter = Counter::new("verdant.chat.resets");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&CHAT_TURNS);
    collector.register_counter(&CHAT_TURN_ERRORS);
    collector.register_counter(&CHAT_RESETS);
}
