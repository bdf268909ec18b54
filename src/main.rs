use std::sync::Arc;

use serde_json::{Value, json};
use topicbus::config::load_config;
use topicbus::utils::logging;
use topicbus::{Broker, Error, Observer, Subject};
use tracing::info;

struct ClickLogger;

impl Observer<Value> for ClickLogger {
    fn update(&self, context: &Value) {
        info!(%context, "subject notified");
    }

    fn name(&self) -> &str {
        "click-logger"
    }
}

fn main() -> Result<(), Error> {
    let _ = dotenvy::dotenv();
    let config = load_config()?;
    logging::init(&config.logging.level);

    let broker: Broker<Value> = Broker::from_settings(&config.broker);

    let first = broker.subscribe("clicks", |topic, payload| {
        info!(topic, %payload, "first subscriber");
    });
    let second = broker.subscribe("clicks", |topic, payload| {
        info!(topic, %payload, "second subscriber");
    });
    info!(%first, %second, "subscribed");

    let report = broker.publish("clicks", &json!({"x": 1}));
    info!(delivered = report.delivered, "published");

    if let Some(token) = broker.unsubscribe(&second) {
        info!(%token, "unsubscribed");
    }
    let report = broker.publish("clicks", &json!({"x": 2}));
    info!(delivered = report.delivered, "published");

    let subject = Subject::new();
    let logger: Arc<dyn Observer<Value>> = Arc::new(ClickLogger);
    subject.add_observer(Arc::clone(&logger));
    subject.notify(&json!({"button": "left"}));
    subject.remove_observer(&logger);
    let report = subject.notify(&json!({"button": "right"}));
    info!(notified = report.notified, "subject done");

    Ok(())
}
