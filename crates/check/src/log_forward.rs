use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

pub trait LogSink: Send + Sync {
    fn log(&self, source: &str, message: &str, level: Level);
}

pub struct ForwardLayer {
    sink: Box<dyn LogSink>,
}

impl ForwardLayer {
    pub fn new(sink: Box<dyn LogSink>) -> Self {
        Self { sink }
    }
}

impl<S: Subscriber> Layer<S> for ForwardLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let meta = event.metadata();
        let source = match (meta.file(), meta.line()) {
            (Some(file), Some(line)) => format!("{file}:{line}"),
            _ => meta.target().to_string(),
        };

        self.sink.log(&source, &visitor.message, *meta.level());
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            if self.message.is_empty() {
                self.message = format!("{value:?}");
            } else {
                let fields = std::mem::take(&mut self.message);
                self.message = format!("{value:?} {fields}");
            }
        } else {
            if !self.message.is_empty() {
                self.message.push(' ');
            }
            let _ = write!(self.message, "{}={:?}", field.name(), value);
        }
    }
}

pub fn install(sink: Box<dyn LogSink>) {
    tracing_subscriber::registry()
        .with(ForwardLayer::new(sink))
        .init();
}
