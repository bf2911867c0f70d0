/// Status line of the host: receives one message per noteworthy event.
pub trait StatusReporter {
    fn report(&mut self, message: &str);
}

/// Forwards status messages to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl StatusReporter for LogReporter {
    fn report(&mut self, message: &str) {
        log::error!("{message}");
    }
}

/// Keeps every message, newest last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageLog {
    messages: Vec<String>,
}

impl MessageLog {
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn last(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl StatusReporter for MessageLog {
    fn report(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
