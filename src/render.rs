//! Output side of the controller.
//!
//! The intersection pushes one line per state change and a heartbeat per idle
//! tick. Sinks render synchronously and cannot fail.

/// Receiver of rendered intersection lines.
pub trait RenderSink {
    /// Emit one line describing both signals.
    fn render_line(&mut self, line: &str);

    /// Called for every tick that did not change any signal.
    fn idle_tick(&mut self) {}
}

impl<R: RenderSink + ?Sized> RenderSink for Box<R> {
    fn render_line(&mut self, line: &str) {
        (**self).render_line(line);
    }

    fn idle_tick(&mut self) {
        (**self).idle_tick();
    }
}

/// Writes lines to standard output and a `.` per idle tick.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl RenderSink for ConsoleSink {
    fn render_line(&mut self, line: &str) {
        println!("{line}");
    }

    fn idle_tick(&mut self) {
        println!(".");
    }
}

/// Keeps everything it is given, for inspection.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Vec<String>,
    idle_ticks: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn last_line(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    pub fn idle_ticks(&self) -> usize {
        self.idle_ticks
    }
}

impl RenderSink for MemorySink {
    fn render_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn idle_tick(&mut self) {
        self.idle_ticks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_records_in_order() {
        let mut sink = MemorySink::new();
        sink.render_line("first");
        sink.idle_tick();
        sink.render_line("second");

        assert_eq!(sink.lines(), ["first", "second"]);
        assert_eq!(sink.last_line(), Some("second"));
        assert_eq!(sink.idle_ticks(), 1);
    }

    #[test]
    fn boxed_sink_forwards() {
        let mut sink: Box<MemorySink> = Box::new(MemorySink::new());
        RenderSink::render_line(&mut sink, "line");
        RenderSink::idle_tick(&mut sink);
        assert_eq!(sink.lines().len(), 1);
        assert_eq!(sink.idle_ticks(), 1);
    }
}
