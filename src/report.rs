//! Reporter state stack
//!
//! A `Reporter` is the transient accumulator a rendering backend writes
//! into during one traversal: a stack of frames, each owning its buffer and
//! nesting depth. Backends that hoist anonymous nested shapes into separate
//! top-level declarations push a named frame, emit into it, and pop back to
//! the parent; finished frames trail the root in the joined output.
//!
//! Stack misuse is a protocol bug and panics - it is never surfaced as a
//! recoverable error.

/// One active or finished state frame
#[derive(Debug)]
struct Frame {
    name: Option<String>,
    buffer: String,
    depth: usize,
}

/// Per-traversal output accumulator
#[derive(Debug)]
pub struct Reporter {
    active: Vec<Frame>,
    finished: Vec<Frame>,
    indent: String,
}

impl Reporter {
    pub fn new() -> Self {
        Self::with_indent("  ")
    }

    pub fn with_indent(indent: &str) -> Self {
        Self {
            active: vec![Frame {
                name: None,
                buffer: String::new(),
                depth: 0,
            }],
            finished: Vec::new(),
            indent: indent.to_string(),
        }
    }

    fn top(&mut self) -> &mut Frame {
        self.active
            .last_mut()
            .unwrap_or_else(|| panic!("reporter protocol error: no active frame"))
    }

    pub fn write(&mut self, text: &str) {
        self.top().buffer.push_str(text);
    }

    pub fn writeln(&mut self, text: &str) {
        let frame = self.top();
        frame.buffer.push_str(text);
        frame.buffer.push('\n');
    }

    /// Current indentation string for the active frame
    pub fn pad(&self) -> String {
        let depth = self
            .active
            .last()
            .map(|f| f.depth)
            .unwrap_or_else(|| panic!("reporter protocol error: no active frame"));
        self.indent.repeat(depth)
    }

    pub fn depth(&self) -> usize {
        self.active.last().map(|f| f.depth).unwrap_or(0)
    }

    pub fn indent(&mut self) {
        self.top().depth += 1;
    }

    pub fn outdent(&mut self) {
        let frame = self.top();
        if frame.depth == 0 {
            panic!("reporter protocol error: outdent below zero");
        }
        frame.depth -= 1;
    }

    /// Begin a new state frame with its own buffer and depth counter.
    pub fn push_frame(&mut self, name: Option<&str>) {
        self.active.push(Frame {
            name: name.map(str::to_owned),
            buffer: String::new(),
            depth: 0,
        });
    }

    /// Finish the active frame and resume the parent. The finished frame's
    /// output trails the root when the reporter is consumed.
    pub fn pop_frame(&mut self) {
        if self.active.len() <= 1 {
            panic!("reporter protocol error: cannot pop the root frame");
        }
        let frame = self.active.pop().unwrap_or_else(|| {
            panic!("reporter protocol error: no active frame");
        });
        self.finished.push(frame);
    }

    /// Name of the active frame, if it has one
    pub fn frame_name(&self) -> Option<&str> {
        self.active.last().and_then(|f| f.name.as_deref())
    }

    /// Join root output with finished frames, in the order they finished.
    pub fn into_output(mut self) -> String {
        if self.active.len() != 1 {
            panic!(
                "reporter protocol error: {} unfinished frame(s) at end of traversal",
                self.active.len() - 1
            );
        }
        let mut out = self.active.pop().map(|f| f.buffer).unwrap_or_default();
        for frame in self.finished {
            out.push_str(&frame.buffer);
        }
        out
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}
