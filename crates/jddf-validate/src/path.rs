//! # Path Tracker — Instance and Schema Path Bookkeeping
//!
//! The engine threads two stacks through its walk: instance-path tokens
//! (one per array-index or object-key descent) and schema-path *frames*.
//! Schema tokens push and pop on the live frame; entering a `ref` pushes a
//! whole new frame rooted at the referenced definition, so an error found
//! inside a definition reports a path relative to that definition.
//!
//! Error snapshots copy the instance stack and the live frame only; the
//! frame count drives the `ref` depth breaker.

/// The two path stacks, owned by one validation call.
#[derive(Debug)]
pub(crate) struct PathTracker {
    instance_tokens: Vec<String>,
    schema_frames: Vec<Vec<String>>,
}

impl PathTracker {
    /// A tracker positioned at the roots of both instance and schema.
    pub fn new() -> Self {
        Self {
            instance_tokens: Vec::new(),
            schema_frames: vec![Vec::new()],
        }
    }

    pub fn push_instance_token(&mut self, token: String) {
        self.instance_tokens.push(token);
    }

    pub fn pop_instance_token(&mut self) {
        self.instance_tokens.pop();
    }

    pub fn push_schema_token(&mut self, token: &str) {
        if let Some(frame) = self.schema_frames.last_mut() {
            frame.push(token.to_string());
        }
    }

    pub fn pop_schema_token(&mut self) {
        if let Some(frame) = self.schema_frames.last_mut() {
            frame.pop();
        }
    }

    /// Enter a `ref`: a new frame rooted at the referenced definition.
    pub fn push_frame(&mut self, definition: &str) {
        self.schema_frames
            .push(vec!["definitions".to_string(), definition.to_string()]);
    }

    /// Leave a `ref`. The root frame is never popped.
    pub fn pop_frame(&mut self) {
        if self.schema_frames.len() > 1 {
            self.schema_frames.pop();
        }
    }

    /// Number of live frames, the root frame included.
    pub fn frames(&self) -> usize {
        self.schema_frames.len()
    }

    /// Owned snapshots of the instance path and the live frame.
    pub fn capture(&self) -> (Vec<String>, Vec<String>) {
        (
            self.instance_tokens.clone(),
            self.schema_frames.last().cloned().unwrap_or_default(),
        )
    }
}
