//! Locations inside a raw value, rendered as RFC 6901 JSON pointers.
//!
//! Every data error carries the pointer of the value it failed on, so a
//! caller holding the raw input can find the offending member.

/// Escapes one pointer token component.
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Formats unescaped path components into a pointer. The root is `""`.
pub fn format_pointer(path: &[String]) -> String {
    let mut out = String::new();
    for component in path {
        out.push('/');
        out.push_str(&escape_component(component));
    }
    out
}

/// The stack of keys and indices leading to the value being converted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_key(&mut self, key: impl Into<String>) {
        self.segments.push(key.into());
    }

    pub fn push_index(&mut self, index: usize) {
        self.segments.push(index.to_string());
    }

    pub fn pop(&mut self) {
        self.segments.pop();
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn pointer(&self) -> String {
        format_pointer(&self.segments)
    }
}
