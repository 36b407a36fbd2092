use std::sync::{Arc, RwLock};

/// Sink for lines written by the `print` builtin.
pub trait OutputIO {
    fn write_line(&self, line: &str);
}

#[derive(Debug, Clone, Copy)]
pub struct StdoutOutputIO;

impl OutputIO for StdoutOutputIO {
    fn write_line(&self, line: &str) {
        println!("{line}");
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NullOutputIO;

impl OutputIO for NullOutputIO {
    fn write_line(&self, _line: &str) {}
}

#[derive(Debug, Default, Clone)]
pub struct VectorOutputIO {
    pub lines: Arc<RwLock<Vec<String>>>
}

impl VectorOutputIO {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<String> {
        let mut lines = self.lines.write().expect("Vector lock poisoned");
        std::mem::take(&mut *lines)
    }
}

impl OutputIO for VectorOutputIO {
    fn write_line(&self, line: &str) {
        self.lines
            .write()
            .expect("Vector lock poisoned")
            .push(line.to_string());
    }
}
