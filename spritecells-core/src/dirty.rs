//! Redraw gate
//!
//! A single dirty bit: input handling sets it, the render loop checks and
//! clears it once per frame and skips drawing a scene nobody touched.

/// Scene-modified flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifiedFlag {
    modified: bool,
}

impl Default for ModifiedFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl ModifiedFlag {
    /// New flag, initially set so the first frame is drawn
    pub fn new() -> Self {
        Self { modified: true }
    }

    pub fn set(&mut self) {
        self.modified = true;
    }

    pub fn clear(&mut self) {
        self.modified = false;
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Check-and-clear, once per frame
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.modified)
    }
}
