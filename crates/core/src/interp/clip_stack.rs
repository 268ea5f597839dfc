//! Clip path stack mirroring PostScript's gsave/save nesting.
//!
//! Every `gsave` and `save` pushes a frame that refers to the clip path in
//! effect; `grestore` and `restore` pop them again. Frames pushed by `save`
//! carry the save id so a `restore` can discard any unbalanced `gsave`
//! frames above it. Clip paths are stored once and addressed by a 1-based
//! id that also names the `<clipPath>` definition in the output.

use crate::path::GraphicsPath;

/// Save id of frames pushed by `gsave`.
pub const UNMARKED: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    /// Id of the clip path, 0 if no clip is in effect
    path_id: usize,
    /// Id of the `save` that pushed this frame, or UNMARKED
    save_id: i32,
    /// Clip path was loaded into the current path by `clippath`
    clippath_loaded: bool,
}

impl Entry {
    const fn new(path_id: usize, save_id: i32) -> Self {
        Self {
            path_id,
            save_id,
            clippath_loaded: false,
        }
    }
}

/// Stack of clip path references keyed by save markers.
#[derive(Debug, Clone, Default)]
pub struct ClippingStack {
    paths: Vec<GraphicsPath>,
    stack: Vec<Entry>,
}

impl ClippingStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a frame without clip path. Does nothing on an empty stack
    /// since no clip is in effect there anyway.
    pub fn push_empty_path(&mut self) {
        if !self.stack.is_empty() {
            self.stack.push(Entry::new(0, UNMARKED));
        }
    }

    /// Registers `path` and pushes a frame referring to it. An empty path
    /// pushes a frame without clip path.
    pub fn push(&mut self, path: &GraphicsPath, save_id: i32) {
        let path_id = self.register(path);
        self.stack.push(Entry::new(path_id, save_id));
    }

    /// Pushes a copy of the top frame tagged with `save_id`.
    pub fn dup(&mut self, save_id: i32) {
        let mut entry = self
            .stack
            .last()
            .copied()
            .unwrap_or(Entry::new(0, UNMARKED));
        entry.save_id = save_id;
        self.stack.push(entry);
    }

    /// Pops frames for `grestore`, `grestoreall` and `restore`.
    ///
    /// - `save_id < 0`: pops the top frame if it was pushed by `gsave`; with
    ///   `grestoreall` keeps popping while the top frame is unmarked.
    /// - `save_id >= 0`: pops all frames up to and including the one pushed
    ///   by the matching `save`.
    pub fn pop(&mut self, save_id: i32, grestoreall: bool) {
        if save_id < 0 {
            if self.stack.last().is_some_and(|e| e.save_id < 0) {
                self.stack.pop();
            }
            while grestoreall && self.stack.last().is_some_and(|e| e.save_id < 0) {
                self.stack.pop();
            }
        } else {
            while self.stack.last().is_some_and(|e| e.save_id != save_id) {
                self.stack.pop();
            }
            self.stack.pop();
        }
    }

    /// Registers `path` and makes it the clip path of the top frame. The
    /// frame's save marker is kept.
    pub fn replace(&mut self, path: &GraphicsPath) {
        if self.stack.is_empty() {
            self.push(path, UNMARKED);
        } else {
            let path_id = self.register(path);
            if let Some(top) = self.stack.last_mut() {
                top.path_id = path_id;
            }
        }
    }

    /// Makes an empty clip region the clip path of the top frame. Unlike
    /// an empty path passed to `replace`, the region gets an id of its own
    /// and clips away everything drawn while it is in effect.
    pub fn replace_empty_region(&mut self) {
        self.paths.push(GraphicsPath::new());
        let path_id = self.paths.len();
        match self.stack.last_mut() {
            Some(top) => top.path_id = path_id,
            None => self.stack.push(Entry::new(path_id, UNMARKED)),
        }
    }

    /// Clip path currently in effect.
    pub fn top(&self) -> Option<&GraphicsPath> {
        self.path(self.top_id())
    }

    /// Id of the clip path currently in effect, 0 if none.
    pub fn top_id(&self) -> usize {
        self.stack.last().map_or(0, |e| e.path_id)
    }

    /// Clip path with the given id.
    pub fn path(&self, id: usize) -> Option<&GraphicsPath> {
        id.checked_sub(1).and_then(|i| self.paths.get(i))
    }

    /// True if `clippath` loaded the clip path into the current path.
    pub fn clippath_loaded(&self) -> bool {
        self.stack.last().is_some_and(|e| e.clippath_loaded)
    }

    pub fn set_clippath_loaded(&mut self, loaded: bool) {
        if let Some(top) = self.stack.last_mut() {
            top.clippath_loaded = loaded;
        }
    }

    /// Drops all frames and registered paths.
    pub fn clear(&mut self) {
        self.paths.clear();
        self.stack.clear();
    }

    /// Number of frames on the stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    fn register(&mut self, path: &GraphicsPath) -> usize {
        if path.is_empty() {
            0
        } else {
            self.paths.push(path.clone());
            self.paths.len()
        }
    }
}
