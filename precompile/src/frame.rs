// SPDX-FileCopyrightText: 2025 Nomadic Labs <contact@nomadic-labs.com>
//
// SPDX-License-Identifier: MIT

//! Call frames of the precompile.
//!
//! Exactly one frame is current at a time. Entering a call opens a child
//! context of the current frame memory and hands out a [FrameGuard];
//! dropping the guard frees the child context, whatever the way the call
//! ended.

use std::ops::{Deref, DerefMut};

use revm::interpreter::SharedMemory;

#[derive(Debug)]
pub struct CallFrame {
    /// Memory of the frame, a context of the buffer shared with its parents.
    pub memory: SharedMemory,
}

/// Stack of the frames entered by precompile calls.
#[derive(Debug)]
pub struct CallFrames {
    root: CallFrame,
    stack: Vec<CallFrame>,
}

impl Default for CallFrames {
    fn default() -> Self {
        Self::new()
    }
}

impl CallFrames {
    pub fn new() -> Self {
        Self {
            root: CallFrame {
                memory: SharedMemory::new(),
            },
            stack: Vec::new(),
        }
    }

    /// Number of frames entered on top of the root one.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn current(&self) -> &CallFrame {
        self.stack.last().unwrap_or(&self.root)
    }

    fn current_mut(&mut self) -> &mut CallFrame {
        match self.stack.last_mut() {
            Some(frame) => frame,
            None => &mut self.root,
        }
    }

    pub fn enter(&mut self) -> FrameGuard<'_> {
        let memory = self.current_mut().memory.new_child_context();
        self.stack.push(CallFrame { memory });
        FrameGuard { frames: self }
    }
}

/// The frame of an ongoing call. The parent frame becomes current again
/// when the guard is dropped.
pub struct FrameGuard<'a> {
    frames: &'a mut CallFrames,
}

impl Deref for FrameGuard<'_> {
    type Target = CallFrame;

    fn deref(&self) -> &CallFrame {
        self.frames.current()
    }
}

impl DerefMut for FrameGuard<'_> {
    fn deref_mut(&mut self) -> &mut CallFrame {
        self.frames.current_mut()
    }
}

impl Drop for FrameGuard<'_> {
    fn drop(&mut self) {
        self.frames.stack.pop();
        self.frames.current_mut().memory.free_child_context();
    }
}
