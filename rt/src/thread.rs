//! Guest threads and their call frames.
use crate::class::ClassId;
use crate::method::Method;
use std::sync::Arc;

/// A method that is being executed.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The offset of the instruction being executed.
    pub pc: u16,
    pub method: Arc<Method>,
}

impl Frame {
    pub fn new(method: Arc<Method>) -> Frame {
        Frame { pc: 0, method }
    }

    pub fn at(method: Arc<Method>, pc: u16) -> Frame {
        Frame { pc, method }
    }

    /// Returns the source line of the current instruction.
    pub fn line(&self) -> u16 {
        self.method.code.lines.line_for(self.pc)
    }
}

/// A guest thread.
///
/// A Thread isn't bound to a particular OS thread, but it's only ever used by
/// one OS thread at a time: every operation that needs the current thread
/// takes it as an argument.
#[derive(Debug)]
pub struct Thread {
    pub name: String,

    /// The class whose entry method started this thread.
    pub class: ClassId,

    /// The call stack, the last frame is the current frame.
    frames: Vec<Frame>,

    /// The number of exceptions currently being constructed by the runtime on
    /// this thread.
    pub(crate) construction_depth: u16,
}

impl Thread {
    pub fn new(name: String, class: ClassId) -> Thread {
        Thread { name, class, frames: Vec::new(), construction_depth: 0 }
    }

    pub fn push_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Discards the current frame, making its caller the current frame.
    ///
    /// The return value is `true` if the stack is empty afterwards.
    pub fn pop_frame(&mut self) -> bool {
        self.frames.pop();
        self.frames.is_empty()
    }

    pub fn current_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn current_frame_mut(&mut self) -> Option<&mut Frame> {
        self.frames.last_mut()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns the frames from the current frame to the first frame.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter().rev()
    }
}
