//! The parts of the virtual machine that exception dispatch depends on.
//!
//! Loading classes, allocating objects and running methods are implemented
//! elsewhere in the virtual machine. Dispatch only needs a small part of
//! these components, described by the traits in this module.
use crate::class::{ClassId, ClassRef, ClassTable};
use crate::config::Config;
use crate::error::Fatal;
use crate::mem::{Heap, ObjectRef};
use crate::thread::Thread;
use crate::unwind::Handler;

/// The outcome of resolving a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The class is loaded.
    Loaded(ClassId),

    /// The class doesn't exist or failed to load.
    Missing,

    /// Loading the class ran guest code that threw an exception, and the
    /// exception was dispatched to a handler in a frame that existed before
    /// loading started. Frames may have been popped, so the caller must stop
    /// whatever it was doing with the thread's frames.
    Unwound(Handler),
}

pub trait ClassLoader {
    /// Returns the registry of loaded classes.
    fn classes(&self) -> &ClassTable;

    /// Returns the class with the given name, loading it if necessary.
    ///
    /// Loading a class may run guest code on `thread`, such as a static
    /// initializer. Exceptions thrown by such code are dispatched before this
    /// method returns. If such an exception isn't caught at all, the
    /// resulting `Fatal` error is returned.
    fn resolve_or_load(
        &mut self,
        thread: &mut Thread,
        name: &str,
    ) -> Result<Resolution, Fatal>;

    /// Resolves a symbolic class reference found in the constant pool of the
    /// `context` class.
    fn resolve_symbolic(
        &mut self,
        thread: &mut Thread,
        reference: ClassRef,
        context: ClassId,
    ) -> Result<Resolution, Fatal> {
        let name = match self.classes().get(context).class_name_at(reference) {
            Some(name) => name.to_string(),
            None => return Ok(Resolution::Missing),
        };

        self.resolve_or_load(thread, &name)
    }
}

pub trait Allocator {
    fn heap(&self) -> &Heap;

    /// Allocates a new instance of a class, with all fields set to null.
    fn allocate(&mut self, class: ClassId) -> ObjectRef;
}

/// The outcome of running a method to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The method returned normally.
    Returned,

    /// An exception escaped the method, and was dispatched to a handler in one
    /// of the method's callers.
    Unwound(Handler),
}

pub trait Invoker {
    /// Runs the no-argument constructor of the object's class.
    ///
    /// The constructor runs on `thread` and may raise exceptions of its own,
    /// which are dispatched before this method returns. If such an exception
    /// isn't caught at all, the resulting `Fatal` error is returned.
    fn invoke_default_constructor(
        &mut self,
        thread: &mut Thread,
        object: ObjectRef,
    ) -> Result<Completion, Fatal>;
}

/// The virtual machine as seen by exception dispatch.
pub trait Runtime: ClassLoader + Allocator + Invoker {
    fn config(&self) -> &Config;
}
