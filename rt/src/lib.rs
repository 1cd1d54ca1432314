//! Exception dispatch for the Kestrel virtual machine.
//!
//! When the interpreter detects a fault it raises one of the exceptions in
//! `catalog` using `raise_runtime_exception`, and the `athrow` instruction
//! raises an exception object using `raise`. Either way the exception is
//! dispatched to the nearest handler on the thread's call stack, or the
//! program terminates when there is no such handler.
#![allow(clippy::new_without_default)]

mod catalog;
mod catch_table;
mod class;
mod config;
mod diagnostic;
mod error;
mod exception;
mod mem;
mod method;
mod runtime;
mod thread;
mod unwind;

#[cfg(test)]
pub mod test;

pub use crate::catalog::{LookupMode, RuntimeException};
pub use crate::catch_table::{CatchEntry, CatchTable, CatchType};
pub use crate::class::{Class, ClassId, ClassRef, ClassTable, Constant};
pub use crate::config::Config;
pub use crate::diagnostic::{message_for, text_of};
pub use crate::error::{Fatal, FATAL_STATUS};
pub use crate::exception::{
    construct, construct_and_unwind, raise, raise_runtime_exception,
    runtime_exception_named, terminate, throw, Construction,
};
pub use crate::mem::{Heap, Object, ObjectRef, Value};
pub use crate::method::{Code, LineEntry, LineTable, Method, DEFAULT_LINE};
pub use crate::runtime::{
    Allocator, ClassLoader, Completion, Invoker, Resolution, Runtime,
};
pub use crate::thread::{Frame, Thread};
pub use crate::unwind::{unwind, CatchMatching, Handler};
