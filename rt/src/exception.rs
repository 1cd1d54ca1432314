//! Raising exceptions.
//!
//! These functions are the entry points used by the interpreter: upon
//! returning the current frame of the thread points to the handler of the
//! exception. If there's no handler the program is terminated, so callers
//! don't need to handle the absence of a handler.
use crate::catalog::RuntimeException;
use crate::error::Fatal;
use crate::mem::ObjectRef;
use crate::runtime::{Completion, Resolution, Runtime};
use crate::thread::Thread;
use crate::unwind::{unwind, Handler};
use log::{debug, error};
use std::process::exit;

/// The result of constructing a runtime exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construction {
    /// The exception is constructed and can be thrown.
    Finished(ObjectRef),

    /// The constructor, or the initializer of the exception's class, threw an
    /// exception that was caught outside of it, replacing the exception being
    /// constructed.
    Unwound(Handler),
}

/// Creates a new instance of a runtime exception.
///
/// The exception's class is loaded if necessary, and its constructor is run
/// on `thread`. The constructor may itself raise and dispatch exceptions.
pub fn construct<R: Runtime + ?Sized>(
    runtime: &mut R,
    thread: &mut Thread,
    kind: RuntimeException,
) -> Result<Construction, Fatal> {
    let name = kind.name();
    let limit = runtime.config().max_construction_depth;

    if thread.construction_depth >= limit {
        return Err(Fatal::ConstructionDepth { name: name.to_string(), limit });
    }

    let class = match runtime.resolve_or_load(thread, name)? {
        Resolution::Loaded(class) => class,
        Resolution::Missing => {
            return Err(Fatal::Bootstrap { name: name.to_string() });
        }
        Resolution::Unwound(handler) => {
            return Ok(Construction::Unwound(handler));
        }
    };
    let object = runtime.allocate(class);

    debug!(
        "thread '{}' constructing {} (depth {})",
        thread.name, name, thread.construction_depth
    );

    thread.construction_depth += 1;

    let result = runtime.invoke_default_constructor(thread, object);

    thread.construction_depth -= 1;

    Ok(match result? {
        Completion::Returned => Construction::Finished(object),
        Completion::Unwound(handler) => Construction::Unwound(handler),
    })
}

/// Creates a runtime exception and dispatches it to its handler.
pub fn construct_and_unwind<R: Runtime + ?Sized>(
    runtime: &mut R,
    thread: &mut Thread,
    kind: RuntimeException,
) -> Result<Handler, Fatal> {
    match construct(runtime, thread, kind)? {
        Construction::Finished(object) => unwind(runtime, thread, object),
        Construction::Unwound(handler) => Ok(handler),
    }
}

/// Returns the runtime exception with the given class name.
///
/// The name is matched according to the configured `LookupMode`.
pub fn runtime_exception_named<R: Runtime + ?Sized>(
    runtime: &R,
    name: &str,
) -> Option<RuntimeException> {
    RuntimeException::identifier_for(name, runtime.config().catalog_lookup)
        .and_then(RuntimeException::from_identifier)
}

/// Raises a runtime exception, such as a `NullPointerException` produced
/// when dereferencing a null reference.
pub fn raise_runtime_exception<R: Runtime + ?Sized>(
    runtime: &mut R,
    thread: &mut Thread,
    kind: RuntimeException,
) -> Handler {
    match construct_and_unwind(runtime, thread, kind) {
        Ok(handler) => handler,
        Err(fatal) => terminate(&fatal),
    }
}

/// Dispatches an exception thrown by guest code to its handler.
///
/// Throwing a null reference throws a `NullPointerException` instead.
pub fn throw<R: Runtime + ?Sized>(
    runtime: &mut R,
    thread: &mut Thread,
    throwable: Option<ObjectRef>,
) -> Result<Handler, Fatal> {
    match throwable {
        Some(object) => unwind(runtime, thread, object),
        None => {
            construct_and_unwind(runtime, thread, RuntimeException::NullPointer)
        }
    }
}

/// Raises an exception created by guest code, such as by an `athrow`
/// instruction.
pub fn raise<R: Runtime + ?Sized>(
    runtime: &mut R,
    thread: &mut Thread,
    throwable: Option<ObjectRef>,
) -> Handler {
    match throw(runtime, thread, throwable) {
        Ok(handler) => handler,
        Err(fatal) => terminate(&fatal),
    }
}

/// Prints a fatal error and terminates the program.
pub fn terminate(fatal: &Fatal) -> ! {
    error!("terminating with exit status {}", fatal.status());
    eprintln!("{}", fatal);
    exit(fatal.status());
}
