//! Finding the handler of a thrown exception.
//!
//! Unwinding starts at the current frame of a thread. If the frame's catch
//! table has an entry that covers the current instruction and catches the
//! exception, the frame jumps to the entry's handler. If not, the frame is
//! popped and its caller is searched, until no frames remain.
use crate::catch_table::CatchType;
use crate::class::ClassId;
use crate::diagnostic::message_for;
use crate::error::Fatal;
use crate::mem::ObjectRef;
use crate::method::Method;
use crate::runtime::{Resolution, Runtime};
use crate::thread::Thread;
use log::{debug, trace, warn};

/// How the class of a thrown exception is compared to the class a catch
/// entry catches.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CatchMatching {
    /// The classes must be the same class.
    ///
    /// A handler for a superclass doesn't catch instances of its subclasses,
    /// so catching e.g. `java/lang/Exception` only catches exceptions created
    /// from exactly that class.
    Exact,

    /// The exception's class must be the catch class or one of its
    /// subclasses.
    Subclass,
}

impl CatchMatching {
    pub(crate) fn parse(value: &str) -> Option<CatchMatching> {
        match value {
            "exact" => Some(CatchMatching::Exact),
            "subclass" => Some(CatchMatching::Subclass),
            _ => None,
        }
    }
}

/// The handler an exception was dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handler {
    /// The offset of the handler's first instruction.
    pub pc: u16,

    /// The number of frames popped before finding the handler.
    pub popped: usize,
}

/// Dispatches a thrown exception to the nearest handler.
///
/// Upon finding a handler the current frame of `thread` is set to the handler
/// and a `Handler` is returned. If no frame handles the exception, all frames
/// are popped and a `Fatal::Uncaught` is returned containing the message to
/// display.
///
/// Resolving a catch type may throw an exception of its own. If that
/// exception is caught by a frame below the one being searched, it replaces
/// the exception being dispatched and its handler is returned.
pub fn unwind<R: Runtime + ?Sized>(
    runtime: &mut R,
    thread: &mut Thread,
    throwable: ObjectRef,
) -> Result<Handler, Fatal> {
    // The message refers to the frame the exception is thrown from, which is
    // gone by the time we know nothing handles the exception.
    let diagnostic =
        message_for(runtime.classes(), runtime.heap(), thread, throwable);
    let class = runtime.heap().get(throwable).class();
    let mut popped = 0;

    loop {
        let (method, pc) = match thread.current_frame() {
            Some(frame) => (frame.method.clone(), frame.pc),
            None => return Err(Fatal::Uncaught { diagnostic }),
        };

        match find_handler(runtime, thread, &method, pc, class)? {
            Search::Found(handler) => {
                if let Some(frame) = thread.current_frame_mut() {
                    frame.pc = handler;
                }

                debug!(
                    "thread '{}' caught {} in {} at {}, jumping to {} \
                    ({} popped)",
                    thread.name,
                    class.name(runtime.classes()),
                    method.name,
                    pc,
                    handler,
                    popped
                );

                return Ok(Handler { pc: handler, popped });
            }
            Search::Unwound(handler) => {
                debug!(
                    "thread '{}' dropped {} in {} at {}, replaced by an \
                    exception caught at {}",
                    thread.name,
                    class.name(runtime.classes()),
                    method.name,
                    pc,
                    handler.pc
                );

                return Ok(Handler {
                    pc: handler.pc,
                    popped: popped + handler.popped,
                });
            }
            Search::NotFound => {}
        }

        trace!(
            "thread '{}' popping frame of {} at {}, no handler for {}",
            thread.name,
            method.name,
            pc,
            class.name(runtime.classes())
        );

        thread.pop_frame();
        popped += 1;
    }
}

/// The result of searching a single frame for a handler.
enum Search {
    /// The frame handles the exception at the given offset.
    Found(u16),

    /// The frame doesn't handle the exception.
    NotFound,

    /// Resolving a catch type threw an exception that unwound past the frame.
    Unwound(Handler),
}

/// Searches the catch table of `method` for the first entry that catches an
/// instance of `class` thrown at `pc`.
fn find_handler<R: Runtime + ?Sized>(
    runtime: &mut R,
    thread: &mut Thread,
    method: &Method,
    pc: u16,
    class: ClassId,
) -> Result<Search, Fatal> {
    for entry in method.code.catch_table.covering(pc) {
        let reference = match entry.catch_type {
            CatchType::Any => return Ok(Search::Found(entry.handler_pc)),
            CatchType::Class(reference) => reference,
        };

        match runtime.resolve_symbolic(thread, reference, method.owner)? {
            Resolution::Loaded(target) if catches(runtime, target, class) => {
                return Ok(Search::Found(entry.handler_pc));
            }
            Resolution::Loaded(_) => {}
            Resolution::Missing => {
                warn!(
                    "the catch type #{} of {}.{} can't be resolved",
                    reference.index(),
                    method.owner.name(runtime.classes()),
                    method.name
                );
            }
            Resolution::Unwound(handler) => {
                return Ok(Search::Unwound(handler));
            }
        }
    }

    Ok(Search::NotFound)
}

fn catches<R: Runtime + ?Sized>(
    runtime: &R,
    target: ClassId,
    class: ClassId,
) -> bool {
    match runtime.config().catch_matching {
        CatchMatching::Exact => target == class,
        CatchMatching::Subclass => {
            class.is_subclass_of(runtime.classes(), target)
        }
    }
}
