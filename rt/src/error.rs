//! Errors that terminate the program.
//!
//! Exceptions thrown by guest code are never represented as Rust errors:
//! they either redirect the current frame to a handler, or end up as a `Fatal`
//! error when no handler exists.
use thiserror::Error;

/// The exit status used when the program is terminated by a fatal error.
pub const FATAL_STATUS: i32 = libc::EXIT_FAILURE;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Fatal {
    /// The class of a runtime exception couldn't be resolved, so there's no
    /// exception to throw.
    #[error("could not resolve the class {name} of a runtime exception")]
    Bootstrap { name: String },

    /// A thrown exception reached the bottom of the stack.
    #[error("{diagnostic}")]
    Uncaught { diagnostic: String },

    /// Constructing a runtime exception kept raising new runtime exceptions.
    #[error(
        "exception raised while constructing exception {name}: more than {limit} nested constructions"
    )]
    ConstructionDepth { name: String, limit: u16 },
}

impl Fatal {
    pub fn status(&self) -> i32 {
        FATAL_STATUS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let bootstrap =
            Fatal::Bootstrap { name: "java/lang/Missing".to_string() };
        let uncaught = Fatal::Uncaught { diagnostic: "oops".to_string() };
        let depth = Fatal::ConstructionDepth {
            name: "java/lang/NullPointerException".to_string(),
            limit: 4,
        };

        assert_eq!(
            bootstrap.to_string(),
            "could not resolve the class java/lang/Missing of a runtime exception"
        );
        assert_eq!(uncaught.to_string(), "oops");
        assert_eq!(
            depth.to_string(),
            "exception raised while constructing exception \
            java/lang/NullPointerException: more than 4 nested constructions"
        );
    }

    #[test]
    fn test_status() {
        let fatal = Fatal::Uncaught { diagnostic: String::new() };

        assert_ne!(fatal.status(), 0);
        assert_eq!(fatal.status(), FATAL_STATUS);
    }
}
