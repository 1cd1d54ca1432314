use crate::catalog::LookupMode;
use crate::unwind::CatchMatching;
use std::env::var;

/// Sets a numeric configuration field based on an environment variable.
macro_rules! set_from_env {
    ($config:expr, $field:ident, $key:expr, $value_type:ty) => {{
        if let Ok(raw_value) = var(concat!("KESTREL_", $key)) {
            if let Ok(value) = raw_value.parse::<$value_type>() {
                if value > 0 {
                    $config.$field = value;
                }
            }
        };
    }};
}

/// Sets a configuration field using a parsing function, ignoring values the
/// function doesn't recognise.
macro_rules! set_parsed_from_env {
    ($config:expr, $field:ident, $key:expr, $parse:expr) => {{
        if let Ok(raw_value) = var(concat!("KESTREL_", $key)) {
            if let Some(value) = $parse(raw_value.trim()) {
                $config.$field = value;
            }
        };
    }};
}

/// The default number of exceptions the runtime may be constructing at once
/// on a single thread.
///
/// Constructing an exception runs its constructor, which may in turn raise a
/// runtime exception. This limit ensures a constructor that always raises
/// terminates the program, instead of overflowing the stack.
const DEFAULT_MAX_CONSTRUCTION_DEPTH: u16 = 16;

/// The maximum value allowed for the construction depth.
const MAX_CONSTRUCTION_DEPTH: u16 = 256;

/// Structure containing the configuration settings for exception dispatch.
#[derive(Debug, Clone)]
pub struct Config {
    /// The maximum nesting of runtime exception construction.
    pub max_construction_depth: u16,

    /// How class names are mapped back to runtime exceptions.
    pub catalog_lookup: LookupMode,

    /// How the class of a thrown exception is compared to the catch type of
    /// a handler.
    pub catch_matching: CatchMatching,
}

impl Config {
    pub fn new() -> Config {
        Config {
            max_construction_depth: DEFAULT_MAX_CONSTRUCTION_DEPTH,
            catalog_lookup: LookupMode::Exact,
            catch_matching: CatchMatching::Exact,
        }
    }

    pub fn from_env() -> Config {
        let mut config = Config::new();

        set_from_env!(
            config,
            max_construction_depth,
            "MAX_CONSTRUCTION_DEPTH",
            u16
        );
        set_parsed_from_env!(
            config,
            catalog_lookup,
            "CATALOG_LOOKUP",
            LookupMode::parse
        );
        set_parsed_from_env!(
            config,
            catch_matching,
            "CATCH_MATCHING",
            CatchMatching::parse
        );

        config.verify();
        config
    }

    fn verify(&mut self) {
        if self.max_construction_depth > MAX_CONSTRUCTION_DEPTH {
            self.max_construction_depth = MAX_CONSTRUCTION_DEPTH;
        }
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::new()
    }
}
