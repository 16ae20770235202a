pub mod error;
pub mod field;
pub mod kind;
pub mod registry;
pub mod source;
pub mod startup;

// Re-export main types
pub use error::{format_parse_errors, ConversionFailure, InvalidValue, ParseError, UnknownKind};
pub use field::Setting;
pub use kind::{EnvValue, Kind};
pub use registry::{ItemInfo, Registry, HELP_HEADING};
pub use source::{ProcessEnv, Source};
pub use startup::help_requested;
