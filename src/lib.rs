//! Voice command extraction for form-driven interfaces
//!
//! Takes a transcript like "fill first with my surname is apple" and turns
//! it into a typed command (action, slot, connective, payload) that an
//! application dispatches to a handler. The extractor is a single pure pass
//! over the tokens; everything around it (the speech-to-text client, the
//! dispatch table) is plumbing.
//!
//! ```
//! use sayform::command::{CommandExtractor, KeywordRegistry};
//!
//! let registry = KeywordRegistry::builder().slot_names(["surname"]).build();
//! let extractor = CommandExtractor::new(registry);
//!
//! let cmd = extractor.extract("fill surname with apple").unwrap();
//! assert_eq!(cmd.action, "fill");
//! assert_eq!(cmd.slot, "surname");
//! assert_eq!(cmd.payload.as_deref(), Some("apple"));
//! ```

pub mod command;
pub mod config;
pub mod dispatch;
pub mod recognize;
