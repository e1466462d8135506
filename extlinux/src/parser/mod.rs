//! extlinux.conf parser
//!
//! Raw bytes -> [`Cursor`] -> [`Tokenizer`] -> directive dispatch into a
//! [`RawLabel`]. Nothing is validated here beyond line syntax.

pub mod cursor;
pub mod tokenizer;

pub use cursor::Cursor;
pub use tokenizer::{Directive, MalformedReason, Termination, Tokenizer};

use crate::domain::label::RawLabel;

/// Extract the default (and only) label from an extlinux.conf buffer.
///
/// Unknown directives are consumed and ignored. Repeated directives
/// overwrite earlier ones. The returned label borrows `data`.
pub fn parse_conf(data: &[u8]) -> RawLabel<'_> {
    let mut label = RawLabel::default();

    for directive in Tokenizer::new(data) {
        match label.apply(&directive).keyword() {
            Some(keyword) => log::debug!("(cmd) {} \t-> {}", keyword, directive.value),
            None => log::debug!(
                "extlinux: ignoring unknown command '{}' on line {}",
                directive.command,
                directive.line
            ),
        }
    }

    label
}
