//! Font handling and encoding.
//!
//! Reports only use the PDF standard Helvetica faces, so this module is
//! limited to WinAnsi string encoding and advance-width metrics.

pub mod encoding;
pub mod metrics;

pub use encoding::{encode_winansi, unicode_to_winansi};
pub use metrics::StandardFont;
