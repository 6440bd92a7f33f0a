//! PDF writing module for generating report files.
//!
//! ## Architecture
//!
//! ```text
//! report layout (pages of placed lines)
//!     ↓
//! [PdfWriter] / [PageBuilder] (pages, font resources)
//!     ↓
//! [ContentStreamBuilder] (text and path operators per page)
//!     ↓
//! [ObjectSerializer] (serializes PDF objects)
//!     ↓
//! PDF bytes
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use meeting_decisions::fonts::StandardFont;
//! use meeting_decisions::writer::{PdfWriter, LETTER};
//!
//! let mut writer = PdfWriter::new();
//! writer
//!     .add_page(LETTER.0, LETTER.1)
//!     .add_text("Hello, World!", 72.0, 720.0, StandardFont::Helvetica, 12.0)
//!     .draw_line(72.0, 710.0, 540.0, 710.0, 1.0);
//! let bytes = writer.finish()?;
//! ```

mod content_stream;
mod object_serializer;
mod pdf_writer;

pub use content_stream::{ContentStreamBuilder, ContentStreamOp};
pub use object_serializer::ObjectSerializer;
pub use pdf_writer::{PageBuilder, PdfWriter, PdfWriterConfig, LETTER};
