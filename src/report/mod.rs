//! Decisions report rendering.
//!
//! Turns extracted decision text into a paginated US Letter PDF:
//!
//! ```text
//! text
//!     ↓
//! [wrap_line] (greedy, character-count wrapping)
//!     ↓
//! [layout_report] (baselines and page breaks)
//!     ↓
//! [ReportRenderer] (header, body, footer through the PDF writer)
//!     ↓
//! PDF bytes
//! ```

mod clock;
mod layout;
mod renderer;
mod wrap;

pub use clock::{format_timestamp, Clock, FixedClock, SystemClock};
pub use layout::{layout_report, PageCursor, PageLayout, PlacedLine, ReportLayout};
pub use renderer::{RenderedReport, ReportRenderer, DEFAULT_FOOTER, DEFAULT_TITLE};
pub use wrap::wrap_line;

/// Suggested file name when the report is offered for download.
pub const REPORT_FILE_NAME: &str = "Meeting-Decisions.pdf";

/// Media type of the rendered report.
pub const REPORT_MIME_TYPE: &str = "application/pdf";
