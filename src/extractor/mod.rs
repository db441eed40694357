//! Structured text extraction.
//!
//! # Module Structure
//!
//! - `tags`: Tag catalogs and block/inline classification
//! - `buffer`: Output buffer with newline/spacing primitives
//! - `state`: Image numbering and the descent guard
//! - `table`: Table grid harvesting and serialization
//! - `structured`: The recursive serializer
//!
//! # Usage
//!
//! ```rust
//! use rs_maintext::dom;
//! use rs_maintext::extractor::{DescentGuard, ImageCounter, StructuredExtractor, TextBuffer};
//! use rs_maintext::TableFormat;
//!
//! let doc = dom::parse("<article><h1>Title</h1><p>Body text.</p></article>");
//! let mut images = ImageCounter::new();
//! let mut buf = TextBuffer::new();
//!
//! let mut extractor = StructuredExtractor::new(TableFormat::Markdown)
//!     .with_images(&mut images)
//!     .with_guard(DescentGuard::new(64));
//! extractor.extract(&doc.select("article"), &mut buf);
//!
//! assert!(extractor.interruption().is_none());
//! assert_eq!(buf.as_str(), "Title\nBody text.\n");
//! ```

pub mod buffer;
pub mod state;
pub mod structured;
pub mod table;
pub mod tags;

pub use buffer::TextBuffer;
pub use state::{DescentGuard, ImageCounter, Interruption};
pub use structured::{extract_text, StructuredExtractor};
pub use table::serialize_table;
