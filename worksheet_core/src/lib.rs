//! # worksheet_core - Arithmetic Worksheet Engine
//!
//! `worksheet_core` generates randomized arithmetic practice problems and lays
//! them out as printable US Letter pages: a worksheet and a matching answer
//! key per problem set, in either a fixed 4 × 5 grid or a multi-column list.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: the generator takes its random source as an argument and
//!   the layout engine is pure coordinate arithmetic
//! - **JSON-First**: requests, configs and problem records serialize
//! - **Rich Errors**: structured error types, not just strings
//! - **Surface-agnostic layout**: pages draw through the [`render::Surface`]
//!   trait; [`render::TypstCanvas`] turns them into PDF
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use worksheet_core::problems::{DifficultyConfig, Operator, RemainderMode};
//! use worksheet_core::worksheet::{generate_documents, WorksheetRequest};
//!
//! let request = WorksheetRequest::new(Operator::Division).with_difficulty(DifficultyConfig::Division {
//!     max_dividend: 100,
//!     max_divisor: 10,
//!     remainder_mode: RemainderMode::Mixed,
//! });
//!
//! let docs = generate_documents(&request, &mut StdRng::from_entropy()).unwrap();
//! for doc in &docs {
//!     std::fs::write(&doc.file_name, &doc.bytes).unwrap();
//! }
//! ```
//!
//! ## Modules
//!
//! - [`problems`] - Problem records, difficulty configs and the generator
//! - [`layout`] - Grid and list page layouts, header
//! - [`render`] - Drawing surface trait and the Typst PDF canvas
//! - [`worksheet`] - Requests and the page batch pipeline
//! - [`file_io`] - Request files, problem dumps and document output
//! - [`errors`] - Structured error types

pub mod errors;
pub mod file_io;
pub mod layout;
pub mod problems;
pub mod render;
pub mod worksheet;

// Re-export commonly used types at crate root for convenience
pub use errors::{SheetError, SheetResult};
pub use layout::{render_page, PageGeometry, PageSpec, PageVariant};
pub use problems::{generate, validate, DifficultyConfig, Operator, ProblemRecord, RemainderMode};
pub use worksheet::{generate_documents, RenderedDocument, WorksheetRequest};
