//! # Worksheet Requests
//!
//! The batch pipeline: a [`WorksheetRequest`] names the operator, its
//! difficulty and how many pages of each layout to produce. Every page gets
//! a fresh problem set, rendered twice: once as a worksheet and once as the
//! matching answer key.
//!
//! ## Structure
//!
//! ```text
//! WorksheetRequest
//! └── generate_problem_sets ─→ Vec<ProblemSet>      (one per page)
//!     └── render_problem_sets ─→ Vec<RenderedDocument>
//!         ├── worksheet_grid_1.pdf, worksheet_list_1.pdf, ...
//!         └── answers_grid_1.pdf,   answers_list_1.pdf, ...
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use worksheet_core::problems::Operator;
//! use worksheet_core::worksheet::{generate_documents, WorksheetRequest};
//!
//! let request = WorksheetRequest::new(Operator::Subtraction).with_list_pages(1, 2, 12);
//! let docs = generate_documents(&request, &mut StdRng::seed_from_u64(1)).unwrap();
//! assert_eq!(docs.len(), 4);
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{SheetError, SheetResult};
use crate::layout::{render_page, PageGeometry, PageSpec, PageVariant};
use crate::problems::{generate, DifficultyConfig, Operator, ProblemRecord};
use crate::render::TypstCanvas;

/// Current schema version for request files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Upper bound on pages per layout mode
pub const MAX_PAGES_PER_MODE: u32 = 50;

/// Extension of rendered documents
pub const DOCUMENT_EXTENSION: &str = "pdf";

/// Everything needed to produce a batch of worksheets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorksheetRequest {
    #[serde(default = "default_version")]
    pub version: String,

    pub operator: Operator,

    pub difficulty: DifficultyConfig,

    /// Pages in the fixed 4 × 5 grid layout
    #[serde(default)]
    pub grid_pages: u32,

    /// Pages in the list layout
    #[serde(default)]
    pub list_pages: u32,

    #[serde(default = "default_list_columns")]
    pub list_columns: usize,

    #[serde(default = "default_list_rows")]
    pub list_rows_per_column: usize,

    /// Fixed seed for reproducible batches; fresh entropy when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_version() -> String {
    SCHEMA_VERSION.to_string()
}

fn default_list_columns() -> usize {
    2
}

fn default_list_rows() -> usize {
    12
}

impl WorksheetRequest {
    /// One grid page with default difficulty for `operator`.
    pub fn new(operator: Operator) -> Self {
        WorksheetRequest {
            version: default_version(),
            operator,
            difficulty: DifficultyConfig::default_for(operator),
            grid_pages: 1,
            list_pages: 0,
            list_columns: default_list_columns(),
            list_rows_per_column: default_list_rows(),
            seed: None,
        }
    }

    pub fn with_difficulty(mut self, difficulty: DifficultyConfig) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_grid_pages(mut self, pages: u32) -> Self {
        self.grid_pages = pages;
        self
    }

    pub fn with_list_pages(mut self, pages: u32, columns: usize, rows_per_column: usize) -> Self {
        self.list_pages = pages;
        self.list_columns = columns;
        self.list_rows_per_column = rows_per_column;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn total_pages(&self) -> u32 {
        self.grid_pages.saturating_add(self.list_pages)
    }

    /// The list layout this request uses
    pub fn list_spec(&self) -> PageSpec {
        PageSpec::List {
            columns: self.list_columns,
            rows_per_column: self.list_rows_per_column,
        }
    }

    /// Check page counts, list parameters and difficulty bounds.
    pub fn validate(&self) -> SheetResult<()> {
        for (field, pages) in [("grid_pages", self.grid_pages), ("list_pages", self.list_pages)] {
            if pages > MAX_PAGES_PER_MODE {
                return Err(SheetError::invalid_input(
                    field,
                    pages.to_string(),
                    format!("At most {} pages per layout", MAX_PAGES_PER_MODE),
                ));
            }
        }
        if self.list_pages > 0 {
            self.list_spec().validate()?;
        }
        self.difficulty.check(self.operator)
    }

    /// Multi-line summary of what the request will produce
    pub fn summary(&self) -> String {
        format!(
            "Operation: {}\nDifficulty: {}\nTotal pages: {}\nGrid pages: {}\nList pages: {}",
            self.operator,
            self.difficulty.describe(),
            self.total_pages(),
            self.grid_pages,
            self.list_pages
        )
    }
}

/// Problems generated for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemSet {
    /// 1-based page number within its layout mode
    pub page: u32,
    pub spec: PageSpec,
    pub problems: Vec<ProblemRecord>,
}

/// A finished single-page document.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    pub file_name: String,
    pub variant: PageVariant,
    pub spec: PageSpec,
    pub page: u32,
    pub bytes: Vec<u8>,
}

/// `worksheet_grid_3.pdf`, `answers_list_1.pdf`, ...
pub fn document_name(variant: PageVariant, spec: &PageSpec, page: u32) -> String {
    format!(
        "{}_{}_{}.{}",
        variant.prefix(),
        spec.mode_name(),
        page,
        DOCUMENT_EXTENSION
    )
}

/// Generate a fresh problem set for every requested page, grid pages first.
///
/// A request for zero pages yields an empty list.
pub fn generate_problem_sets<R: Rng + ?Sized>(
    request: &WorksheetRequest,
    rng: &mut R,
) -> SheetResult<Vec<ProblemSet>> {
    request.validate()?;

    let pages = [(PageSpec::Grid, request.grid_pages), (request.list_spec(), request.list_pages)];
    let mut sets = Vec::with_capacity(request.total_pages() as usize);

    for (spec, page_count) in pages {
        for page in 1..=page_count {
            let problems = generate(request.operator, spec.capacity(), &request.difficulty, rng)?;
            sets.push(ProblemSet { page, spec, problems });
        }
    }

    Ok(sets)
}

/// Render worksheet and answer key for each set; all worksheets come first.
pub fn render_problem_sets(sets: &[ProblemSet]) -> SheetResult<Vec<RenderedDocument>> {
    render_problem_sets_with(sets, &PageGeometry::letter())
}

pub fn render_problem_sets_with(sets: &[ProblemSet], geometry: &PageGeometry) -> SheetResult<Vec<RenderedDocument>> {
    let mut worksheets = Vec::with_capacity(sets.len());
    let mut answers = Vec::with_capacity(sets.len());

    for set in sets {
        worksheets.push(render_document(set, PageVariant::Worksheet, geometry)?);
        answers.push(render_document(set, PageVariant::AnswerKey, geometry)?);
    }

    worksheets.extend(answers);
    Ok(worksheets)
}

/// Generate and render everything a request asks for.
pub fn generate_documents<R: Rng + ?Sized>(
    request: &WorksheetRequest,
    rng: &mut R,
) -> SheetResult<Vec<RenderedDocument>> {
    let sets = generate_problem_sets(request, rng)?;
    render_problem_sets(&sets)
}

fn render_document(set: &ProblemSet, variant: PageVariant, geometry: &PageGeometry) -> SheetResult<RenderedDocument> {
    let mut canvas = TypstCanvas::new(geometry);
    render_page(&mut canvas, geometry, &set.spec, variant, &set.problems)?;
    let bytes = canvas.finish()?;

    let file_name = document_name(variant, &set.spec, set.page);
    info!(file = %file_name, bytes = bytes.len(), "rendered document");

    Ok(RenderedDocument {
        file_name,
        variant,
        spec: set.spec,
        page: set.page,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problems::RemainderMode;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_document_names() {
        assert_eq!(document_name(PageVariant::Worksheet, &PageSpec::Grid, 1), "worksheet_grid_1.pdf");
        assert_eq!(
            document_name(PageVariant::AnswerKey, &PageSpec::list(2, 12).unwrap(), 3),
            "answers_list_3.pdf"
        );
    }

    #[test]
    fn test_zero_pages_is_not_an_error() {
        let request = WorksheetRequest::new(Operator::Addition).with_grid_pages(0);
        assert_eq!(request.total_pages(), 0);
        assert!(generate_problem_sets(&request, &mut rng()).unwrap().is_empty());
        assert!(generate_documents(&request, &mut rng()).unwrap().is_empty());
    }

    #[test]
    fn test_problem_sets_per_page() {
        let request = WorksheetRequest::new(Operator::Multiplication)
            .with_grid_pages(2)
            .with_list_pages(3, 3, 15);
        let sets = generate_problem_sets(&request, &mut rng()).unwrap();

        assert_eq!(sets.len(), 5);
        assert!(sets[..2].iter().all(|s| s.spec == PageSpec::Grid && s.problems.len() == 20));
        assert!(sets[2..].iter().all(|s| s.problems.len() == 45));
        assert_eq!(sets.iter().map(|s| s.page).collect::<Vec<_>>(), vec![1, 2, 1, 2, 3]);
        // Each page draws its own problems
        assert_ne!(sets[0].problems, sets[1].problems);
    }

    #[test]
    fn test_list_params_ignored_without_list_pages() {
        let request = WorksheetRequest::new(Operator::Addition).with_list_pages(0, 9, 99);
        assert!(request.validate().is_ok());
        let request = request.with_list_pages(1, 9, 99);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_page_limit() {
        let request = WorksheetRequest::new(Operator::Addition).with_grid_pages(51);
        let err = request.validate().unwrap_err();
        assert!(matches!(err, SheetError::InvalidInput { ref field, .. } if field == "grid_pages"));
    }

    #[test]
    fn test_huge_page_counts_do_not_overflow() {
        let request = WorksheetRequest::new(Operator::Addition)
            .with_grid_pages(u32::MAX)
            .with_list_pages(1, 2, 12);
        assert_eq!(request.total_pages(), u32::MAX);
        assert!(request.summary().contains("Grid pages: 4294967295"));
        let err = request.validate().unwrap_err();
        assert!(matches!(err, SheetError::InvalidInput { ref field, .. } if field == "grid_pages"));
    }

    #[test]
    fn test_mismatched_difficulty_rejected() {
        let request = WorksheetRequest::new(Operator::Addition)
            .with_difficulty(DifficultyConfig::default_for(Operator::Division));
        assert_eq!(request.validate().unwrap_err().error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_request_json_defaults() {
        let request: WorksheetRequest = serde_json::from_str(
            r#"{
                "operator": "division",
                "difficulty": { "operator": "division", "remainder_mode": "mixed" },
                "list_pages": 2
            }"#,
        )
        .unwrap();
        assert_eq!(request.version, SCHEMA_VERSION);
        assert_eq!(request.grid_pages, 0);
        assert_eq!(request.list_columns, 2);
        assert_eq!(request.list_rows_per_column, 12);
        assert_eq!(
            request.difficulty,
            DifficultyConfig::Division {
                max_dividend: 100,
                max_divisor: 10,
                remainder_mode: RemainderMode::Mixed,
            }
        );
    }

    #[test]
    fn test_unknown_operator_in_request_fails() {
        let result = serde_json::from_str::<WorksheetRequest>(
            r#"{ "operator": "modulo", "difficulty": { "operator": "addition" } }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_summary() {
        let summary = WorksheetRequest::new(Operator::Division)
            .with_grid_pages(1)
            .with_list_pages(2, 2, 12)
            .summary();
        assert!(summary.contains("Operation: Division"));
        assert!(summary.contains("Total pages: 3"));
        assert!(summary.contains("List pages: 2"));
    }
}
