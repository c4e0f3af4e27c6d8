//! # data-science-toolkit
//!
//! Numeric and text analytics for small in-memory datasets.
//!
//! The toolkit has two independent engines sharing one error type:
//!
//! - **Statistics**: ingestion, normalization, descriptive statistics,
//!   confidence intervals, correlation, and smoothing of numeric data
//! - **Text**: cleaning, preprocessing, surface features, keyword ranking,
//!   and set similarity of free text
//!
//! ## Modules
//!
//! - [`table`]: Column-major tabular data model (Table, Column, DataType)
//! - [`csv_reader`]: Delimited-text parsing with type inference and encoding fallback
//! - [`ingest`]: DataSource dispatch, validation, duplicate removal, `load_csv_safe`
//! - [`normalize`]: Min-max, z-score, and median/MAD rescaling
//! - [`stats`]: Descriptive summaries with history, t-based confidence intervals, means
//! - [`correlation`]: Pearson, Spearman, and Kendall τ-b matrices over numeric columns
//! - [`smoothing`]: Simple and exponential moving averages
//! - [`text`]: `clean_text`, `TextAnalyzer` preprocessing, text features
//! - [`keywords`]: Frequency-ranked keywords with stop-word filtering
//! - [`similarity`]: Jaccard and cosine similarity of token sets
//! - [`error`]: Error types
//!
//! ## Quick Start
//!
//! ```
//! use data_science_toolkit::csv_reader::CsvReader;
//! use data_science_toolkit::correlation::{correlation_matrix, CorrelationMethod};
//! use data_science_toolkit::stats::StatisticalCalculator;
//!
//! let csv = "height,weight,name\n150,50,a\n160,58,b\n170,69,c\n180,65,d\n";
//! let table = CsvReader::new().parse_str(csv).unwrap();
//!
//! let mut calc = StatisticalCalculator::new();
//! let heights = table.column_by_name("height").unwrap().as_numeric().unwrap();
//! let summary = calc.descriptive_stats(heights).unwrap();
//! assert_eq!(summary.mean, 165.0);
//!
//! // Only numeric columns take part: "name" is skipped
//! let corr = correlation_matrix(&table, CorrelationMethod::Spearman).unwrap();
//! assert_eq!(corr.size(), 2);
//! let rho = corr.by_name("height", "weight").unwrap();
//! assert!((rho - 0.8).abs() < 1e-10);
//! ```
//!
//! ```
//! use data_science_toolkit::keywords::{extract_keywords, KeywordOptions};
//! use data_science_toolkit::similarity::{text_similarity, SimilarityMethod};
//!
//! let keywords = extract_keywords("Dane, dane i jeszcze raz dane!", &KeywordOptions::default());
//! assert_eq!(keywords[0].term, "dane");
//! assert_eq!(keywords[0].frequency, 3);
//!
//! assert_eq!(text_similarity("Ala ma kota", "ala ma kota", SimilarityMethod::Jaccard), 1.0);
//! ```

pub mod correlation;
pub mod csv_reader;
pub mod error;
pub mod ingest;
pub mod keywords;
pub mod normalize;
pub mod similarity;
pub mod smoothing;
pub mod stats;
pub mod table;
pub mod text;

pub use error::{Result, ToolkitError};
