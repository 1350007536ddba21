//! Top 100 Wine Common Library
//!
//! CLIとWeb(WASM)で共有される型とコアロジック

pub mod types;
pub mod error;
pub mod normalizer;
pub mod label;
pub mod filter;
pub mod selection;
pub mod export;
pub mod links;
pub mod compare;
pub mod pwl;
pub mod dataset;
pub mod convert;

pub use types::{Category, ImageOverrides, RawWine, Vintage, Wine};
pub use error::{Error, Result};
pub use normalizer::{canonical_category, load_wines, normalize, parse_dataset};
pub use label::{build_delivery_url, fallback_label_url, label_url, srcset, wine_srcset, DeliveryParams};
pub use filter::{filter_wines, options_for, sort_wines, Facet, FacetState, SortOrder, ViewMode};
pub use selection::{
    ExportRow, KeyValueStore, MemoryStore, SelectionManager, SelectionSet, TastingStats,
    TastingStatus,
};
pub use export::{export_file_name, to_csv, to_json, ExportFormat};
pub use links::{share_url, video_url, ShareLink};
pub use compare::{comparison_columns, CompareList, CompareToggle, ComparisonColumn};
pub use pwl::{classify_response, PwlOutcome, PwlRequest};
pub use dataset::{dataset_file_name, load_with_fallback, LoadSequence, LoadedYear};
pub use convert::{csv_to_dataset_json, csv_to_records, DatasetRecord};
