//! Stock screening core: load a ticker sheet, filter companies by
//! inclusive metric bounds, rank the survivors by a weighted sum of dense
//! ranks and keep the top ten.

pub mod config;
pub mod data;
pub mod error;
pub mod screening;

pub use config::ScreenerConfig;
pub use data::filter::{apply_filters, Bound, FilterSpec};
pub use data::loader::load_file;
pub use data::model::{CellValue, CompanyDataset, CompanyRecord, Metric};
pub use error::{ErrorKind, ScreenerError};
pub use screening::{
    dense_rank, rank_companies, DisplayRow, FormState, RankedCompany, RankedResult,
    ScreeningEngine, WeightSpec, TOP_N,
};
