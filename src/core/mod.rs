pub mod dataset;
pub mod loader;
pub mod region_codes;
pub mod types;

pub use dataset::{DatasetStore, LoadReport};
pub use loader::{read_csv_path, read_csv_reader};
pub use region_codes::normalize;
pub use types::{RawRecord, Record, RegionTotal, TimeValue};
