//! Cells: values, addresses and sparse storage

mod address;
mod storage;
mod value;

pub use address::CellAddress;
pub use storage::{CellData, CellStorage};
pub use value::CellValue;
