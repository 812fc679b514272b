//! Root-relative layout of the data directories.
//!
//! Raw extracts live under `data/raw`, cleaned extracts under
//! `data/prepared`, and the warehouse database under `data/dw`.

use std::path::{Path, PathBuf};

/// Raw and prepared file names, one per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Customers,
    Products,
    Sales,
}

impl Entity {
    pub const ALL: [Self; 3] = [Self::Customers, Self::Products, Self::Sales];

    pub fn raw_file(self) -> &'static str {
        match self {
            Self::Customers => "customers_data.csv",
            Self::Products => "products_data.csv",
            Self::Sales => "sales_data.csv",
        }
    }

    pub fn prepared_file(self) -> &'static str {
        match self {
            Self::Customers => "customers_data_prepared.csv",
            Self::Products => "products_data_prepared.csv",
            Self::Sales => "sales_data_prepared.csv",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Products => "products",
            Self::Sales => "sales",
        }
    }
}

/// Resolved data locations under a project root.
#[derive(Debug, Clone)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn raw_dir(&self) -> PathBuf {
        self.root.join("data").join("raw")
    }

    pub fn prepared_dir(&self) -> PathBuf {
        self.root.join("data").join("prepared")
    }

    pub fn warehouse_db(&self) -> PathBuf {
        self.root.join("data").join("dw").join("smart_sales.db")
    }

    pub fn raw(&self, entity: Entity) -> PathBuf {
        self.raw_dir().join(entity.raw_file())
    }

    pub fn prepared(&self, entity: Entity) -> PathBuf {
        self.prepared_dir().join(entity.prepared_file())
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::new(Path::new("."))
    }
}
