//! Product catalogue used by validation.

use serde::{Deserialize, Serialize};

/// Limits for one supported product model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductModel {
    pub name: String,
    pub min_nodes: u32,
    pub max_nodes: u32,
    pub max_appliances: u32,
}

impl ProductModel {
    fn new(name: &str, min_nodes: u32, max_nodes: u32, max_appliances: u32) -> Self {
        Self {
            name: name.to_string(),
            min_nodes,
            max_nodes,
            max_appliances,
        }
    }
}

/// Read-only catalogue of product models, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductConfiguration {
    pub products: Vec<ProductModel>,
}

impl ProductConfiguration {
    /// Case-insensitive lookup by model name.
    pub fn find(&self, name: &str) -> Option<&ProductModel> {
        let name = name.trim();
        self.products
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

impl Default for ProductConfiguration {
    fn default() -> Self {
        Self {
            products: vec![
                ProductModel::new("E560", 3, 64, 16),
                ProductModel::new("P570", 3, 64, 16),
                ProductModel::new("V570", 3, 64, 16),
                ProductModel::new("S570", 3, 64, 16),
                ProductModel::new("G410", 4, 64, 16),
            ],
        }
    }
}
