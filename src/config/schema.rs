use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::Multipliers;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Catalog used when `--catalog` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    pub names: ResponderNames,

    pub multipliers: Multipliers,
}

/// Display names for the two responders
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ResponderNames {
    pub a: String,
    pub b: String,
}

impl Default for ResponderNames {
    fn default() -> Self {
        Self {
            a: "Mama".to_string(),
            b: "Papa".to_string(),
        }
    }
}
