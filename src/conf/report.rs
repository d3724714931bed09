use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// 1-based HDU holding the binary table.
    #[serde(default = "ReportConfig::default_hdu")]
    pub hdu: usize,
}

impl ReportConfig {
    fn default_hdu() -> usize {
        2
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            hdu: Self::default_hdu(),
        }
    }
}
