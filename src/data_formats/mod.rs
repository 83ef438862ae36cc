mod request;
mod response;
mod wrapper;

pub use request::*;
pub use response::*;
pub use wrapper::*;

use serde::{Deserialize, Serialize};

/// Which articles the main page lists.
#[derive(Deserialize, Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NewsFilter {
    My,
    /// Also chosen for unrecognised values.
    #[default]
    #[serde(other)]
    All,
}

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct MainPageQueryParams {
    #[serde(default)]
    pub filter: NewsFilter,
}
