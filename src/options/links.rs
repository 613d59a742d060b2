use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::links::LinkPolicy;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Links", inline)]
#[serde(default)]
/// Link-point selection.
pub struct LinkOptions {
    /// Number of link points exposed to the UI.
    #[schemars(title = "Link Count", range(min = 0, max = 64))]
    pub count: usize,
    /// How link indices are spread over the point field.
    #[schemars(skip)]
    pub policy: LinkPolicy,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            count: 8,
            policy: LinkPolicy::default(),
        }
    }
}
