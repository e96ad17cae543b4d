use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::report::Reporter;

/// Run-wide behaviour.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[schemars(title = "Run", inline)]
#[serde(default)]
pub struct RunOptions {
    /// Abort on the first warning instead of logging it.
    #[schemars(title = "Fail on Warning")]
    pub fail_on_warning: bool,
}

impl RunOptions {
    /// Reporter honoring these options.
    #[must_use]
    pub fn reporter(&self) -> Reporter {
        Reporter::new(self.fail_on_warning)
    }
}
