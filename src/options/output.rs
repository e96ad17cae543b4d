use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{Mode, ViewMode};
use crate::naming::ImageSize;

/// What to plan and where outputs live.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Output", inline)]
#[serde(default)]
pub struct OutputOptions {
    /// Archive the entry comes from.
    #[schemars(title = "Mode")]
    pub mode: Mode,
    /// Requested image types, `all` for every type of the mode.
    #[schemars(title = "Image Types")]
    pub image_types: Vec<String>,
    /// Views to render.
    #[schemars(title = "View")]
    pub view: ViewMode,
    /// Image sizes as `WIDTHxHEIGHT`, largest first.
    #[schemars(title = "Sizes", with = "Vec<String>")]
    pub sizes: Vec<ImageSize>,
    /// Image file extension.
    #[schemars(title = "Image Format")]
    pub image_format: String,
    /// Directory receiving captions, images and the manifest.
    #[schemars(skip)]
    pub directory: PathBuf,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Pdb,
            image_types: vec!["all".to_owned()],
            view: ViewMode::Auto,
            sizes: vec![ImageSize::new(800, 800), ImageSize::new(100, 100)],
            image_format: "png".to_owned(),
            directory: PathBuf::from("."),
        }
    }
}
