//! Run configuration with TOML file support.
//!
//! Every section uses `#[serde(default)]`, so a file overriding a single
//! key (e.g. only `[output] view = "front"`) is complete.

mod api;
mod output;
mod run;

use std::path::Path;

pub use api::ApiOptions;
pub use output::OutputOptions;
pub use run::RunOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Top-level options container.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Metadata service settings.
    pub api: ApiOptions,
    /// Planning and output settings.
    pub output: OutputOptions,
    /// Run-wide behaviour.
    pub run: RunOptions,
}

impl Options {
    /// Generate JSON Schema describing the options file.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Mode, ViewMode};
    use crate::naming::ImageSize;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn defaults() {
        let opts = Options::default();
        assert_eq!(opts.api.base_url, "https://www.ebi.ac.uk/pdbe/api");
        assert_eq!(opts.output.image_types, ["all"]);
        assert_eq!(opts.output.view, ViewMode::Auto);
        assert_eq!(
            opts.output.sizes,
            [ImageSize::new(800, 800), ImageSize::new(100, 100)]
        );
        assert_eq!(opts.output.image_format, "png");
        assert!(!opts.run.fail_on_warning);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[output]
mode = "alphafold"
sizes = ["1600x1600"]
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.output.mode, Mode::Alphafold);
        assert_eq!(opts.output.sizes, [ImageSize::new(1600, 1600)]);
        // Everything else should be default
        assert_eq!(opts.output.view, ViewMode::Auto);
        assert!(!opts.api.no_api);
    }

    #[test]
    fn malformed_size_is_a_parse_error() {
        let err = toml::from_str::<Options>("[output]\nsizes = [\"big\"]\n");
        assert!(err.is_err());
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("presets").join("strict.toml");
        let mut opts = Options::default();
        opts.run.fail_on_warning = true;
        opts.api.no_api = true;
        opts.save(&path).unwrap();
        assert_eq!(Options::load(&path).unwrap(), opts);
        assert!(opts.run.reporter().fail_on_warning());
    }

    #[test]
    fn load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[output\n").unwrap();
        assert!(matches!(Options::load(&path), Err(Error::OptionsParse(_))));
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();
        assert!(props.contains_key("api"));
        assert!(props.contains_key("output"));
        assert!(props.contains_key("run"));

        let output = &props["output"]["properties"];
        assert!(output.get("sizes").is_some());
        assert!(output.get("directory").is_none());
    }
}
