//! `pdbimg` command-line entry point.
//!
//! ```text
//! pdbimg plan <entry_id> [options.toml]
//! pdbimg verify <entry_id> [options.toml]
//! pdbimg collect <dir> <entry_id> [YYYY-MM-DD]
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use pdbimg::catalogue::{caption_plan, write_captions};
use pdbimg::collector::collect;
use pdbimg::options::Options;
use pdbimg::planner::{
    expected_files, fetch_metadata, plan, plan_images, resolve_image_types,
    validate_entry_id, verify_outputs,
};
use pdbimg::Error;

#[derive(Parser, Debug)]
#[command(name = "pdbimg", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan an entry's images and write their caption records.
    Plan {
        /// Archive entry id, e.g. `1hda`.
        entry_id: String,
        /// TOML options file; defaults apply when omitted.
        options: Option<PathBuf>,
    },
    /// Check that every expected output file of an entry exists.
    Verify {
        /// Archive entry id.
        entry_id: String,
        /// TOML options file; defaults apply when omitted.
        options: Option<PathBuf>,
    },
    /// Build the manifest and file list from written caption records.
    Collect {
        /// Directory holding the caption records.
        dir: PathBuf,
        /// Archive entry id.
        entry_id: String,
        /// Last modification date (`YYYY-MM-DD`), today when omitted.
        date: Option<NaiveDate>,
    },
}

fn load_options(path: Option<&Path>) -> Result<Options, Error> {
    path.map_or_else(|| Ok(Options::default()), Options::load)
}

/// Plan the entry, log every stem and write its caption records.
fn run_plan(entry_id: &str, options: &Options) -> Result<(), Error> {
    validate_entry_id(entry_id)?;
    let output = &options.output;
    let types = resolve_image_types(output.mode, &output.image_types)?;
    let gateway = options.api.gateway();
    let metadata = fetch_metadata(gateway.as_ref(), entry_id, &types)?;
    let images = plan_images(&types, output.view, &metadata);
    for image in &images {
        log::info!("{}", image.stem(entry_id));
    }
    let records =
        caption_plan(entry_id, &images, &metadata, &options.run.reporter())?;
    let _ = write_captions(&output.directory, &records)?;
    Ok(())
}

/// Re-plan the entry and check every expected file exists.
fn run_verify(entry_id: &str, options: &Options) -> Result<(), Error> {
    let output = &options.output;
    let gateway = options.api.gateway();
    let stems = plan(
        entry_id,
        output.mode,
        &output.image_types,
        output.view,
        gateway.as_ref(),
    )?;
    let expected =
        expected_files(&stems, &output.sizes, &output.image_format);
    verify_outputs(&output.directory, &expected)
}

fn run_collect(
    dir: &Path,
    entry_id: &str,
    date: Option<NaiveDate>,
) -> Result<(), Error> {
    validate_entry_id(entry_id)?;
    let collected = collect(dir, entry_id, date)?;
    log::info!(
        "{} records -> {} and {}",
        collected.records,
        collected.manifest.display(),
        collected.filelist.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let result = match Cli::parse().cmd {
        Command::Plan { entry_id, options } => load_options(options.as_deref())
            .and_then(|options| run_plan(&entry_id, &options)),
        Command::Verify { entry_id, options } => {
            load_options(options.as_deref())
                .and_then(|options| run_verify(&entry_id, &options))
        }
        Command::Collect {
            dir,
            entry_id,
            date,
        } => run_collect(&dir, &entry_id, date),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn plan_options_file_is_optional() {
        let cli = Cli::try_parse_from(["pdbimg", "plan", "1hda"]).unwrap();
        assert!(matches!(
            cli.cmd,
            Command::Plan { ref entry_id, options: None } if entry_id == "1hda"
        ));
        let cli =
            Cli::try_parse_from(["pdbimg", "verify", "1hda", "opts.toml"])
                .unwrap();
        assert!(matches!(
            cli.cmd,
            Command::Verify { options: Some(ref path), .. }
                if path == Path::new("opts.toml")
        ));
    }

    #[test]
    fn collect_parses_the_date() {
        let cli =
            Cli::try_parse_from(["pdbimg", "collect", "out", "1hda", "2024-05-01"])
                .unwrap();
        let Command::Collect { dir, date, .. } = cli.cmd else {
            unreachable!("parsed as collect");
        };
        assert_eq!(dir, PathBuf::from("out"));
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert!(Cli::try_parse_from(["pdbimg", "collect", "out", "1hda", "May 1"])
            .is_err());
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["pdbimg", "render", "1hda"]).is_err());
        assert!(Cli::try_parse_from(["pdbimg", "plan"]).is_err());
    }
}
