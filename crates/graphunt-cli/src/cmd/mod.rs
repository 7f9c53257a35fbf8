pub mod analyze;
pub mod layout;
pub mod score;

use std::path::Path;

use graphunt_core::config::{self, AnalysisConfig};
use graphunt_core::error::{AnalysisError, ErrorCode};

use crate::input::{InputArgs, Tables, load_tables};
use crate::output::{CliError, OutputMode, render_error};

/// Resolved config and loaded tables for one invocation.
pub struct Prepared {
    pub config: AnalysisConfig,
    pub tables: Tables,
}

/// Resolve config and load input, rendering failures with their error code.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or fails validation, or
/// if an input table cannot be read.
pub fn prepare(
    args: &InputArgs,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<Prepared> {
    let config = match config::resolve_config(args.config.as_deref(), project_root) {
        Ok(config) => config,
        Err(e) => {
            let code = e
                .downcast_ref::<AnalysisError>()
                .map_or(ErrorCode::ConfigParseError, AnalysisError::code);
            render_error(output, &CliError::with_code(code, format!("{e:#}")))?;
            return Err(e);
        }
    };

    let tables = match load_tables(args) {
        Ok(tables) => tables,
        Err(e) => {
            render_error(
                output,
                &CliError::with_code(ErrorCode::InputParseError, format!("{e:#}")),
            )?;
            return Err(e);
        }
    };

    Ok(Prepared { config, tables })
}

/// Render an analysis error and turn it into a command failure.
///
/// # Errors
///
/// Always returns an error carrying the code of `err`.
pub fn reject(output: OutputMode, err: &AnalysisError) -> anyhow::Result<()> {
    render_error(output, &CliError::from(err))?;
    anyhow::bail!("{} ({})", err.code().message(), err.code())
}
