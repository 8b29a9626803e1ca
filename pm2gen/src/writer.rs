//! Renders an [`Ecosystem`] in a form pm2 can start from.

use crate::ecosystem::Ecosystem;
use crate::error::{Error, Result};
use log::info;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    /// `ecosystem.json`
    #[default]
    Json,
    /// `*.config.js` exporting the apps through `module.exports`
    Js,
}

pub fn render(ecosystem: &Ecosystem, format: Format, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(ecosystem)?
    } else {
        serde_json::to_string(ecosystem)?
    };
    Ok(match format {
        Format::Json => format!("{}\n", json),
        Format::Js => format!(
            "// generated by pm2gen, do not edit\nmodule.exports = {};\n",
            json
        ),
    })
}

/// Writes the rendered ecosystem to `output`, or to stdout when it is `None`.
pub fn write(
    ecosystem: &Ecosystem,
    format: Format,
    pretty: bool,
    output: Option<&Path>,
) -> Result<()> {
    let rendered = render(ecosystem, format, pretty)?;
    match output {
        Some(path) => {
            fs::write(path, rendered).map_err(|e| Error::Write {
                path: path.display().to_string(),
                source: e,
            })?;
            info!("wrote {} apps to {}", ecosystem.apps.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(|e| Error::Write {
                    path: "<stdout>".to_string(),
                    source: e,
                })?;
        }
    }
    Ok(())
}
