//! The optional TOML configuration of the generator.
//!
//! ```toml
//! package = "de.ipk_gatersleben.bit.bi.isa4j.configurations"
//! style = "extended"
//! output-dir = "src/main/java/de/ipk_gatersleben/bit/bi/isa4j/configurations"
//! authors = ["psaroudakis", "arendd"]
//! description = "MIAPPEv1.1 validation class"
//! license-header = "// SPDX-License-Identifier: MIT"
//! ```

use crate::{template, Path, PathBuf, Style};
use codespan_reporting::{diagnostic::Diagnostic, files::SimpleFile, term};
use toml_span::{de_helpers::TableHelper, value::Value, DeserError, Deserialize};

/// The output directory used when neither the command line nor the
/// configuration name one
pub const DEFAULT_OUTPUT_DIR: &str = ".";

#[derive(Default, Debug, PartialEq, Eq)]
pub struct Config {
    /// The Java package of the generated class
    pub package: Option<String>,
    pub style: Option<Style>,
    /// Directory the class is written to, the current directory by default
    pub output_dir: Option<PathBuf>,
    pub authors: Vec<String>,
    pub description: Option<String>,
    pub license_header: Option<String>,
}

impl<'de> Deserialize<'de> for Config {
    fn deserialize(value: &mut Value<'de>) -> Result<Self, DeserError> {
        let mut th = TableHelper::new(value)?;

        let package = th.optional("package");
        let style = th.optional("style");
        let output_dir: Option<String> = th.optional("output-dir");
        let authors = th.optional("authors").unwrap_or_default();
        let description = th.optional("description");
        let license_header = th.optional("license-header");

        th.finalize(None)?;

        Ok(Self {
            package,
            style,
            output_dir: output_dir.map(PathBuf::from),
            authors,
            description,
            license_header,
        })
    }
}

impl Config {
    /// Loads the configuration file at `path`
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path.as_std_path())?;
        let cfg = Self::parse(path.as_str(), &contents)?;

        log::info!("using configuration from '{path}'");
        Ok(cfg)
    }

    /// Parses the contents of a configuration file. `name` is what errors
    /// refer to the file as.
    pub fn parse(name: &str, contents: &str) -> anyhow::Result<Self> {
        let file = SimpleFile::new(name, contents);

        let mut value = match toml_span::parse(contents) {
            Ok(value) => value,
            Err(err) => {
                anyhow::bail!(
                    "failed to parse configuration from '{name}'\n{}",
                    write_diagnostics(&file, [err.to_diagnostic(())])
                );
            }
        };

        Self::deserialize(&mut value).map_err(|err| {
            let diags = err.errors.iter().map(|err| err.to_diagnostic(()));
            anyhow::anyhow!(
                "failed to deserialize configuration from '{name}'\n{}",
                write_diagnostics(&file, diags)
            )
        })
    }

    /// The directory to write the class to, `cli` takes precedence over the
    /// configured one
    pub fn resolve_output_dir(&self, cli: Option<PathBuf>) -> PathBuf {
        cli.or_else(|| self.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    /// Combines the configuration with a style from the command line, which
    /// takes precedence
    pub fn into_options(self, style: Option<Style>) -> template::Options {
        let defaults = template::Options::default();

        template::Options {
            style: style.or(self.style).unwrap_or(defaults.style),
            package: self.package.unwrap_or(defaults.package),
            authors: self.authors,
            description: self.description,
            license_header: self.license_header,
        }
    }
}

/// Renders diagnostics for the configuration file without color
fn write_diagnostics(
    file: &SimpleFile<&str, &str>,
    diags: impl IntoIterator<Item = Diagnostic<()>>,
) -> String {
    let mut out = term::termcolor::NoColor::new(Vec::new());
    let config = term::Config::default();

    for diag in diags {
        if let Err(err) = term::emit(&mut out, &config, file, &diag) {
            log::error!("failed to render configuration diagnostic: {err}");
        }
    }

    String::from_utf8_lossy(&out.into_inner()).into_owned()
}
