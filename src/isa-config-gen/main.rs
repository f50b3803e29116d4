// BEGIN - Embark standard lints v0.4
// do not change or add/remove here, but one can add exceptions after this section
// for more info see: <https://github.com/EmbarkStudios/rust-ecosystem/issues/59>
#![deny(unsafe_code)]
#![warn(
    clippy::all,
    clippy::await_holding_lock,
    clippy::char_lit_as_u8,
    clippy::checked_conversions,
    clippy::dbg_macro,
    clippy::debug_assert_with_mut_call,
    clippy::doc_markdown,
    clippy::empty_enum,
    clippy::enum_glob_use,
    clippy::exit,
    clippy::expl_impl_clone_on_copy,
    clippy::explicit_deref_methods,
    clippy::explicit_into_iter_loop,
    clippy::fallible_impl_from,
    clippy::filter_map_next,
    clippy::float_cmp_const,
    clippy::fn_params_excessive_bools,
    clippy::if_let_mutex,
    clippy::implicit_clone,
    clippy::imprecise_flops,
    clippy::inefficient_to_string,
    clippy::invalid_upcast_comparisons,
    clippy::large_types_passed_by_value,
    clippy::let_unit_value,
    clippy::linkedlist,
    clippy::lossy_float_literal,
    clippy::macro_use_imports,
    clippy::manual_ok_or,
    clippy::map_err_ignore,
    clippy::map_flatten,
    clippy::map_unwrap_or,
    clippy::match_on_vec_items,
    clippy::match_same_arms,
    clippy::match_wildcard_for_single_variants,
    clippy::mem_forget,
    clippy::mismatched_target_os,
    clippy::mut_mut,
    clippy::mutex_integer,
    clippy::needless_borrow,
    clippy::needless_continue,
    clippy::option_option,
    clippy::path_buf_push_overwrite,
    clippy::ptr_as_ptr,
    clippy::ref_option_ref,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::same_functions_in_if_condition,
    clippy::semicolon_if_nothing_returned,
    clippy::string_add_assign,
    clippy::string_add,
    clippy::string_lit_as_bytes,
    clippy::string_to_string,
    clippy::todo,
    clippy::trait_duplication_in_bounds,
    clippy::unimplemented,
    clippy::unnested_or_patterns,
    clippy::unused_self,
    clippy::useless_transmute,
    clippy::verbose_file_reads,
    clippy::zero_sized_map_values,
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms
)]
// END - Embark standard lints v0.4
#![allow(clippy::exit)]

use anyhow::{Context, Error};
use clap::{Parser, ValueEnum};
use isa_config_gen::{cfg::Config, writer, Inputs, PathBuf, Style};

mod logger;

#[derive(ValueEnum, Copy, Clone, Debug)]
pub enum Color {
    Auto,
    Always,
    Never,
}

fn parse_level(s: &str) -> Result<log::LevelFilter, Error> {
    s.parse::<log::LevelFilter>()
        .with_context(|| format!("failed to parse level '{s}'"))
}

/// Generates an isa4j configuration class from the investigation, study, and
/// assay XML files of an ISA-Tab configuration
#[derive(Parser)]
#[command(version, about, long_about = None, rename_all = "kebab-case", max_term_width = 80)]
struct Opts {
    /// The log level for messages
    #[arg(
        short = 'L',
        long,
        default_value = "warn",
        value_parser = parse_level,
        long_help = "The log level for messages

Only log messages at or above the level will be emitted.

Possible values:
* off
* error
* warn
* info
* debug
* trace
"
    )]
    log_level: log::LevelFilter,
    /// Coloring of log messages
    #[arg(long, default_value = "auto", value_enum)]
    color: Color,
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// The layout of the generated class, overrides the configuration file
    #[arg(short, long, value_enum)]
    style: Option<Style>,
    /// Directory the class is written to, overrides the configuration file.
    ///
    /// Defaults to the current working directory.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
    /// Name of the generated class, the file is named `<CLASS_NAME>.java`
    class_name: String,
    /// The investigation configuration, eg. `i_investigation.xml`
    investigation: PathBuf,
    /// The study configuration
    study: PathBuf,
    /// The assay configuration
    assay: PathBuf,
}

/// The exit code for a failed argument parse. `--help` and `--version` are
/// reported as errors by clap too, but aren't failures.
fn usage_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

fn real_main(args: Opts) -> Result<(), Error> {
    let color = match args.color {
        Color::Auto => logger::should_colorize(&std::io::stderr()),
        Color::Always => true,
        Color::Never => false,
    };

    logger::setup(args.log_level, color)?;

    let cfg = match &args.config {
        Some(path) => Config::load(path)?,
        None => {
            log::debug!("no configuration file specified, using defaults");
            Config::default()
        }
    };

    let output_dir = cfg.resolve_output_dir(args.output_dir);

    let options = cfg.into_options(args.style);

    let inputs = Inputs {
        investigation: args.investigation,
        study: args.study,
        assay: args.assay,
    };

    let source = isa_config_gen::compile(&args.class_name, &inputs, &options)?;
    let path = writer::write_class(&output_dir, &args.class_name, &source)?;

    log::info!("generated {} in '{path}'", args.class_name);

    Ok(())
}

fn main() {
    let args = Opts::try_parse().unwrap_or_else(|err| {
        let _ = err.print();
        std::process::exit(usage_exit_code(&err));
    });

    match real_main(args) {
        Ok(_) => {}
        Err(e) => {
            log::error!("{:#}", e);
            std::process::exit(1);
        }
    }
}
