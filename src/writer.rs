use crate::{Path, PathBuf};
use anyhow::Context as _;

/// Extension of the generated source file
pub const EXTENSION: &str = "java";

/// The path the class `class_name` is written to inside `output_dir`
#[inline]
pub fn output_path(output_dir: &Path, class_name: &str) -> PathBuf {
    output_dir.join(format!("{class_name}.{EXTENSION}"))
}

/// Writes `source` to `<output_dir>/<class_name>.java`, replacing whatever
/// was there before, and returns the path of the file
pub fn write_class(output_dir: &Path, class_name: &str, source: &str) -> anyhow::Result<PathBuf> {
    let path = output_path(output_dir, class_name);

    fs::write(path.as_std_path(), source)
        .with_context(|| format!("failed to write generated class to '{path}'"))?;

    log::info!("wrote {} bytes to '{path}'", source.len());
    Ok(path)
}
