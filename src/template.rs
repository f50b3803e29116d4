//! Interpolation of the rendered enums into the class template.

use crate::{render::EnumBlock, Style};
use anyhow::{bail, ensure, Context as _};

const BASIC: &str = include_str!("../resources/templates/basic.java.tmpl");
const EXTENDED: &str = include_str!("../resources/templates/extended.java.tmpl");

/// The package isa4j keeps its configuration classes in
pub const DEFAULT_PACKAGE: &str = "de.ipk_gatersleben.bit.bi.isa4j.configurations";

/// Everything besides the enums themselves that goes into the class
#[derive(Clone, Debug)]
pub struct Options {
    pub style: Style,
    pub package: String,
    /// Names for the `@author` tag of the class docs
    pub authors: Vec<String>,
    /// First line of the class docs
    pub description: Option<String>,
    /// Emitted verbatim at the very top of the file
    pub license_header: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            style: Style::default(),
            package: DEFAULT_PACKAGE.to_owned(),
            authors: Vec::new(),
            description: None,
            license_header: None,
        }
    }
}

/// The three rendered enums of a class
pub struct Blocks {
    pub investigation: EnumBlock,
    pub study: EnumBlock,
    pub assay: EnumBlock,
}

/// Fails if `name` can't be used as a Java class name, which would also make
/// for an odd file name
pub fn ensure_class_name(name: &str) -> anyhow::Result<()> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        bail!("the class name is empty");
    };

    ensure!(
        (first.is_alphabetic() || first == '_' || first == '$')
            && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$'),
        "'{name}' is not a valid Java class name"
    );

    Ok(())
}

fn class_doc(class_name: &str, options: &Options) -> String {
    let mut doc = String::from("/**\n");

    match &options.description {
        Some(desc) => {
            for line in desc.lines() {
                doc.push_str(" * ");
                doc.push_str(line.trim_end());
                doc.push('\n');
            }
        }
        None => {
            doc.push_str(&format!(" * {class_name} validation class\n"));
        }
    }

    if !options.authors.is_empty() {
        doc.push_str(&format!(" * @author {}\n", options.authors.join(", ")));
    }

    doc.push_str(" */");
    doc
}

/// Produces the complete Java source of the configuration class
pub fn compile(class_name: &str, blocks: &Blocks, options: &Options) -> anyhow::Result<String> {
    let template = match options.style {
        Style::Basic => BASIC,
        Style::Extended => EXTENDED,
    };

    let license_header = options
        .license_header
        .as_deref()
        .map(|header| format!("{}\n", header.trim_end()))
        .unwrap_or_default();

    let class_doc = class_doc(class_name, options);
    let investigation = blocks.investigation.render();
    let study = blocks.study.render();
    let assay = blocks.assay.render();

    interpolate(
        template,
        &[
            ("license_header", &license_header),
            ("package", &options.package),
            ("class_doc", &class_doc),
            ("class_name", class_name),
            ("investigation_enum", &investigation),
            ("study_enum", &study),
            ("assay_enum", &assay),
        ],
    )
    .with_context(|| format!("failed to fill in the {:?} template", options.style))
}

/// Replaces every `${name}` in `template` with its value from `vars`.
///
/// Values are inserted as is, they are never scanned for placeholders
/// themselves.
pub fn interpolate(template: &str, vars: &[(&str, &str)]) -> anyhow::Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);

        let after = &rest[start + 2..];
        let end = after.find('}').with_context(|| {
            format!(
                "unterminated placeholder at byte {}",
                template.len() - rest.len() + start
            )
        })?;

        let name = &after[..end];
        let Some((_, value)) = vars.iter().find(|(key, _)| *key == name) else {
            bail!("unknown placeholder '${{{name}}}'");
        };

        out.push_str(value);
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}
