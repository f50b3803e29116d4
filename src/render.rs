//! Rendering of the constants of one generated enum.

use crate::{normalize, FieldDescriptor, SchemaKind, Style};
use std::{collections::BTreeMap, fmt};

const INDENT: &str = "    ";

/// The arguments passed to the constructor of an enum constant
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstantArgs {
    /// `("Label", InvestigationAttribute.SECTION, required)`
    Investigation {
        label: String,
        section: String,
        required: bool,
    },
    /// `("Label", required, blockIndex)`
    WideTable {
        label: String,
        required: bool,
        block_index: u32,
    },
}

impl fmt::Display for ConstantArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Investigation {
                label,
                section,
                required,
            } => write!(
                f,
                "\"{label}\", InvestigationAttribute.{section}, {required}"
            ),
            Self::WideTable {
                label,
                required,
                block_index,
            } => write!(f, "\"{label}\", {required}, {block_index}"),
        }
    }
}

/// A single documented enum constant
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumConstant {
    pub name: String,
    pub docs: Vec<String>,
    pub args: ConstantArgs,
}

impl EnumConstant {
    pub fn from_field(
        kind: SchemaKind,
        field: &FieldDescriptor,
        style: Style,
    ) -> anyhow::Result<Self> {
        let label = field.label().to_owned();
        let required = field.required;

        let args = if kind.tracks_block_index() {
            ConstantArgs::WideTable {
                label,
                required,
                block_index: field.block_index.unwrap_or_default(),
            }
        } else {
            let section = field.section.as_deref().ok_or_else(|| {
                anyhow::anyhow!("investigation field '{}' has no section", field.header)
            })?;

            ConstantArgs::Investigation {
                label,
                section: normalize::section_identifier(section),
                required,
            }
        };

        Ok(Self {
            name: field.identifier(),
            docs: normalize::doc_lines(field, style),
            args,
        })
    }

    fn render(&self, style: Style, out: &mut String) {
        use fmt::Write as _;

        // The leading newline places every constant on its own line after the
        // separating comma of the previous one
        out.push('\n');
        if style == Style::Extended {
            out.push('\n');
        }

        let _ = writeln!(out, "{INDENT}/**");
        for line in &self.docs {
            let _ = writeln!(out, "{INDENT} * {line}");
            if style == Style::Extended {
                let _ = writeln!(out, "{INDENT} * <br>");
            }
        }
        let _ = writeln!(out, "{INDENT} */");

        let _ = write!(out, "{INDENT}{}({})", self.name, self.args);
    }
}

/// The rendered constant list of one of the generated enums
#[derive(Clone, Debug)]
pub struct EnumBlock {
    pub kind: SchemaKind,
    pub style: Style,
    pub constants: Vec<EnumConstant>,
}

impl EnumBlock {
    /// Builds the constants for `fields`, keeping their order.
    ///
    /// Constants whose names collide are kept as is. The generated enum won't
    /// compile in that case, so each collision is logged as a warning.
    pub fn new(kind: SchemaKind, fields: &[FieldDescriptor], style: Style) -> anyhow::Result<Self> {
        let constants = fields
            .iter()
            .map(|field| EnumConstant::from_field(kind, field, style))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let block = Self {
            kind,
            style,
            constants,
        };

        for (name, count) in block.duplicate_names() {
            log::warn!(
                "{} declares the constant '{name}' {count} times",
                kind.enum_name()
            );
        }

        Ok(block)
    }

    /// The constant names that appear more than once, with their counts
    pub fn duplicate_names(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::<&str, usize>::new();
        for constant in &self.constants {
            *counts.entry(constant.name.as_str()).or_default() += 1;
        }

        counts.retain(|_name, count| *count > 1);
        counts
    }

    /// The comma separated, semicolon terminated constant declarations
    pub fn render(&self) -> String {
        let mut out = String::new();

        for (i, constant) in self.constants.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            constant.render(self.style, &mut out);
        }

        out.push(';');
        out
    }
}

impl fmt::Display for EnumBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
