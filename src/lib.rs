#![doc = include_str!("../README.md")]

pub mod cfg;
pub mod extract;
/// Label, identifier and documentation normalization
pub mod normalize;
pub mod render;
pub mod template;
pub mod writer;

pub use camino::{Utf8Path as Path, Utf8PathBuf as PathBuf};
pub use extract::FieldDescriptor;

use anyhow::Context as _;

/// The layout of the generated class. Both styles declare the same enums, but
/// they differ in how each constant is documented and in the body of the
/// `validate` methods.
#[derive(
    PartialEq,
    Eq,
    Clone,
    Copy,
    Debug,
    Default,
    strum::VariantNames,
    strum::VariantArray,
    clap::ValueEnum,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Style {
    /// Single line docs, `[required]` prefix on required fields only
    #[default]
    Basic,
    /// Multi line docs with the default value and a required/optional marker,
    /// and validation that also runs the general model checks
    Extended,
}

#[macro_export]
macro_rules! enum_deser {
    ($enum:ty) => {
        impl<'de> toml_span::Deserialize<'de> for $enum {
            fn deserialize(
                value: &mut toml_span::value::Value<'de>,
            ) -> Result<Self, toml_span::DeserError> {
                let s = value.take_string(Some(stringify!($enum)))?;

                use strum::{VariantArray, VariantNames};

                let Some(pos) = <$enum as VariantNames>::VARIANTS
                    .iter()
                    .position(|v| *v == s.as_ref())
                else {
                    return Err(toml_span::Error::from((
                        toml_span::ErrorKind::UnexpectedValue {
                            expected: <$enum as VariantNames>::VARIANTS,
                        },
                        value.span,
                    ))
                    .into());
                };

                Ok(<$enum as VariantArray>::VARIANTS[pos])
            }
        }
    };
}

enum_deser!(Style);

/// The three kinds of ISA-Tab configuration a generated class covers. Each
/// one becomes its own enum inside the class.
#[derive(PartialEq, Eq, Clone, Copy, Debug, strum::Display)]
pub enum SchemaKind {
    Investigation,
    Study,
    Assay,
}

impl SchemaKind {
    /// The header prefix selecting the fields that end up in the enum
    #[inline]
    pub fn prefix(self) -> HeaderPrefix {
        match self {
            Self::Investigation => HeaderPrefix::Comment,
            Self::Study | Self::Assay => HeaderPrefix::Characteristics,
        }
    }

    /// Name of the generated Java enum
    #[inline]
    pub fn enum_name(self) -> &'static str {
        match self {
            Self::Investigation => "InvestigationFile",
            Self::Study => "StudyFile",
            Self::Assay => "AssayFile",
        }
    }

    /// Only study and assay fields live in wide tables, where the group a
    /// characteristic belongs to matters
    #[inline]
    pub fn tracks_block_index(self) -> bool {
        !matches!(self, Self::Investigation)
    }
}

/// The bracketed header forms the generator understands
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum HeaderPrefix {
    /// `Comment[...]`
    Comment,
    /// `Characteristics[...]`
    Characteristics,
}

impl HeaderPrefix {
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Comment => "Comment[",
            Self::Characteristics => "Characteristics[",
        }
    }

    /// Offset of the label inside a header carrying this prefix
    #[inline]
    pub fn offset(self) -> usize {
        self.as_str().len()
    }
}

/// The paths of the three XML configuration files making up one ISA
/// configuration
#[derive(Clone, Debug)]
pub struct Inputs {
    pub investigation: PathBuf,
    pub study: PathBuf,
    pub assay: PathBuf,
}

/// Reads the three configuration files and renders the complete Java source
/// for `class_name`.
///
/// Nothing is written to disk, see [`writer::write_class`] for that.
pub fn compile(
    class_name: &str,
    inputs: &Inputs,
    options: &template::Options,
) -> anyhow::Result<String> {
    template::ensure_class_name(class_name)?;

    let block = |kind: SchemaKind, path: &Path| -> anyhow::Result<render::EnumBlock> {
        log::info!("reading {kind} configuration from '{path}'");

        let fields = extract::load(path, kind)
            .with_context(|| format!("failed to extract {kind} fields from '{path}'"))?;

        log::debug!("extracted {} {kind} fields", fields.len());

        render::EnumBlock::new(kind, &fields, options.style)
    };

    let blocks = template::Blocks {
        investigation: block(SchemaKind::Investigation, &inputs.investigation)?,
        study: block(SchemaKind::Study, &inputs.study)?,
        assay: block(SchemaKind::Assay, &inputs.assay)?,
    };

    template::compile(class_name, &blocks, options)
}
