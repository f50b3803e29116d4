//! Extraction of field descriptors from ISA-Tab XML configuration files.
//!
//! ISA configurations list their columns as `<field>` elements, interleaved
//! with `<protocol-field>` markers for the processes between the material
//! nodes of a wide table. Elements are matched by their local name so the
//! configuration namespace used by the file is irrelevant.

use crate::{HeaderPrefix, Path, SchemaKind};
use anyhow::Context as _;
use roxmltree::Node;

const FIELD: &str = "field";
const PROTOCOL_FIELD: &str = "protocol-field";
const DESCRIPTION: &str = "description";
const DEFAULT_VALUE: &str = "default-value";

/// Amount the block index advances for each protocol marker. A protocol sits
/// between two material nodes, so the next node is two groups further along.
const BLOCK_STEP: u32 = 2;

/// A single `<field>` of a configuration file, as it was found in the file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// The raw header, eg. `Comment[Investigation Title]`
    pub header: String,
    /// The header prefix the field matched
    pub prefix: HeaderPrefix,
    /// `true` only if the `is-required` attribute is exactly `"true"`
    pub required: bool,
    /// The investigation block the field belongs to, only present on
    /// investigation fields
    pub section: Option<String>,
    /// All of the text content of the element
    pub content: String,
    /// The text of the nested `<description>`, if any
    pub description: Option<String>,
    /// The text of the nested `<default-value>`, if any
    pub default_value: Option<String>,
    /// The group of the wide table the field belongs to, only present on
    /// study and assay fields
    pub block_index: Option<u32>,
}

impl FieldDescriptor {
    /// The trimmed text between the brackets of the header
    #[inline]
    pub fn label(&self) -> &str {
        crate::normalize::inner_label(&self.header, self.prefix)
    }

    /// The enum constant name derived from the label
    #[inline]
    pub fn identifier(&self) -> String {
        crate::normalize::identifier(self.label())
    }
}

/// Reads and parses the XML file at `path`, then extracts the fields for
/// `kind` from it
pub fn load(path: &Path, kind: SchemaKind) -> anyhow::Result<Vec<FieldDescriptor>> {
    let contents = fs::read_to_string(path.as_std_path())?;
    let doc = roxmltree::Document::parse(&contents)
        .with_context(|| format!("failed to parse XML in '{path}'"))?;

    extract_fields(&doc, kind)
}

/// Extracts the fields of `kind` from a parsed configuration, in document
/// order.
///
/// Fields whose header doesn't carry the prefix for `kind` are skipped, as
/// are fields without a header at all.
pub fn extract_fields(
    doc: &roxmltree::Document<'_>,
    kind: SchemaKind,
) -> anyhow::Result<Vec<FieldDescriptor>> {
    let prefix = kind.prefix();
    let mut block_index = 0;
    let mut fields = Vec::new();

    // Every element is visited, not just fields, so that protocol markers
    // advance the block index even though they don't produce a field
    for node in doc.descendants().filter(Node::is_element) {
        match node.tag_name().name() {
            PROTOCOL_FIELD => {
                block_index += BLOCK_STEP;
            }
            FIELD => {
                let Some(header) = node.attribute("header") else {
                    log::debug!(
                        "skipping field without a header at byte {}",
                        node.range().start
                    );
                    continue;
                };

                if !header.starts_with(prefix.as_str()) {
                    continue;
                }

                let section = if kind == SchemaKind::Investigation {
                    let section = node
                        .attribute("section")
                        .with_context(|| format!("field '{header}' has no section"))?;
                    Some(section.to_owned())
                } else {
                    None
                };

                fields.push(FieldDescriptor {
                    header: header.to_owned(),
                    prefix,
                    required: node.attribute("is-required") == Some("true"),
                    section,
                    content: text_content(node),
                    description: child_text(node, DESCRIPTION),
                    default_value: child_text(node, DEFAULT_VALUE),
                    block_index: kind.tracks_block_index().then_some(block_index),
                });
            }
            _ => {}
        }
    }

    Ok(fields)
}

/// Concatenation of every text node below `node`, CDATA included
fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect()
}

fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == name)
        .map(text_content)
}
