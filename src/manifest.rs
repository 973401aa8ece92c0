//! Manifest (`module.xml`) generation.
//!
//! The manifest is first assembled as an ordered [`Element`] tree from the
//! descriptor, then serialized. Building never fails: all caller-supplied
//! text goes through XML escaping.

use indexmap::IndexMap;

use crate::descriptor::{ModuleDescriptor, ModuleKind};

/// Namespace the host resolves UCP hook classes in.
pub const HOOK_NAMESPACE: &str = "FreePBX\\Modules";

/// UCP lifecycle events and the module method answering each.
pub const UCP_HOOKS: [(&str, &str); 7] = [
    ("constructModuleConfigPages", "ucpConfigPage"),
    ("addUser", "ucpAddUser"),
    ("updateUser", "ucpUpdateUser"),
    ("delUser", "ucpDelUser"),
    ("addGroup", "ucpAddGroup"),
    ("updateGroup", "ucpUpdateGroup"),
    ("delGroup", "ucpDelGroup"),
];

const PRIMARY_PUBLISHER: &str = "Generated Module";
const PRIMARY_SUPPORTED: &str = "13.0";
const UCP_PUBLISHER: &str = "Sangoma Technologies Corporation";
const UCP_REPO: &str = "standard";
const UCP_CATEGORY: &str = "Applications";
const UCP_SUPPORTED: &str = "14.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Children(Vec<Element>),
}

/// An XML element with ordered attributes and either text or children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub content: Content,
}

impl Element {
    pub fn leaf(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self { name: name.into(), attributes: IndexMap::new(), content: Content::Text(text.into()) }
    }

    pub fn parent(name: impl Into<String>, children: Vec<Element>) -> Self {
        Self { name: name.into(), attributes: IndexMap::new(), content: Content::Children(children) }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Child elements; empty for text nodes.
    pub fn children(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            Content::Text(_) => &[],
        }
    }

    /// First child named `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children().iter().find(|child| child.name == name)
    }

    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(text),
            Content::Children(_) => None,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// The two manifest layouts the host understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestShape {
    Primary,
    Ucp,
}

impl ManifestShape {
    pub fn for_kind(kind: ModuleKind) -> Self {
        match kind {
            ModuleKind::PrimaryOnly => ManifestShape::Primary,
            ModuleKind::SecondaryOnly | ModuleKind::Both => ManifestShape::Ucp,
        }
    }
}

/// Builds the manifest tree for `descriptor`.
pub fn manifest_tree(descriptor: &ModuleDescriptor) -> Element {
    match ManifestShape::for_kind(descriptor.kind()) {
        ManifestShape::Primary => primary_tree(descriptor),
        ManifestShape::Ucp => ucp_tree(descriptor),
    }
}

/// Builds and serializes the manifest for `descriptor`.
pub fn build(descriptor: &ModuleDescriptor) -> Vec<u8> {
    to_xml(&manifest_tree(descriptor)).into_bytes()
}

fn changelog(descriptor: &ModuleDescriptor) -> String {
    format!("*{}* Initial release", descriptor.version())
}

fn menuitems(descriptor: &ModuleDescriptor) -> Element {
    Element::parent(
        "menuitems",
        vec![Element::leaf(descriptor.rawname(), descriptor.display_name())],
    )
}

fn primary_tree(descriptor: &ModuleDescriptor) -> Element {
    Element::parent(
        "module",
        vec![
            Element::leaf("rawname", descriptor.rawname()),
            Element::leaf("name", descriptor.display_name()),
            Element::leaf("version", descriptor.version()),
            Element::leaf("publisher", PRIMARY_PUBLISHER),
            Element::leaf("license", descriptor.license().as_str()),
            Element::leaf("changelog", changelog(descriptor)),
            Element::leaf("category", descriptor.category().as_str()),
            Element::leaf("description", descriptor.description()),
            menuitems(descriptor),
            Element::leaf("supported", PRIMARY_SUPPORTED),
        ],
    )
}

fn ucp_tree(descriptor: &ModuleDescriptor) -> Element {
    let license = descriptor.license();
    Element::parent(
        "module",
        vec![
            Element::leaf("rawname", descriptor.rawname()),
            Element::leaf("repo", UCP_REPO),
            Element::leaf("name", format!("UCP {}", descriptor.display_name())),
            Element::leaf("description", descriptor.description()),
            Element::leaf("category", UCP_CATEGORY),
            Element::leaf("version", descriptor.version()),
            Element::leaf("publisher", UCP_PUBLISHER),
            Element::leaf("license", license.as_str()),
            Element::leaf("licenselink", license.link()),
            Element::leaf("changelog", changelog(descriptor)),
            menuitems(descriptor),
            hooks(descriptor),
            Element::parent("supported", vec![Element::leaf("version", UCP_SUPPORTED)]),
        ],
    )
}

fn hooks(descriptor: &ModuleDescriptor) -> Element {
    let class = descriptor.display_name();
    let events = UCP_HOOKS
        .iter()
        .map(|&(event, callback)| {
            let method = Element::leaf("method", callback)
                .with_attribute("namespace", HOOK_NAMESPACE)
                .with_attribute("class", class.as_str())
                .with_attribute("callingMethod", event);
            Element::parent(event, vec![method]).with_attribute("class", "Ucp")
        })
        .collect();
    Element::parent("hooks", vec![Element::parent("ucp", events)])
}

/// Serializes `root` as indented XML without a declaration line.
pub fn to_xml(root: &Element) -> String {
    let mut out = String::new();
    write_element(&mut out, root, 0);
    out
}

fn write_element(out: &mut String, element: &Element, depth: usize) {
    let indent = "  ".repeat(depth);
    out.push_str(&indent);
    out.push('<');
    out.push_str(&element.name);
    for (name, value) in &element.attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attribute(value));
        out.push('"');
    }

    match &element.content {
        Content::Text(text) if text.is_empty() => out.push_str("/>\n"),
        Content::Children(children) if children.is_empty() => out.push_str("/>\n"),
        Content::Text(text) => {
            out.push('>');
            out.push_str(&escape_text(text));
            out.push_str("</");
            out.push_str(&element.name);
            out.push_str(">\n");
        }
        Content::Children(children) => {
            out.push_str(">\n");
            for child in children {
                write_element(out, child, depth + 1);
            }
            out.push_str(&indent);
            out.push_str("</");
            out.push_str(&element.name);
            out.push_str(">\n");
        }
    }
}

/// Characters XML 1.0 allows in a document.
fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Escapes element text. `\r` is written as a reference so parsers do not
/// normalize it away.
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars().filter(|c| is_xml_char(*c)) {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '\r' => result.push_str("&#13;"),
            c => result.push(c),
        }
    }
    result
}

/// Escapes attribute values, including the whitespace attribute-value
/// normalization would otherwise collapse.
pub fn escape_attribute(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars().filter(|c| is_xml_char(*c)) {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\t' => result.push_str("&#9;"),
            '\n' => result.push_str("&#10;"),
            '\r' => result.push_str("&#13;"),
            c => result.push(c),
        }
    }
    result
}
