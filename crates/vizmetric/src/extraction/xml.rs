//! Namespace-agnostic view over parsed workbook markup.
//!
//! Workbooks produced by different Tableau versions mix namespaced and plain elements
//! (`<user:mark>` next to `<mark>`). [`XmlNode`] compares tags by their local name only, so
//! the heuristics never see a `{namespace}` prefix.
//!
//! # Example
//!
//! ```rust
//! use vizmetric::extraction::xml::WorkbookDocument;
//!
//! # fn example() -> vizmetric::Result<()> {
//! let xml = r#"<workbook><worksheets><worksheet name="Sales"/></worksheets></workbook>"#;
//! let doc = WorkbookDocument::parse(xml)?;
//!
//! let names: Vec<_> = doc.root().find_all("worksheet").filter_map(|ws| ws.attr("name")).collect();
//! assert_eq!(names, vec!["Sales"]);
//! # Ok(())
//! # }
//! ```
use crate::error::Result;

/// Parsed, immutable workbook markup.
pub struct WorkbookDocument<'input> {
    doc: roxmltree::Document<'input>,
}

impl<'input> WorkbookDocument<'input> {
    /// Parse workbook markup.
    ///
    /// A leading byte-order mark is ignored and DTDs are tolerated.
    ///
    /// # Errors
    ///
    /// Returns `VizmetricError::Parsing` if the text is not well-formed XML.
    pub fn parse(text: &'input str) -> Result<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let doc = roxmltree::Document::parse_with_options(text, options)?;
        Ok(Self { doc })
    }

    /// The document element (`<workbook>` for well-formed workbooks).
    pub fn root(&self) -> XmlNode<'_, 'input> {
        XmlNode {
            node: self.doc.root_element(),
        }
    }
}

/// An element in a [`WorkbookDocument`].
#[derive(Debug, Clone, Copy)]
pub struct XmlNode<'a, 'input> {
    node: roxmltree::Node<'a, 'input>,
}

impl<'a, 'input> XmlNode<'a, 'input> {
    /// Tag name with any namespace stripped.
    pub fn local_name(&self) -> &'a str {
        self.node.tag_name().name()
    }

    pub fn attr(&self, key: &str) -> Option<&'a str> {
        self.node.attribute(key)
    }

    /// Attribute value, treating an empty string as absent.
    pub fn non_empty_attr(&self, key: &str) -> Option<&'a str> {
        self.attr(key).filter(|v| !v.is_empty())
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.node.has_attribute(key)
    }

    /// Text before the first child element, if any.
    pub fn text(&self) -> Option<&'a str> {
        self.node.text()
    }

    /// This element and every element below it, in document order.
    pub fn descendants(self) -> impl Iterator<Item = XmlNode<'a, 'input>> {
        self.node
            .descendants()
            .filter(|n| n.is_element())
            .map(|node| XmlNode { node })
    }

    /// Direct child elements.
    pub fn children(self) -> impl Iterator<Item = XmlNode<'a, 'input>> {
        self.node
            .children()
            .filter(|n| n.is_element())
            .map(|node| XmlNode { node })
    }

    /// Every element strictly below this one whose local name is `tag`.
    pub fn find_all(self, tag: &str) -> impl Iterator<Item = XmlNode<'a, 'input>> {
        self.descendants().skip(1).filter(move |n| n.local_name() == tag)
    }

    /// First element strictly below this one whose local name is `tag`.
    pub fn find_first(self, tag: &str) -> Option<XmlNode<'a, 'input>> {
        self.find_all(tag).next()
    }

    pub fn has_descendant(self, tag: &str) -> bool {
        self.find_first(tag).is_some()
    }

    /// Resolve a relative `/`-separated path below this element.
    ///
    /// The first segment matches at any depth, every following segment matches direct
    /// children only, so `"parameters/parameter"` finds `<parameter>` elements whose parent
    /// is a `<parameters>` element anywhere below.
    pub fn find_path(self, path: &str) -> Vec<XmlNode<'a, 'input>> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let Some(first) = segments.next() else {
            return Vec::new();
        };

        let mut current: Vec<XmlNode<'a, 'input>> = self.find_all(first).collect();
        for segment in segments {
            current = current
                .into_iter()
                .flat_map(|n| n.children().filter(move |c| c.local_name() == segment))
                .collect();
        }
        current
    }
}
