//! Page document wrapper.
//!
//! `PageDocument` owns the parsed HTML tree for one page and exposes the
//! operations the engine needs: selector queries in document order, subtree
//! snapshot/append, detach, and attribute/class/inline-style editing. All
//! other modules work with `NodeId` handles and never touch the tree-walking
//! API directly.

use ego_tree::{NodeId, NodeMut, NodeRef};
use html5ever::{LocalName, Namespace, QualName};
use scraper::{ElementRef, Html, Node, Selector};

/// An owned, detached copy of a subtree, used to move content around the
/// document without aliasing the live tree.
#[derive(Debug, Clone)]
pub struct Subtree {
    value: Node,
    children: Vec<Subtree>,
}

impl Subtree {
    fn capture(node: NodeRef<'_, Node>) -> Self {
        Self {
            value: node.value().clone(),
            children: node.children().map(Self::capture).collect(),
        }
    }
}

/// A mutable HTML page.
pub struct PageDocument {
    html: Html,
}

impl PageDocument {
    /// Parses a full HTML document. The parser synthesizes `html`/`body`
    /// elements when the input omits them.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// The `<html>` element.
    pub fn root_element_id(&self) -> NodeId {
        self.html.root_element().id()
    }

    /// The `<body>` element, if present.
    pub fn body_id(&self) -> Option<NodeId> {
        self.html
            .root_element()
            .children()
            .find(|child| {
                child
                    .value()
                    .as_element()
                    .is_some_and(|el| el.name() == "body")
            })
            .map(|node| node.id())
    }

    // ─── Queries ───

    /// All elements matching `selector`, in document order.
    pub fn select_ids(&self, selector: &Selector) -> Vec<NodeId> {
        self.html.select(selector).map(|el| el.id()).collect()
    }

    /// Descendants of `root` matching `selector`, in document order. The root
    /// itself is never included.
    pub fn select_ids_within(&self, root: NodeId, selector: &Selector) -> Vec<NodeId> {
        let Some(element) = self.element(root) else {
            return Vec::new();
        };
        element.select(selector).map(|el| el.id()).collect()
    }

    /// Whether the element itself matches `selector`.
    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        self.element(id)
            .map(|el| selector.matches(&el))
            .unwrap_or(false)
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.node(id)
            .map(|node| node.value().is_element())
            .unwrap_or(false)
    }

    /// Text of a text node, `None` for any other node kind.
    pub fn node_text(&self, id: NodeId) -> Option<String> {
        self.node(id)?.value().as_text().map(|t| t.text.to_string())
    }

    pub fn child_ids(&self, id: NodeId) -> Vec<NodeId> {
        match self.node(id) {
            Some(node) => node.children().map(|c| c.id()).collect(),
            None => Vec::new(),
        }
    }

    /// Nearest element ancestor.
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.node(id)?.parent()?;
        if parent.value().is_element() {
            Some(parent.id())
        } else {
            None
        }
    }

    /// Serialized markup of the element's children.
    pub fn inner_html(&self, id: NodeId) -> Option<String> {
        self.element(id).map(|el| el.inner_html())
    }

    // ─── Structure edits ───

    /// Unlinks the node from its parent. The node stays in the arena for the
    /// lifetime of the document; its id must not be reused afterwards.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(mut node) = self.html.tree.get_mut(id) {
            node.detach();
        }
    }

    pub fn clear_children(&mut self, id: NodeId) {
        for child in self.child_ids(id) {
            self.detach(child);
        }
    }

    /// Captures an owned copy of the subtree rooted at `id`.
    pub fn snapshot_subtree(&self, id: NodeId) -> Option<Subtree> {
        self.node(id).map(Subtree::capture)
    }

    /// Appends a captured subtree as the last child of `parent`, returning
    /// the id of the copy's root.
    pub fn append_subtree(&mut self, parent: NodeId, subtree: &Subtree) -> Option<NodeId> {
        let mut parent_node = self.html.tree.get_mut(parent)?;
        let mut root = parent_node.append(subtree.value.clone());
        let id = root.id();
        append_children(&mut root, &subtree.children);
        Some(id)
    }

    /// Parses `fragment` and appends its top-level nodes as children of
    /// `parent`, returning the ids of the appended roots.
    pub fn append_fragment(&mut self, parent: NodeId, fragment: &str) -> Vec<NodeId> {
        let parsed = Html::parse_fragment(fragment);
        let subtrees: Vec<Subtree> = parsed
            .root_element()
            .children()
            .map(Subtree::capture)
            .collect();
        subtrees
            .iter()
            .filter_map(|subtree| self.append_subtree(parent, subtree))
            .collect()
    }

    /// Replaces the element's children with parsed `fragment` content.
    pub fn set_inner_html(&mut self, id: NodeId, fragment: &str) {
        self.clear_children(id);
        self.append_fragment(id, fragment);
    }

    // ─── Attributes and classes ───

    pub fn attr(&self, id: NodeId, name: &str) -> Option<String> {
        self.node(id)?
            .value()
            .as_element()?
            .attr(name)
            .map(str::to_string)
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(mut node) = self.html.tree.get_mut(id) {
            if let Node::Element(el) = node.value() {
                el.attrs.insert(attr_name(name), value.into());
            }
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attr(id, "class")
            .is_some_and(|classes| classes.split_whitespace().any(|token| token == class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if self.has_class(id, class) {
            return;
        }
        let classes = match self.attr(id, "class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing, class),
            _ => class.to_string(),
        };
        self.set_attr(id, "class", &classes);
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        let Some(existing) = self.attr(id, "class") else {
            return;
        };
        let remaining: Vec<&str> = existing
            .split_whitespace()
            .filter(|token| *token != class)
            .collect();
        self.set_attr(id, "class", &remaining.join(" "));
    }

    /// Overwrites the class list wholesale.
    pub fn set_classes(&mut self, id: NodeId, classes: &str) {
        self.set_attr(id, "class", classes);
    }

    // ─── Inline style ───

    /// Reads one property from the element's inline style, with any
    /// `!important` marker stripped from the value.
    pub fn style_property(&self, id: NodeId, property: &str) -> Option<String> {
        self.style_declarations(id)
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(property))
            .map(|(_, value)| strip_important(&value).to_string())
    }

    pub fn set_style_property(&mut self, id: NodeId, property: &str, value: &str, important: bool) {
        let mut declarations = self.style_declarations(id);
        declarations.retain(|(name, _)| !name.eq_ignore_ascii_case(property));
        let value = if important {
            format!("{} !important", value)
        } else {
            value.to_string()
        };
        declarations.push((property.to_string(), value));
        self.write_style(id, &declarations);
    }

    pub fn remove_style_property(&mut self, id: NodeId, property: &str) {
        let mut declarations = self.style_declarations(id);
        declarations.retain(|(name, _)| !name.eq_ignore_ascii_case(property));
        self.write_style(id, &declarations);
    }

    fn style_declarations(&self, id: NodeId) -> Vec<(String, String)> {
        let Some(style) = self.attr(id, "style") else {
            return Vec::new();
        };
        style
            .split(';')
            .filter_map(|decl| {
                let (name, value) = decl.split_once(':')?;
                let name = name.trim();
                let value = value.trim();
                if name.is_empty() || value.is_empty() {
                    return None;
                }
                Some((name.to_string(), value.to_string()))
            })
            .collect()
    }

    fn write_style(&mut self, id: NodeId, declarations: &[(String, String)]) {
        let style = declarations
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect::<Vec<_>>()
            .join("; ");
        self.set_attr(id, "style", &style);
    }

    // ─── Internal ───

    fn node(&self, id: NodeId) -> Option<NodeRef<'_, Node>> {
        self.html.tree.get(id)
    }

    fn element(&self, id: NodeId) -> Option<ElementRef<'_>> {
        self.node(id).and_then(ElementRef::wrap)
    }
}

fn append_children(node: &mut NodeMut<'_, Node>, children: &[Subtree]) {
    for child in children {
        let mut appended = node.append(child.value.clone());
        append_children(&mut appended, &child.children);
    }
}

/// Attributes parsed from HTML live in the empty namespace.
fn attr_name(name: &str) -> QualName {
    QualName::new(None, Namespace::default(), LocalName::from(name))
}

fn strip_important(value: &str) -> &str {
    value
        .strip_suffix("!important")
        .map(str::trim_end)
        .unwrap_or(value)
}
