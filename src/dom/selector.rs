//! Simple CSS selectors.
//!
//! Supported: type selectors, `*`, `#id`, `.class`, `[attr]`, `[attr=value]`
//! (value bare, single or double quoted), compounds of those, and the
//! descendant combinator. Anything else is reported as
//! [`Error::UnsupportedSelector`], which the controller treats as "no match"
//! (a mount parent then falls back to the body).

use crate::dom::NodeId;
use crate::error::{Error, Result};

/// Read access to an element tree, as needed for matching.
pub trait ElementView {
    /// Lower-cased tag name, or `None` if the node is not an element.
    fn tag_name(&self, node: NodeId) -> Option<&str>;
    /// Raw attribute value.
    fn attribute_value(&self, node: NodeId, name: &str) -> Option<&str>;
    /// Parent node, if any.
    fn parent_node(&self, node: NodeId) -> Option<NodeId>;
}

/// A parsed selector: compounds joined by descendant combinators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    compounds: Vec<Compound>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeCondition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttributeCondition {
    name: String,
    value: Option<String>,
}

impl Selector {
    /// Parses `input`.
    pub fn parse(input: &str) -> Result<Self> {
        let unsupported = || Error::UnsupportedSelector(input.to_string());
        let chars: Vec<char> = input.trim().chars().collect();

        let mut compounds = Vec::new();
        let mut current = Compound::default();
        let mut in_compound = false;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if c.is_whitespace() {
                if in_compound {
                    compounds.push(std::mem::take(&mut current));
                    in_compound = false;
                }
                i += 1;
            } else if c == '*' {
                if in_compound {
                    return Err(unsupported());
                }
                in_compound = true;
                i += 1;
            } else if c == '#' || c == '.' {
                let (ident, next) = read_ident(&chars, i + 1);
                if ident.is_empty() {
                    return Err(unsupported());
                }
                if c == '#' {
                    current.id = Some(ident);
                } else {
                    current.classes.push(ident);
                }
                in_compound = true;
                i = next;
            } else if c == '[' {
                let (condition, next) = read_attribute(&chars, i + 1).ok_or_else(unsupported)?;
                current.attributes.push(condition);
                in_compound = true;
                i = next;
            } else if is_ident_char(c) {
                if in_compound {
                    return Err(unsupported());
                }
                let (ident, next) = read_ident(&chars, i);
                current.tag = Some(ident.to_ascii_lowercase());
                in_compound = true;
                i = next;
            } else {
                return Err(unsupported());
            }
        }

        if in_compound {
            compounds.push(current);
        }
        if compounds.is_empty() {
            return Err(unsupported());
        }
        Ok(Self { compounds })
    }

    /// Whether `node` matches this selector within `view`.
    pub fn matches<V: ElementView + ?Sized>(&self, view: &V, node: NodeId) -> bool {
        let Some((last, ancestors)) = self.compounds.split_last() else {
            return false;
        };
        if !last.matches(view, node) {
            return false;
        }

        let mut cursor = view.parent_node(node);
        for compound in ancestors.iter().rev() {
            loop {
                let Some(candidate) = cursor else {
                    return false;
                };
                cursor = view.parent_node(candidate);
                if compound.matches(view, candidate) {
                    break;
                }
            }
        }
        true
    }
}

impl Compound {
    fn matches<V: ElementView + ?Sized>(&self, view: &V, node: NodeId) -> bool {
        let Some(tag) = view.tag_name(node) else {
            return false;
        };
        if self.tag.as_deref().is_some_and(|wanted| wanted != tag) {
            return false;
        }
        if let Some(id) = &self.id {
            if view.attribute_value(node, "id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.is_empty() {
            let classes = view.attribute_value(node, "class").unwrap_or_default();
            if !self
                .classes
                .iter()
                .all(|wanted| classes.split_whitespace().any(|class| class == wanted))
            {
                return false;
            }
        }
        self.attributes.iter().all(|condition| {
            match (view.attribute_value(node, &condition.name), &condition.value) {
                (None, _) => false,
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => actual == expected,
            }
        })
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn read_ident(chars: &[char], start: usize) -> (String, usize) {
    let mut end = start;
    while end < chars.len() && is_ident_char(chars[end]) {
        end += 1;
    }
    (chars[start..end].iter().collect(), end)
}

fn skip_whitespace(chars: &[char], mut i: usize) -> usize {
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    i
}

/// Parses the inside of `[...]`, starting right after the bracket.
fn read_attribute(chars: &[char], start: usize) -> Option<(AttributeCondition, usize)> {
    let i = skip_whitespace(chars, start);
    let (name, i) = read_ident(chars, i);
    if name.is_empty() {
        return None;
    }
    let name = name.to_ascii_lowercase();
    let mut i = skip_whitespace(chars, i);

    let value = match chars.get(i)? {
        ']' => None,
        '=' => {
            i = skip_whitespace(chars, i + 1);
            let value = match chars.get(i)? {
                quote @ ('"' | '\'') => {
                    let close = chars[i + 1..].iter().position(|c| c == quote)?;
                    let value: String = chars[i + 1..i + 1 + close].iter().collect();
                    i += close + 2;
                    value
                }
                _ => {
                    let (value, next) = read_ident(chars, i);
                    if value.is_empty() {
                        return None;
                    }
                    i = next;
                    value
                }
            };
            i = skip_whitespace(chars, i);
            Some(value)
        }
        _ => return None,
    };

    if chars.get(i) != Some(&']') {
        return None;
    }
    Some((AttributeCondition { name, value }, i + 1))
}
