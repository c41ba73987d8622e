//! Data model for a parsed class reference document.

use indexmap::IndexMap;

/// Complete parsed document from a single class XML file.
#[derive(Debug, Default)]
pub struct Document {
    pub class_name: String,
    /// Parent class (`inherits` attribute)
    pub inherits: String,
    /// Raw markup from `<brief_description>`
    pub brief_description: String,
    /// Raw markup from `<description>`
    pub description: String,
    pub tutorials: Vec<Tutorial>,
    /// Keyed by name, in source order
    pub members: IndexMap<String, Member>,
    pub methods: IndexMap<String, Method>,
    pub constants: IndexMap<String, Constant>,
}

impl Document {
    /// Re-bucket constants by enumeration name, in first-seen order.
    ///
    /// The group with an empty name holds plain constants.
    pub fn constant_groups(&self) -> Vec<ConstantGroup<'_>> {
        let mut groups: IndexMap<&str, Vec<&Constant>> = IndexMap::new();
        for constant in self.constants.values() {
            groups.entry(constant.enumeration.as_str()).or_default().push(constant);
        }
        groups
            .into_iter()
            .map(|(name, constants)| ConstantGroup { name, constants })
            .collect()
    }
}

/// `<tutorials><link title="...">url</link></tutorials>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tutorial {
    pub title: String,
    pub url: String,
}

impl Tutorial {
    pub fn link(&self) -> String {
        format!("[{}]({})", self.title, self.url)
    }
}

/// A class property (`<members><member>`).
#[derive(Debug, Clone, Default)]
pub struct Member {
    pub name: String,
    pub type_name: String,
    /// `` `type name` ``
    pub signature: String,
    pub anchor: String,
    pub setter: String,
    pub getter: String,
    pub default: String,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct Method {
    pub name: String,
    /// Empty, or the qualifiers with a leading space (e.g. `" const"`)
    pub qualifiers: String,
    pub return_type: String,
    pub params: Vec<Parameter>,
    /// `` `returnType name(args) qualifiers` ``
    pub signature: String,
    pub anchor: String,
    pub description: String,
}

impl Method {
    /// Parameters joined as they appear inside the parentheses.
    pub fn args(&self) -> String {
        self.params
            .iter()
            .map(Parameter::display)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub type_name: String,
    pub default: String,
}

impl Parameter {
    /// `name: type` or `name: type = default`
    pub fn display(&self) -> String {
        if self.default.is_empty() {
            format!("{}: {}", self.name, self.type_name)
        } else {
            format!("{}: {} = {}", self.name, self.type_name, self.default)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Constant {
    pub name: String,
    pub value: String,
    /// Enumeration name; empty for a plain constant
    pub enumeration: String,
    pub description: String,
}

/// Constants sharing one `enum` attribute value. Derived, never stored.
#[derive(Debug)]
pub struct ConstantGroup<'a> {
    pub name: &'a str,
    pub constants: Vec<&'a Constant>,
}

impl ConstantGroup<'_> {
    pub fn is_enum(&self) -> bool {
        !self.name.is_empty()
    }
}
