//! Entity extraction: class XML to [`Document`].
//!
//! Reads are lenient: a missing attribute or child yields an empty string.
//! Only malformed XML is an error.

pub mod xml;

use crate::anchor::name_to_anchor;
use crate::model::*;
use anyhow::Result;
use self::xml::Element;

/// Parse one class reference file.
pub fn parse_document(content: &str) -> Result<Document> {
    let root = xml::parse(content)?;
    Ok(extract(&root))
}

fn extract(root: &Element) -> Document {
    let mut doc = Document {
        class_name: root.attr("name").to_string(),
        inherits: root.attr("inherits").to_string(),
        brief_description: root.child_text("brief_description").to_string(),
        description: root.child_text("description").to_string(),
        ..Document::default()
    };

    doc.tutorials = root
        .find_all("tutorials/link")
        .into_iter()
        .map(extract_tutorial)
        .collect();

    for element in root.find_all("members/member") {
        let member = extract_member(element);
        doc.members.insert(member.name.clone(), member);
    }
    for element in root.find_all("methods/method") {
        let method = extract_method(element);
        doc.methods.insert(method.name.clone(), method);
    }
    for element in root.find_all("constants/constant") {
        let constant = extract_constant(element);
        doc.constants.insert(constant.name.clone(), constant);
    }

    doc
}

fn extract_tutorial(element: &Element) -> Tutorial {
    Tutorial {
        title: element.attr("title").to_string(),
        url: element.text().trim().to_string(),
    }
}

fn extract_member(element: &Element) -> Member {
    let name = element.attr("name").to_string();
    let type_name = element.attr("type").to_string();
    let signature = format!("`{} {}`", type_name, name);
    let anchor = name_to_anchor(&signature);

    Member {
        setter: element.attr("setter").to_string(),
        getter: element.attr("getter").to_string(),
        default: element.attr("default").to_string(),
        description: element.text().to_string(),
        name,
        type_name,
        signature,
        anchor,
    }
}

fn extract_method(element: &Element) -> Method {
    let name = element.attr("name").to_string();
    let qualifiers = match element.attr("qualifiers") {
        "" => String::new(),
        q => format!(" {}", q),
    };
    let return_type = element
        .child("return")
        .map(|r| r.attr("type"))
        .unwrap_or("")
        .to_string();
    let params: Vec<Parameter> = element.children("param").map(extract_param).collect();

    let mut method = Method {
        name,
        qualifiers,
        return_type,
        params,
        description: element.child_text("description").to_string(),
        ..Method::default()
    };
    method.signature = format!(
        "`{} {}({}){}`",
        method.return_type,
        method.name,
        method.args(),
        method.qualifiers
    );
    method.anchor = name_to_anchor(&method.signature);
    method
}

fn extract_param(element: &Element) -> Parameter {
    Parameter {
        name: element.attr("name").to_string(),
        type_name: element.attr("type").to_string(),
        default: element.attr("default").to_string(),
    }
}

fn extract_constant(element: &Element) -> Constant {
    Constant {
        name: element.attr("name").to_string(),
        value: element.attr("value").to_string(),
        enumeration: element.attr("enum").to_string(),
        description: element.text().to_string(),
    }
}
