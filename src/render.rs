//! Markdown page rendering for class documents and the README index.

use crate::markup::MarkupRewriter;
use crate::model::*;
use crate::registry::ClassRegistry;

/// Render one class page.
///
/// Sections appear in a fixed order and only when their collection is
/// non-empty. Items keep the order they had in the source file.
pub fn render_class(doc: &Document, classes: &ClassRegistry) -> String {
    let markup = MarkupRewriter::new(doc, classes);
    let mut output = String::new();

    let brief = markup.to_markdown(&doc.brief_description);
    let description = markup.to_markdown(&doc.description);

    output.push_str(&format!("# Class: {}\n\n", doc.class_name));
    output.push_str(&format!("Inherits: *{}*\n\n", doc.inherits));
    output.push_str(&format!("**{}**\n\n", brief.trim()));
    output.push_str("## Description\n\n");
    output.push_str(&description);
    output.push('\n');

    if !doc.tutorials.is_empty() {
        output.push_str("## Online Tutorials\n\n");
        for tutorial in &doc.tutorials {
            output.push_str(&format!("- {}\n", tutorial.link()));
        }
        output.push('\n');
    }

    if !doc.members.is_empty() {
        output.push_str("## Properties\n\n");
        for member in doc.members.values() {
            output.push_str(&format!("- {}\n", member_index_entry(member)));
        }
        output.push('\n');
    }

    if !doc.methods.is_empty() {
        output.push_str("## Methods\n\n");
        for method in doc.methods.values() {
            output.push_str(&format!("- {}\n", method_index_entry(method)));
        }
        output.push('\n');
    }

    let (enums, plain): (Vec<_>, Vec<_>) =
        doc.constant_groups().into_iter().partition(ConstantGroup::is_enum);

    if !enums.is_empty() {
        output.push_str("## Enumerations\n\n");
        for group in &enums {
            output.push_str(&format!("### enum `{}`\n\n", group.name));
            render_constants(&mut output, group, &markup);
            output.push('\n');
        }
    }

    if !plain.is_empty() {
        output.push_str("## Constants\n\n");
        for group in &plain {
            render_constants(&mut output, group, &markup);
            output.push('\n');
        }
    }

    if !doc.members.is_empty() {
        output.push_str("## Property Descriptions\n\n");
        for member in doc.members.values() {
            output.push_str(&format!("### {}\n\n", member.signature));
            if !member.default.is_empty() {
                output.push_str(&format!("*Default*: `{}`\n\n", member.default));
            }
            if !member.setter.is_empty() {
                output.push_str(&format!("*Setter*: `{}`\n\n", member.setter));
            }
            if !member.getter.is_empty() {
                output.push_str(&format!("*Getter*: `{}`\n\n", member.getter));
            }
            output.push_str(&markup.to_markdown(&member.description));
            output.push('\n');
        }
        output.push('\n');
    }

    if !doc.methods.is_empty() {
        output.push_str("## Method Descriptions\n\n");
        for method in doc.methods.values() {
            output.push_str(&format!("### {}\n\n", method.signature));
            output.push_str(&markup.to_markdown(&method.description));
            output.push('\n');
        }
        output.push('\n');
    }

    output
}

/// `*type* [**`name`**](#anchor)`
fn member_index_entry(member: &Member) -> String {
    format!(
        "*{}* [**`{}`**](#{})",
        member.type_name, member.name, member.anchor
    )
}

/// `*return* [**`name`**](#anchor)(args) qualifiers`
fn method_index_entry(method: &Method) -> String {
    format!(
        "*{}* [**`{}`**](#{})({}){}",
        method.return_type,
        method.name,
        method.anchor,
        method.args(),
        method.qualifiers
    )
}

/// List entries for one constant group, each with its description nested below.
fn render_constants(output: &mut String, group: &ConstantGroup, markup: &MarkupRewriter) {
    for constant in &group.constants {
        let description = markup.to_markdown(&constant.description);
        output.push_str(&format!("- `{}` = `{}`\n", constant.name, constant.value));
        output.push_str(&format!("\t- {}\n", description.trim()));
    }
}

/// Render `README.md`: every registered class, sorted by name.
pub fn render_index(classes: &ClassRegistry) -> String {
    let mut output = String::from("# Classes\n\n");
    for (name, file) in classes.iter() {
        output.push_str(&format!("- [`{}`]({})\n", name, file));
    }
    output
}
