//! SVG optimization passes.
//!
//! Optimization never touches its input: every pass rebuilds the nodes it
//! keeps, so a parsed tree can be optimized again with other options.

use crate::ast::*;
use crate::log;
use crate::options::OptimizerOptions;

/// `fill` values equal to the SVG initial value.
const DEFAULT_FILLS: [&str; 3] = ["black", "#000", "#000000"];

/// `stroke` values equal to the SVG initial value.
const DEFAULT_STROKES: [&str; 1] = ["none"];

/// Transforms that translate by zero.
const NOOP_TRANSFORMS: [&str; 3] = ["translate(0,0)", "translate(0 0)", "translate(0, 0)"];

/// Apply all enabled optimizations and return the optimized tree.
pub fn optimize(ast: &SvgAst, options: &OptimizerOptions) -> SvgAst {
    let root = optimize_element(&ast.root, options);

    log::debug!(
        removed_nodes = ast.root.node_count() - root.node_count(),
        removed_attributes = ast.root.attribute_count() - root.attribute_count(),
        "optimized svg"
    );

    SvgAst {
        root,
        metadata: ast.metadata.clone(),
    }
}

fn optimize_element(elem: &SvgElement, options: &OptimizerOptions) -> SvgElement {
    let attributes = elem
        .attributes
        .iter()
        .filter(|attr| !options.remove_data_attrs || !is_data_attr(attr))
        .filter(|attr| !options.remove_ids || !is_id_attr(attr))
        .filter(|attr| !options.remove_default_attrs || !is_default_attr(attr))
        .filter(|attr| !options.optimize_transforms || !is_noop_transform(attr))
        .cloned()
        .collect();

    let mut children: Vec<SvgNode> = elem
        .children
        .iter()
        .map(|child| match child {
            SvgNode::Element(e) => SvgNode::Element(optimize_element(e, options)),
            SvgNode::Text(text) => SvgNode::Text(text.clone()),
        })
        .collect();

    // Children are already optimized, so groups emptied below collapse too.
    if options.remove_empty_groups {
        children.retain(|child| !is_empty_group(child));
    }

    SvgElement {
        tag_name: elem.tag_name.clone(),
        attributes,
        children,
    }
}

fn is_data_attr(attr: &SvgAttribute) -> bool {
    attr.name.starts_with("data-")
}

fn is_id_attr(attr: &SvgAttribute) -> bool {
    attr.name == "id"
}

fn is_default_attr(attr: &SvgAttribute) -> bool {
    let defaults: &[&str] = match attr.name.as_str() {
        "fill" => &DEFAULT_FILLS,
        "stroke" => &DEFAULT_STROKES,
        _ => return false,
    };
    let value = attr.value.to_lowercase();
    defaults.contains(&value.as_str())
}

fn is_noop_transform(attr: &SvgAttribute) -> bool {
    attr.name == "transform" && NOOP_TRANSFORMS.contains(&attr.value.trim())
}

fn is_empty_group(node: &SvgNode) -> bool {
    matches!(node, SvgNode::Element(e) if e.is("g") && e.children.is_empty())
}
