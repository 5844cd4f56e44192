//! JSX generation from the SVG tree.

use crate::ast::*;
use crate::options::GeneratorOptions;
use crate::template::render_template;

/// Indentation depth of the root element inside the component body.
const BASE_DEPTH: usize = 2;

/// Generate the full component source for `ast`.
pub fn generate_tsx(ast: &SvgAst, options: &GeneratorOptions) -> String {
    let svg_content = element_to_jsx(&ast.root, options, 0);
    render_template(&svg_content, options)
}

/// Render the root element alone, without the component skeleton.
pub fn generate_jsx(ast: &SvgAst, options: &GeneratorOptions) -> String {
    element_to_jsx(&ast.root, options, 0)
}

fn node_to_jsx(node: &SvgNode, options: &GeneratorOptions, depth: usize) -> String {
    match node {
        SvgNode::Element(elem) => element_to_jsx(elem, options, depth),
        SvgNode::Text(text) => text.clone(),
    }
}

fn element_to_jsx(elem: &SvgElement, options: &GeneratorOptions, depth: usize) -> String {
    let tag = &elem.tag_name;
    let mut attrs = Vec::new();

    // Spread is written `{...props}` rather than a bare `...props` so the tag
    // stays valid JSX.
    if depth == 0 && options.spread_props {
        if options.use_forward_ref {
            attrs.push("ref={ref}".to_string());
        }
        attrs.push("{...props}".to_string());
    }
    attrs.extend(elem.attributes.iter().filter_map(attribute_to_jsx));

    let open = if attrs.is_empty() {
        format!("<{tag}")
    } else {
        format!("<{tag} {}", attrs.join(" "))
    };

    match elem.children.as_slice() {
        [] => format!("{open} />"),
        [SvgNode::Text(text)] => format!("{open}>{text}</{tag}>"),
        children => {
            let indent = "  ".repeat(depth + BASE_DEPTH);
            let mut out = format!("{open}>");
            for child in children {
                out.push('\n');
                out.push_str(&indent);
                out.push_str("  ");
                out.push_str(&node_to_jsx(child, options, depth + 1));
            }
            out.push('\n');
            out.push_str(&indent);
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
            out
        }
    }
}

/// Render one attribute as `name=value`, or `None` when it is dropped.
fn attribute_to_jsx(attr: &SvgAttribute) -> Option<String> {
    let SvgAttribute { name, value } = attr;

    // Namespace declarations mean nothing in JSX
    if name == "xmlns" || name.starts_with("xmlns:") {
        return None;
    }

    if name == "style" {
        if value.trim().is_empty() {
            return None;
        }
        return Some(format!("style={}", style_to_object(value)));
    }

    let jsx_name = jsx_attribute_name(name);
    // Embedded double quotes are emitted as-is.
    let jsx_value = if is_numeric(value) {
        format!("{{{value}}}")
    } else {
        format!("\"{value}\"")
    };

    Some(format!("{jsx_name}={jsx_value}"))
}

/// Map an SVG attribute name to its JSX prop name.
pub fn jsx_attribute_name(name: &str) -> String {
    match name {
        "class" => "className".into(),
        "xlink:href" => "href".into(),
        _ => kebab_to_camel(name),
    }
}

/// `stroke-width` -> `strokeWidth`. Only a hyphen followed by a lowercase
/// ASCII letter is folded; anything else is kept.
pub fn kebab_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();

    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(&next) if c == '-' && next.is_ascii_lowercase() => {
                out.push(next.to_ascii_uppercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }

    out
}

/// Whether `value` matches `-?\d+(\.\d+)?`.
pub fn is_numeric(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    let (int, frac) = match digits.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (digits, None),
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(int) && frac.is_none_or(all_digits)
}

/// Turn a CSS declaration list into a JSX style object literal.
pub fn style_to_object(style: &str) -> String {
    let declarations: Vec<String> = style
        .split(';')
        .filter_map(|decl| {
            let (prop, value) = decl.split_once(':')?;
            let (prop, value) = (prop.trim(), value.trim());
            if prop.is_empty() || value.is_empty() {
                return None;
            }
            Some(format!("{}: \"{}\"", kebab_to_camel(prop), value))
        })
        .collect();

    if declarations.is_empty() {
        "{{}}".into()
    } else {
        format!("{{{{ {} }}}}", declarations.join(", "))
    }
}
