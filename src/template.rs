//! Component skeletons wrapped around the generated JSX.

use crate::options::GeneratorOptions;

const PROPS_TYPE: &str = "React.SVGProps<SVGSVGElement>";
const REF_TYPE: &str = "SVGSVGElement";
const UNTYPED: &str = "any";

/// Wrap `svg_content` in the skeleton selected by `use_memo` and
/// `use_forward_ref`.
pub fn render_template(svg_content: &str, options: &GeneratorOptions) -> String {
    let name = &options.component_name;
    let props = if options.spread_props {
        "props"
    } else {
        "_props"
    };

    match (options.use_memo, options.use_forward_ref) {
        (false, false) => {
            let annotation = props_annotation(options);
            format!(
                "export const {name} = ({props}{annotation}) => {{
  return (
    {svg_content}
  );
}};"
            )
        }
        (true, false) => {
            let annotation = props_annotation(options);
            format!(
                "const {name}Component = ({props}{annotation}) => {{
  return (
    {svg_content}
  );
}};

export const {name} = React.memo({name}Component);"
            )
        }
        (false, true) => {
            let generics = forward_ref_generics(options);
            format!(
                "export const {name} = React.forwardRef{generics}(
  ({props}, ref) => {{
    return (
      {svg_content}
    );
  }}
);

{name}.displayName = '{name}';"
            )
        }
        (true, true) => {
            let generics = forward_ref_generics(options);
            format!(
                "const {name}Component = React.forwardRef{generics}(
  ({props}, ref) => {{
    return (
      {svg_content}
    );
  }}
);

{name}Component.displayName = '{name}';

export const {name} = React.memo({name}Component);"
            )
        }
    }
}

fn props_annotation(options: &GeneratorOptions) -> String {
    if options.typescript {
        format!(": {PROPS_TYPE}")
    } else {
        String::new()
    }
}

fn forward_ref_generics(options: &GeneratorOptions) -> String {
    if options.typescript {
        format!("<{REF_TYPE}, {PROPS_TYPE}>")
    } else {
        format!("<{UNTYPED}, {UNTYPED}>")
    }
}
