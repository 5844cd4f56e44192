//! End-to-end conversion tests: parse -> optimize -> generate.

use pretty_assertions::assert_eq;
use svg2tsx::{
    ConversionOptions, ConversionOptionsPatch, GeneratorOptions, OptimizerOptions,
    OptimizerOptionsPatch, OptionsStore, SvgAst, SvgElement, SvgNode, convert, convert_with_store,
    generate_tsx, optimize, parse_svg,
};

const FEATHER_ALERT: &str = r#"
  <svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
    <circle cx="12" cy="12" r="10"></circle>
    <line x1="12" y1="8" x2="12" y2="12"></line>
    <line x1="12" y1="16" x2="12.01" y2="16"></line>
  </svg>
"#;

const CORPUS: &[&str] = &[
    FEATHER_ALERT,
    r#"<svg width="24" height="24" viewBox="0 0 24 24">
        <g id="layer1" data-name="test" transform="translate(0,0)">
          <rect fill="black" stroke="none" x="10" y="20" stroke-width="2"/>
        </g>
        <g></g>
      </svg>"#,
    r#"<svg><g><g><g/></g><g data-x="1"><g/></g></g><text>label</text></svg>"#,
    r##"<svg><defs><linearGradient id="a"><stop offset="0" stop-color="#fff"/></linearGradient></defs><use xlink:href="#a" fill="#000"/></svg>"##,
];

fn generate_default(svg: &str) -> String {
    generate_tsx(&parse_svg(svg).unwrap(), &GeneratorOptions::default())
}

fn all_passes() -> OptimizerOptions {
    OptimizerOptions {
        remove_data_attrs: true,
        remove_ids: true,
        remove_empty_groups: true,
        merge_duplicate_attrs: true,
        remove_default_attrs: true,
        optimize_transforms: true,
    }
}

/// Each option individually, the recommended preset and everything at once.
fn option_sets() -> Vec<OptimizerOptions> {
    let single = |f: fn(&mut OptimizerOptions)| {
        let mut options = OptimizerOptions::default();
        f(&mut options);
        options
    };
    vec![
        OptimizerOptions::default(),
        single(|o| o.remove_data_attrs = true),
        single(|o| o.remove_ids = true),
        single(|o| o.remove_empty_groups = true),
        single(|o| o.remove_default_attrs = true),
        single(|o| o.optimize_transforms = true),
        OptimizerOptions::recommended(),
        all_passes(),
    ]
}

fn element_children(node: &SvgElement) -> usize {
    node.child_elements().count()
}

#[test]
fn test_simple_icon_default_options() {
    let tsx = generate_default(r#"<svg width="24" height="24"><circle cx="12" cy="12" r="10"/></svg>"#);

    assert_eq!(
        tsx,
        "export const Icon = (props: React.SVGProps<SVGSVGElement>) => {
  return (
    <svg {...props} width={24} height={24}>
      <circle cx={12} cy={12} r={10} />
    </svg>
  );
};"
    );
}

#[test]
fn test_style_attribute_becomes_object() {
    let tsx = generate_default(r#"<svg><rect style="fill: red; stroke-width: 2px;"/></svg>"#);
    assert!(tsx.contains(r#"style={{ fill: "red", strokeWidth: "2px" }}"#));
}

#[test]
fn test_memo_and_forward_ref_together() {
    let options = GeneratorOptions {
        component_name: "Alert".into(),
        use_memo: true,
        use_forward_ref: true,
        ..Default::default()
    };
    let tsx = generate_tsx(&parse_svg("<svg><rect/></svg>").unwrap(), &options);

    assert!(tsx.contains("const AlertComponent = React.forwardRef<"));
    assert!(tsx.contains("AlertComponent.displayName = 'Alert';"));
    assert!(tsx.contains("export const Alert = React.memo(AlertComponent);"));
    assert!(tsx.contains("<svg ref={ref} {...props}>"));
}

#[test]
fn test_parse_errors() {
    for input in [
        "",
        "<div>not svg</div>",
        "<svg><rect></svg>",
        "<svg><foo:rect/></svg>",
        "<svg><text>a & b</text></svg>",
        r#"<svg><rect title="a < b"/></svg>"#,
    ] {
        assert!(parse_svg(input).is_err(), "{input:?} should not parse");
    }
}

#[test]
fn test_full_pipeline() {
    let output = convert(
        CORPUS[1],
        &ConversionOptions {
            generator: GeneratorOptions {
                component_name: "TestIcon".into(),
                ..Default::default()
            },
            optimize: true,
        },
        &all_passes(),
    )
    .unwrap();

    assert_eq!(output.component_name, "TestIcon");
    assert_eq!(
        output.code,
        "export const TestIcon = (props: React.SVGProps<SVGSVGElement>) => {
  return (
    <svg {...props} width={24} height={24} viewBox=\"0 0 24 24\">
      <g>
        <rect x={10} y={20} strokeWidth={2} />
      </g>
    </svg>
  );
};"
    );
}

#[test]
fn test_optimize_flag_gates_optimizer() {
    let svg = r#"<svg><rect id="a" data-x="1"/><g/></svg>"#;
    let options = ConversionOptions {
        optimize: false,
        ..Default::default()
    };

    let output = convert(svg, &options, &all_passes()).unwrap();
    assert!(output.code.contains(r#"<rect id="a" dataX={1} />"#));
    assert!(output.code.contains("<g />"));

    let output = convert(svg, &ConversionOptions::default(), &all_passes()).unwrap();
    assert!(!output.code.contains("id="));
    assert!(!output.code.contains("<g"));
}

#[test]
fn test_with_options_store() {
    let mut store = OptionsStore::default();
    store.set_options(ConversionOptionsPatch {
        component_name: Some("CustomIcon".into()),
        typescript: Some(false),
        use_memo: Some(true),
        ..Default::default()
    });
    store.set_optimizer_options(OptimizerOptionsPatch {
        remove_ids: Some(true),
        remove_data_attrs: Some(true),
        ..Default::default()
    });

    let output = convert_with_store(r#"<svg id="root" data-test="123"><rect x="10"/></svg>"#, &store)
        .unwrap();

    assert!(output.code.contains("CustomIcon"));
    assert!(output.code.contains("React.memo"));
    assert!(!output.code.contains(':'));
    assert!(!output.code.contains("id="));
    assert!(!output.code.contains("data"));
}

#[test]
fn test_real_icon_with_forward_ref() {
    let ast = parse_svg(FEATHER_ALERT).unwrap();
    let optimized = optimize(
        &ast,
        &OptimizerOptions {
            remove_data_attrs: true,
            remove_empty_groups: true,
            ..Default::default()
        },
    );
    let tsx = generate_tsx(
        &optimized,
        &GeneratorOptions {
            component_name: "AlertCircle".into(),
            use_forward_ref: true,
            ..Default::default()
        },
    );

    assert!(tsx.contains("export const AlertCircle = React.forwardRef<SVGSVGElement"));
    assert!(tsx.contains("AlertCircle.displayName = 'AlertCircle';"));
    assert!(tsx.contains("<svg ref={ref} {...props} width={24}"));
    assert!(tsx.contains(r#"stroke="currentColor""#));
    assert!(tsx.contains("strokeWidth={2}"));
    assert!(tsx.contains(r#"strokeLinecap="round""#));
    assert!(tsx.contains(r#"strokeLinejoin="round""#));
    assert!(tsx.contains("<line x1={12} y1={16} x2={12.01} y2={16} />"));
    assert!(!tsx.contains("xmlns"));
}

#[test]
fn test_optimizer_is_idempotent() {
    for svg in CORPUS {
        let ast = parse_svg(svg).unwrap();
        for options in option_sets() {
            let once = optimize(&ast, &options);
            let twice = optimize(&once, &options);
            assert_eq!(once, twice, "{options:?} is not idempotent on {svg}");
        }
    }
}

#[test]
fn test_reoptimizing_the_parsed_tree() {
    let ast = parse_svg(CORPUS[1]).unwrap();
    let aggressive = optimize(&ast, &all_passes());
    let gentle = optimize(&ast, &OptimizerOptions::default());

    assert_ne!(aggressive, ast);
    assert_eq!(gentle, ast);
}

#[test]
fn test_removal_passes_stay_in_their_lane() {
    fn count(ast: &SvgAst, pred: impl Fn(&str) -> bool) -> usize {
        let mut n = 0;
        ast.for_each_element(|e| n += e.attributes.iter().filter(|a| pred(a.name.as_str())).count());
        n
    }

    let svg = r#"<svg id="r" data-r="1"><g id="g" data-g="2" fill="black"><rect id="x" data-x="3" stroke="none"/></g></svg>"#;
    let ast = parse_svg(svg).unwrap();

    let data_only = optimize(
        &ast,
        &OptimizerOptions {
            remove_data_attrs: true,
            ..Default::default()
        },
    );
    assert_eq!(count(&data_only, |n| n.starts_with("data-")), 0);
    assert_eq!(count(&data_only, |n| n == "id"), 3);
    assert_eq!(count(&data_only, |n| n == "fill" || n == "stroke"), 2);

    let ids_only = optimize(
        &ast,
        &OptimizerOptions {
            remove_ids: true,
            ..Default::default()
        },
    );
    assert_eq!(count(&ids_only, |n| n == "id"), 0);
    assert_eq!(count(&ids_only, |n| n.starts_with("data-")), 3);

    let defaults_only = optimize(
        &ast,
        &OptimizerOptions {
            remove_default_attrs: true,
            ..Default::default()
        },
    );
    assert_eq!(count(&defaults_only, |n| n == "fill" || n == "stroke"), 0);
    assert_eq!(count(&defaults_only, |n| n == "id"), 3);
    assert_eq!(count(&defaults_only, |n| n.starts_with("data-")), 3);
}

#[test]
fn test_empty_group_removal_never_grows() {
    fn check(before: &SvgElement, after: &SvgElement) {
        assert!(element_children(after) <= element_children(before));

        let kept = |e: &&SvgElement| !e.is("g") || !e.children.is_empty();
        let must_keep: Vec<_> = before.child_elements().filter(|e| !e.is("g")).collect();
        let survivors: Vec<_> = after.child_elements().filter(kept).collect();
        assert_eq!(survivors.len(), after.child_elements().count());
        assert!(
            must_keep
                .iter()
                .all(|e| after.child_elements().any(|s| s.tag_name == e.tag_name))
        );
    }

    let options = OptimizerOptions {
        remove_empty_groups: true,
        ..Default::default()
    };
    for svg in CORPUS {
        let ast = parse_svg(svg).unwrap();
        let optimized = optimize(&ast, &options);
        check(&ast.root, &optimized.root);
    }
}

#[test]
fn test_nested_empty_groups_collapse() {
    let ast = parse_svg(CORPUS[2]).unwrap();
    let optimized = optimize(
        &ast,
        &OptimizerOptions {
            remove_empty_groups: true,
            ..Default::default()
        },
    );
    let tags: Vec<_> = optimized.root.children.iter().map(SvgNode::tag_name).collect();
    assert_eq!(tags, ["text"]);
}

#[test]
fn test_numeric_detection_in_output() {
    let svg = r#"<svg><rect a="24" b="-1.5" c="0.5" d="1e3" e="50%" f=".5" g="1."/></svg>"#;
    let tsx = generate_default(svg);
    for numeric in ["a={24}", "b={-1.5}", "c={0.5}"] {
        assert!(tsx.contains(numeric), "missing {numeric}");
    }
    for quoted in [r#"d="1e3""#, r#"e="50%""#, r#"f=".5""#, r#"g="1.""#] {
        assert!(tsx.contains(quoted), "missing {quoted}");
    }
}

#[test]
fn test_xlink_href_without_namespace() {
    let tsx = generate_default(CORPUS[3]);
    assert!(tsx.contains(r##"<use href="#a" fill="#000" />"##));
    assert!(tsx.contains(r#"<lineargradient id="a">"#));
    assert!(tsx.contains(r##"stopColor="#fff""##));
}
