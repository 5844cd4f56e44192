//! svg2tsx - Convert SVG icons into React components
//!
//! The pipeline is parse -> optimize (optional) -> generate. Each stage is a
//! pure function over owned data, so conversions can run in parallel.

mod ast;
mod error;
mod files;
mod generate;
mod log;
mod optimize;
mod options;
mod parse;
mod template;

pub use ast::*;
pub use error::*;
pub use files::*;
pub use generate::*;
pub use optimize::*;
pub use options::*;
pub use parse::*;
pub use template::*;

/// A generated component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsxOutput {
    /// The component source
    pub code: String,
    pub component_name: String,
}

/// Convert an SVG string with the given options.
///
/// The optimizer runs only when `options.optimize` is set.
pub fn convert(
    svg: &str,
    options: &ConversionOptions,
    optimizer: &OptimizerOptions,
) -> Result<TsxOutput, ParseError> {
    let ast = parse_svg(svg)?;
    let ast = if options.optimize {
        optimize(&ast, optimizer)
    } else {
        ast
    };

    Ok(TsxOutput {
        code: generate_tsx(&ast, &options.generator),
        component_name: options.generator.component_name.clone(),
    })
}

/// Convert an SVG string with the options saved in `store`.
pub fn convert_with_store(svg: &str, store: &OptionsStore) -> Result<TsxOutput, ParseError> {
    convert(svg, &store.conversion, &store.optimizer)
}
