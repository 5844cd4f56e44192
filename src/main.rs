use std::error::Error as _;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use svg2tsx::{
    ConversionOptionsPatch, OPTIONS_FILE_NAME, OptimizerOptionsPatch, OptionsStore, Svg2TsxError,
    component_name_from_path, convert_with_store, read_svg_file, save_tsx_file,
};

#[derive(Parser)]
#[command(name = "svg2tsx")]
#[command(about = "Convert SVG icons into React TSX components", long_about = None)]
struct Cli {
    /// Input SVG file (use - for stdin)
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Output .tsx file (use - for stdout)
    #[arg(short, long, default_value = "-")]
    output: PathBuf,

    /// Component name (defaults to one derived from the input file name)
    #[arg(short, long)]
    name: Option<String>,

    /// Options file
    #[arg(short, long, default_value = OPTIONS_FILE_NAME)]
    config: PathBuf,

    /// Write the resulting options back to the options file
    #[arg(long)]
    save_config: bool,

    /// Emit plain JavaScript props (no type annotations)
    #[arg(long)]
    js: bool,

    /// Do not spread props onto the root <svg>
    #[arg(long)]
    no_spread_props: bool,

    /// Wrap the component in React.memo
    #[arg(long)]
    memo: bool,

    /// Wrap the component in React.forwardRef
    #[arg(long)]
    forward_ref: bool,

    /// Skip the optimizer
    #[arg(long)]
    no_optimize: bool,

    /// Also remove id attributes while optimizing
    #[arg(long)]
    remove_ids: bool,
}

impl Cli {
    /// Overrides given explicitly on the command line. These are what
    /// `--save-config` persists.
    fn conversion_patch(&self) -> ConversionOptionsPatch {
        ConversionOptionsPatch {
            component_name: self.name.clone(),
            typescript: self.js.then_some(false),
            spread_props: self.no_spread_props.then_some(false),
            use_memo: self.memo.then_some(true),
            use_forward_ref: self.forward_ref.then_some(true),
            optimize: self.no_optimize.then_some(false),
        }
    }

    fn optimizer_patch(&self) -> OptimizerOptionsPatch {
        OptimizerOptionsPatch {
            remove_ids: self.remove_ids.then_some(true),
            ..Default::default()
        }
    }

    fn apply_overrides(&self, store: &mut OptionsStore) {
        store.set_options(self.conversion_patch());
        store.set_optimizer_options(self.optimizer_patch());
    }

    /// Options for this run: without `--name`, a file input names the
    /// component after itself.
    fn options_for_run(&self, mut store: OptionsStore) -> OptionsStore {
        if self.name.is_none()
            && !is_stdio(&self.input)
            && let Some(name) = component_name_from_path(&self.input)
        {
            store.set_options(ConversionOptionsPatch {
                component_name: Some(name),
                ..Default::default()
            });
        }
        store
    }
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn init_logging() {
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), Svg2TsxError> {
    let mut store = OptionsStore::load(&cli.config)?;
    cli.apply_overrides(&mut store);

    if cli.save_config {
        store.save(&cli.config)?;
    }

    let store = cli.options_for_run(store);

    #[cfg(feature = "tracing")]
    tracing::debug!(?store, "resolved options");

    // Read input
    let input = if is_stdio(&cli.input) {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| Svg2TsxError::Io(cli.input.clone(), e))?;
        buf
    } else {
        read_svg_file(&cli.input)?
    };

    let output = convert_with_store(&input, &store)?;

    // Write output
    if is_stdio(&cli.output) {
        let mut stdout = io::stdout();
        stdout
            .write_all(output.code.as_bytes())
            .and_then(|()| stdout.write_all(b"\n"))
            .map_err(|e| Svg2TsxError::Io(cli.output.clone(), e))?;
    } else {
        save_tsx_file(&cli.output, &output.code)?;
        eprintln!(
            "{} -> {} ({})",
            cli.input.display(),
            cli.output.display(),
            output.component_name
        );
    }

    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.kind().user_message());
            eprintln!("  {err}");
            if let Svg2TsxError::Parse(parse) = &err
                && let (Some(line), Some(column)) = (parse.line, parse.column)
            {
                eprintln!("  at line {line}, column {column}");
            }
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
