use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use labelgene::convert::{self, GenerateOptions, OutputFormat};
use labelgene::filter::parse_selection;
use labelgene::model::NumberingMode;
use labelgene::{LabelError, Result};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_tracing()?;
    match cli.command {
        Command::Generate(args) => execute_generate(args),
    }
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .map_err(|error| LabelError::Logging(error.to_string()))
}

fn execute_generate(args: GenerateArgs) -> Result<()> {
    let boxes = args.boxes.as_deref().map(parse_selection).transpose()?;
    let options = GenerateOptions {
        numbering: args.numbering.into(),
        format: args.format.into(),
        boxes,
        series: args.series,
    };

    let summary = convert::generate(&args.input, &args.out_dir, &options)?;

    println!(
        "Processed {} : {}",
        summary.info.collection, summary.info.call_number
    );
    println!(
        "Counted a total of {} folder{} in {} box{}",
        summary.folder_rows,
        if summary.folder_rows == 1 { "" } else { "s" },
        summary.box_rows,
        if summary.box_rows == 1 { "" } else { "es" },
    );
    println!(
        "Wrote {} and {}",
        summary.folder_path.display(),
        summary.box_path.display()
    );
    if summary.skipped_components > 0 {
        println!(
            "Skipped {} component(s) with unusable data; see the log for details",
            summary.skipped_components
        );
    }
    if summary.flagged {
        println!(
            "Note: '10001' was used as a flag for non-standard box numbering in this collection. \
             Please verify and update box data before printing labels."
        );
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Generate folder and box label tables from EAD finding aids."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the folder and box tables for one finding aid.
    Generate(GenerateArgs),
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// EAD (.xml) finding aid to process.
    input: PathBuf,

    /// Directory receiving the generated tables.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Folder numbering preference. Only honoured when the finding aid does
    /// not number its folders already; explicit numbering forces continuous.
    #[arg(long, value_enum, default_value_t = NumberingArg::Continuous)]
    numbering: NumberingArg,

    /// Output format for both tables.
    #[arg(long, value_enum, default_value_t = FormatArg::Xlsx)]
    format: FormatArg,

    /// Restrict output to these boxes, e.g. "1, 3-5, 10A".
    #[arg(long)]
    boxes: Option<String>,

    /// Restrict output to folders and boxes under these series labels.
    #[arg(long)]
    series: Option<Vec<String>>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum NumberingArg {
    /// Box labels show a FIRST - LAST folder number range.
    Continuous,
    /// Folder numbers restart in every box; box labels show a folder count.
    NonContinuous,
}

impl From<NumberingArg> for NumberingMode {
    fn from(arg: NumberingArg) -> Self {
        match arg {
            NumberingArg::Continuous => NumberingMode::Continuous,
            NumberingArg::NonContinuous => NumberingMode::NonContinuous,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum FormatArg {
    Xlsx,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Xlsx => OutputFormat::Xlsx,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}
