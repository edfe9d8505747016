use clap::{Args, Parser, Subcommand};
use mutaplex::core::models::sequence::AddressType;
use mutaplex::core::models::service::{GenerationMode, LibraryType};
use mutaplex::engine::config::TilingMethod;
use mutaplex::engine::plate::PlateFormat;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "The Mutaplex Developers",
    version,
    about = "Mutaplex CLI - Plan point mutations, saturation and scanning libraries on DNA sequences, and lay out the oligos designed for them.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to a TOML configuration file.
    /// Defaults to `mutaplex/config.toml` in the platform config directory, if present.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S oligos.oligo-length=80
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", global = true)]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize FASTA input and print the parsed records.
    Parse(ParseArgs),
    /// Show what currently sits at a nucleotide or amino-acid position.
    Resolve(ResolveArgs),
    /// Build a custom mutation library from explicit substitutions.
    Custom(CustomArgs),
    /// Build a site-saturation library.
    Saturation(SaturationArgs),
    /// Build a scanning library with a degenerate codon.
    Scanning(ScanningArgs),
    /// Design oligos for fragments, or lay out a saved design response.
    Oligos(OligosArgs),
}

/// Where sequences come from and where generated FASTA goes.
#[derive(Args, Debug, Clone)]
pub struct SequenceIo {
    /// Input FASTA file (`.fasta`, `.fa`, `.txt`), or `-` for standard input.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Name used when the input has no FASTA header.
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Use the record with this name instead of the first one.
    #[arg(long, value_name = "NAME")]
    pub record: Option<String>,

    /// Write generated FASTA here instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    #[command(flatten)]
    pub io: SequenceIo,

    /// Print name, length and GC content instead of the sequences.
    #[arg(long)]
    pub summary: bool,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub io: SequenceIo,

    /// Addressing scheme: `n` (nucleotide) or `aa` (amino acid).
    #[arg(short, long, value_name = "KIND")]
    pub kind: AddressType,

    /// 1-based position.
    #[arg(short, long, value_name = "POS")]
    pub position: String,

    /// Proposed replacement values, shown in the confirmation line (e.g. `A,C`).
    #[arg(long = "new", value_name = "VALUES")]
    pub new_values: Option<String>,
}

/// Talk to the design service instead of generating locally.
#[derive(Args, Debug, Clone, Copy)]
pub struct SubmitFlag {
    /// Submit the request to the Sequence Design Service.
    #[arg(long)]
    pub submit: bool,
}

#[derive(Args, Debug)]
pub struct CustomArgs {
    #[command(flatten)]
    pub io: SequenceIo,

    /// Mutation in `TYPE:POS:VALUES` form, e.g. `N:5:T,G` or `AA:3:C`.
    /// Can be used multiple times.
    #[arg(short, long = "mutation", value_name = "SPEC", required = true)]
    pub mutations: Vec<String>,

    /// Generation mode: `individual` or `group`.
    #[arg(long, value_name = "MODE")]
    pub mode: Option<GenerationMode>,

    #[command(flatten)]
    pub submit: SubmitFlag,
}

#[derive(Args, Debug)]
pub struct SaturationArgs {
    #[command(flatten)]
    pub io: SequenceIo,

    /// Site in `TYPE:POS` form, e.g. `AA:3` or `N:12`. Can be used multiple times.
    #[arg(short, long = "site", value_name = "SPEC", required = true)]
    pub sites: Vec<String>,

    /// Skip substitutions that introduce a stop codon.
    #[arg(long)]
    pub exclude_stops: bool,

    /// Keep the unmodified sequence in the library.
    #[arg(long)]
    pub include_original: bool,

    /// Generation mode: `individual`, `group` or `group-degenerate`.
    #[arg(long, value_name = "MODE")]
    pub mode: Option<GenerationMode>,

    #[command(flatten)]
    pub submit: SubmitFlag,
}

#[derive(Args, Debug)]
pub struct ScanningArgs {
    #[command(flatten)]
    pub io: SequenceIo,

    /// First nucleotide of the scan window (1-based, inclusive).
    #[arg(long, value_name = "POS", requires = "end", conflicts_with = "full")]
    pub start: Option<usize>,

    /// Last nucleotide of the scan window (1-based, inclusive).
    #[arg(long, value_name = "POS", requires = "start", conflicts_with = "full")]
    pub end: Option<usize>,

    /// Scan every codon of the sequence. Implied when no window is given.
    #[arg(long)]
    pub full: bool,

    /// Degenerate codon: `NNN` or `NNK`.
    #[arg(long, value_name = "TYPE")]
    pub library: Option<LibraryType>,

    #[command(flatten)]
    pub submit: SubmitFlag,
}

#[derive(Args, Debug)]
pub struct OligosArgs {
    /// FASTA file with the fragments to design oligos for.
    #[arg(value_name = "FILE", required_unless_present = "response")]
    pub input: Option<PathBuf>,

    /// Lay out a saved oligo design response (JSON) instead of contacting the service.
    #[arg(long, value_name = "PATH", conflicts_with_all = ["input", "submit"])]
    pub response: Option<PathBuf>,

    /// Oligo length in nucleotides.
    #[arg(long, value_name = "NT")]
    pub oligo_length: Option<usize>,

    /// Overlap between neighbouring oligos in nucleotides.
    #[arg(long, value_name = "NT")]
    pub overlap_length: Option<usize>,

    /// Tiling method: `simple` or `gapped`.
    #[arg(long, value_name = "METHOD")]
    pub method: Option<TilingMethod>,

    /// Print the source well assignment after the layout.
    #[arg(long)]
    pub wells: bool,

    /// Plate format for the well assignment (`96-column`, `96-row`,
    /// `384-column`, `384-row`). Implies `--wells`.
    #[arg(long, value_name = "FORMAT")]
    pub plate_format: Option<PlateFormat>,

    /// Also print one destination well per fragment.
    #[arg(long)]
    pub destinations: bool,

    /// Print the pooling transfers (source well to fragment destination well)
    /// and the working-plate dilution copies.
    #[arg(long)]
    pub pooling: bool,

    /// JSON object of primer pairs per fragment
    /// (`{"frag": {"forward_primer": "...", "reverse_primer": "..."}}`) to place on primer plates.
    #[arg(long, value_name = "PATH")]
    pub primers: Option<PathBuf>,

    // Without `--submit` only the request body is printed.
    #[command(flatten)]
    pub submit: SubmitFlag,
}
