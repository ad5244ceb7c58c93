use clap::{Args, Parser, Subcommand};

use duyin_cli::commands::{config_ops, dict_ops, label_ops};
use duyin_cli::input::InputOptions;
use duyin_cli::output::Format;
use duyin_cli::trace_init::init_tracing;
use duyin_core::Strategy;

#[derive(Parser)]
#[command(name = "duyin", about = "Unique pinyin labels for Chinese word lists")]
struct Cli {
    /// Settings TOML (default: embedded settings)
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Log as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct InputArgs {
    /// Word list file, or - for stdin
    input: String,
    /// Read the input as CSV cells instead of one word per line
    #[arg(long)]
    csv: bool,
    /// Read CSV cells column by column
    #[arg(long, requires = "csv")]
    column_major: bool,
}

#[derive(Args)]
struct OutputArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: Format,
    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<String>,
    /// Exit with status 2 if labels are not unique
    #[arg(long)]
    strict: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Assign a label to every word
    Label {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        out: OutputArgs,
        /// a (first-char), b (union) or c (context-vote)
        #[arg(short, long)]
        strategy: Option<Strategy>,
    },
    /// Label with two strategies and list the words they disagree on
    Compare {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        out: OutputArgs,
        /// Left strategy (default: engine.strategy)
        #[arg(long)]
        left: Option<Strategy>,
        /// Right strategy (default: engine.compare_with)
        #[arg(long)]
        right: Option<Strategy>,
    },
    /// Show how each polyphonic character was resolved
    Polyphones {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        out: OutputArgs,
        #[arg(short, long)]
        strategy: Option<Strategy>,
    },
    /// Look up the readings of one character
    Lookup {
        /// A single ideograph
        ch: String,
        /// Word list used as voting context
        #[arg(long)]
        context: Option<String>,
        /// Read the context as CSV cells
        #[arg(long)]
        csv: bool,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn run_options<'a>(input: &'a InputArgs, out: &'a OutputArgs) -> label_ops::RunOptions<'a> {
    label_ops::RunOptions {
        input: &input.input,
        input_opts: InputOptions {
            csv: input.csv,
            column_major: input.column_major,
        },
        format: out.format,
        output: out.output.as_deref(),
        strict: out.strict,
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let settings = || config_ops::load_settings(cli.settings.as_deref());

    match cli.command {
        Command::Label {
            input,
            out,
            strategy,
        } => label_ops::label(&settings(), strategy, &run_options(&input, &out)),
        Command::Compare {
            input,
            out,
            left,
            right,
        } => label_ops::compare(&settings(), left, right, &run_options(&input, &out)),
        Command::Polyphones {
            input,
            out,
            strategy,
        } => label_ops::polyphones(&settings(), strategy, &run_options(&input, &out)),
        Command::Lookup { ch, context, csv } => dict_ops::lookup(
            &settings(),
            &ch,
            context.as_deref(),
            InputOptions {
                csv,
                column_major: false,
            },
        ),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
