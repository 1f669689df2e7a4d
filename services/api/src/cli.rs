use crate::demo::{run_demo, run_passport_report, DemoArgs, PassportReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use garment_passport::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Garment Transparency Passport",
    about = "Demonstrate and run the garment transparency passport service from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a submission and render the passport without starting the server
    Passport {
        #[command(subcommand)]
        command: PassportCommand,
    },
    /// Run an end-to-end CLI demo over a bundled wool order
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum PassportCommand {
    /// Compute and print a passport report from a submission JSON file
    Report(PassportReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Passport {
            command: PassportCommand::Report(args),
        } => run_passport_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
