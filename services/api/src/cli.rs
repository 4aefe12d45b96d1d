use crate::demo::{
    run_connect, run_demo, run_nearby, run_report, ConnectArgs, DemoArgs, ReportArgs, SearchArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use rescue_locator::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Rescue Locator",
    about = "Find nearby animal shelters and route abuse reports from the command line",
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
    /// Query the shelter directory
    Shelters {
        #[command(subcommand)]
        command: ShelterCommand,
    },
    /// Submit an abuse report and show which shelter it was routed to
    Report(ReportArgs),
    /// Rank the sample directory from downtown and plot it on the log map
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ShelterCommand {
    /// List shelters nearest first, optionally filtered by service
    Nearby(SearchArgs),
    /// Show the single nearest shelter offering a service
    Connect(ConnectArgs),
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
        Command::Shelters {
            command: ShelterCommand::Nearby(args),
        } => run_nearby(args),
        Command::Shelters {
            command: ShelterCommand::Connect(args),
        } => run_connect(args),
        Command::Report(args) => run_report(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nearby_with_negative_longitude() {
        let cli = Cli::try_parse_from([
            "rescue-locator",
            "shelters",
            "nearby",
            "--latitude",
            "40.7128",
            "--longitude",
            "-74.0060",
            "--service",
            "emergency",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Shelters {
                command: ShelterCommand::Nearby(args),
            }) => {
                assert_eq!(args.observer.longitude, Some(-74.006));
                assert_eq!(args.service.as_deref(), Some("emergency"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::try_parse_from(["rescue-locator"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }

    #[test]
    fn report_accepts_multiple_attachments() {
        let cli = Cli::try_parse_from([
            "rescue-locator",
            "report",
            "--description",
            "Dog left in a hot car",
            "--address",
            "10036",
            "--attachment",
            "a.jpg",
            "--attachment",
            "b.mp4",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Report(args)) => assert_eq!(args.attachments.len(), 2),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
