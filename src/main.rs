use clap::{Parser, Subcommand};

mod calculator;
mod cmd;
mod roles;
mod tax;

#[derive(Parser, Debug)]
#[command(
    name = "ratec",
    version,
    about = "UK contractor day-rate and IR35 take-home calculator"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate take-home pay for a single engagement
    Takehome(cmd::takehome::TakeHomeCommand),
    /// Compare inside vs outside IR35 for the same engagement
    Compare(cmd::compare::CompareCommand),
    /// Earnings estimates for fractional executive roles
    Roles(cmd::roles::RolesCommand),
    /// Show the tax band table in force for a tax year
    Bands(cmd::bands::BandsCommand),
    /// Print expected input formats
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Takehome(cmd) => cmd.exec(),
        Command::Compare(cmd) => cmd.exec(),
        Command::Roles(cmd) => cmd.exec(),
        Command::Bands(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
    }
}
