use clap::Parser;
use credvault::cli::commands::{add::AddArgs, show::ShowArgs};
use credvault::cli::{Cli, Commands};
use credvault::config::Settings;

fn main() {
    let cli = Cli::parse();
    credvault::logging::init(cli.verbose);

    let settings = match Settings::load_default() {
        Ok(settings) => settings,
        Err(e) => {
            credvault::cli::output::error(&e.to_string());
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Init { force, ref import } => {
            credvault::cli::commands::init::execute(&cli, &settings, force, import.as_deref())
        }
        Commands::Add {
            ref website,
            ref username,
            ref mail,
            replace,
            auto_gen,
        } => credvault::cli::commands::add::execute(
            &cli,
            &settings,
            &AddArgs {
                website,
                username: username.as_deref(),
                mail: mail.as_deref(),
                replace,
                auto_gen: auto_gen.map(usize::from),
            },
        ),
        Commands::Delete { ref website, all } => {
            credvault::cli::commands::delete::execute(&cli, &settings, website.as_deref(), all)
        }
        Commands::Show {
            ref website,
            regex,
            display_time,
            ref output,
            show_password,
            paste,
            width,
        } => credvault::cli::commands::show::execute(
            &cli,
            &settings,
            &ShowArgs {
                website: website.as_deref(),
                regex,
                display_time,
                output: output.as_deref(),
                show_password,
                paste,
                width,
            },
        ),
        Commands::GeneratePassword {
            length,
            numbers,
            special,
        } => credvault::cli::commands::generate_password::execute(
            &settings,
            length.map(usize::from),
            numbers,
            special,
        ),
        Commands::ChangeMasterPassword => {
            credvault::cli::commands::change_master_password::execute(&cli, &settings)
        }
        Commands::Completions { shell } => credvault::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        credvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
