//! A tournament lobby client for the terminal.
//!
//! The client connects to a lobby HTTP server, browses tournaments, shows a
//! single tournament's roster, and joins a pending one, either through a
//! plain command loop or a ratatui TUI.

use std::io::{self, Write};

use anyhow::{Context, Result};
use pico_args::Arguments;
use tourneygram::{HostUser, Navigation, TournamentDetail, TournamentSummary, View};

use tg_client::{
    api_client::{ApiClient, ApiError},
    commands::{LobbyCommand, parse_command},
    tui_app::TuiApp,
};

const HELP: &str = "\
Browse and join tournaments on a lobby server

USAGE:
  tg_client [OPTIONS]

OPTIONS:
  --server URL          Lobby server URL  [default: http://localhost:5001]
  --user JSON           Host-platform user object,
                        e.g. '{\"id\":42,\"username\":\"alice\"}'
  --user-id ID          Numeric user id (alternative to --user)
  --username NAME       Username  [default: login name]
  --first-name NAME     First name, used when no username is set
  --last-name NAME      Last name, used when no username is set
  --tui                 Use TUI (Terminal UI) mode [default: false]

FLAGS:
  -h, --help            Print help information
";

const COMMANDS_HELP: &str = "\
list
        Reload and print the tournament list.
open N
        Open the Nth tournament of the printed list.
join
        Join the open tournament (requires a user identity).
back
        Return to the tournament list.
refresh
        Re-fetch whatever is on screen.
quit
        Exit the client.
";

struct Args {
    server_url: String,
    user_json: Option<String>,
    user_id: Option<i64>,
    username: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    use_tui: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        server_url: pargs
            .value_from_str("--server")
            .unwrap_or_else(|_| "http://localhost:5001".to_string()),
        user_json: pargs.opt_value_from_str("--user").ok().flatten(),
        user_id: pargs.opt_value_from_str("--user-id").ok().flatten(),
        username: pargs.opt_value_from_str("--username").ok().flatten(),
        first_name: pargs.opt_value_from_str("--first-name").ok().flatten(),
        last_name: pargs.opt_value_from_str("--last-name").ok().flatten(),
        use_tui: pargs.contains("--tui"),
    };

    let user = resolve_user(&args)?;
    let api = ApiClient::new(args.server_url.clone());

    if args.use_tui {
        let terminal = ratatui::init();
        let result = TuiApp::new(user).run(api, terminal).await;
        ratatui::restore();
        result
    } else {
        env_logger::init();
        run_plain(api, user).await
    }
}

/// Resolve the host-platform identity from the command line. A missing
/// identity is not an error; the client then runs read-only.
fn resolve_user(args: &Args) -> Result<Option<HostUser>> {
    if let Some(json) = &args.user_json {
        let user = serde_json::from_str(json).context("Failed to parse --user JSON")?;
        return Ok(Some(user));
    }

    let Some(id) = args.user_id else {
        return Ok(None);
    };

    let username = args.username.clone().or_else(|| {
        let login = whoami::username();
        (!login.is_empty()).then_some(login)
    });

    Ok(Some(HostUser {
        id,
        username,
        first_name: args.first_name.clone().unwrap_or_default(),
        last_name: args.last_name.clone(),
    }))
}

/// Plain text-mode client: a prompt loop over the same two views the TUI
/// renders. Every remote failure prints a static message; nothing retries.
async fn run_plain(api: ApiClient, user: Option<HostUser>) -> Result<()> {
    if user.is_none() {
        println!("No user identity supplied; joining is disabled (pass --user or --user-id).");
    }

    let mut nav = Navigation::new();
    let mut summaries: Vec<TournamentSummary> = Vec::new();
    let mut detail: Option<TournamentDetail> = None;

    load_and_print_list(&api, &mut summaries).await;

    let mut input = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        input.clear();
        if io::stdin().read_line(&mut input)? == 0 {
            break; // EOF
        }
        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        match parse_command(trimmed) {
            Ok(LobbyCommand::Quit) => break,
            Ok(LobbyCommand::Help) => print!("{COMMANDS_HELP}"),
            Ok(LobbyCommand::List) | Ok(LobbyCommand::Back) => {
                nav.back_to_list();
                detail = None;
                load_and_print_list(&api, &mut summaries).await;
            }
            Ok(LobbyCommand::Open(number)) => match summaries.get(number - 1) {
                Some(summary) => {
                    let id = summary.id.clone();
                    nav.open_details(id);
                    detail = load_and_print_detail(&api, &nav, user.as_ref()).await;
                }
                None => println!("No tournament numbered {number}. Type 'list' to reload."),
            },
            Ok(LobbyCommand::Refresh) => match nav.view() {
                View::List => load_and_print_list(&api, &mut summaries).await,
                View::Details => {
                    detail = load_and_print_detail(&api, &nav, user.as_ref()).await;
                }
            },
            Ok(LobbyCommand::Join) => {
                join_open_tournament(&api, &nav, user.as_ref(), detail.as_ref()).await;
                if nav.view() == View::Details {
                    detail = load_and_print_detail(&api, &nav, user.as_ref()).await;
                }
            }
            Err(e) => println!("{e}"),
        }
    }

    println!("\nGoodbye!");
    Ok(())
}

async fn load_and_print_list(api: &ApiClient, summaries: &mut Vec<TournamentSummary>) {
    match api.list_tournaments().await {
        Ok(list) => {
            *summaries = list;
            if summaries.is_empty() {
                println!("No tournaments yet. Check back soon!");
                return;
            }
            println!("Tournaments:");
            for (i, summary) in summaries.iter().enumerate() {
                println!(
                    "  {}. {} / {} / {}",
                    i + 1,
                    summary.name,
                    summary.game.as_deref().unwrap_or("?"),
                    summary.status,
                );
            }
            println!("Type 'open N' to view a tournament.");
        }
        Err(e) => {
            log::error!("failed to load tournaments: {e}");
            println!("Failed to load tournaments.");
        }
    }
}

async fn load_and_print_detail(
    api: &ApiClient,
    nav: &Navigation,
    user: Option<&HostUser>,
) -> Option<TournamentDetail> {
    let id = nav.selected()?;
    match api.get_tournament(id).await {
        Ok(detail) => {
            println!("{}", detail.name);
            println!("Game: {}", detail.game.as_deref().unwrap_or("?"));
            println!("Status: {}", detail.status);
            println!("Players:");
            if detail.players.is_empty() {
                println!("  No players have registered yet.");
            } else {
                for player in &detail.players {
                    println!("  - {} (#{})", player.username, player.user_id);
                }
            }
            match user {
                Some(user) if detail.can_join(user.id) => {
                    println!("Type 'join' to register for this tournament.");
                }
                None if detail.status.is_pending() => {
                    println!("Joining is disabled: no user identity.");
                }
                _ => {}
            }
            Some(detail)
        }
        Err(e) => {
            log::error!("failed to load tournament {id}: {e}");
            println!("Failed to load tournament details.");
            None
        }
    }
}

async fn join_open_tournament(
    api: &ApiClient,
    nav: &Navigation,
    user: Option<&HostUser>,
    detail: Option<&TournamentDetail>,
) {
    let Some(id) = nav.selected() else {
        println!("Open a tournament first ('open N').");
        return;
    };
    let Some(user) = user else {
        println!("Joining is disabled: no user identity.");
        return;
    };
    if let Some(detail) = detail
        && !detail.can_join(user.id)
    {
        if detail.has_player(user.id) {
            println!("You are already registered.");
        } else {
            println!("This tournament is no longer accepting registrations.");
        }
        return;
    }

    println!("Joining...");
    match api.join_tournament(id, user).await {
        Ok(receipt) => {
            if receipt.message.is_empty() {
                println!("Successfully registered");
            } else {
                println!("{}", receipt.message);
            }
        }
        Err(ApiError::Rejected { message, .. }) => println!("{message}"),
        Err(e) => {
            log::error!("join request failed: {e}");
            println!("Could not reach the server. Please try again.");
        }
    }
}
