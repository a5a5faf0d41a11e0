use std::io::Write as _;
use std::sync::Arc;
use std::sync::Mutex;

use routstr_console::api::AdminClient;
use routstr_console::config::fetch_config;
use routstr_console::tui::App;
use routstr_console::{ConsoleError, credentials, prefs, tui};

#[tokio::main]
async fn main() -> Result<(), ConsoleError> {
    // The alternate screen owns stdout, so logs go to a file next to the
    // preference store.
    init_file_logging()?;

    if handle_cli_command()? {
        return Ok(());
    }

    credentials::populate_env_from_keychain();
    let config = fetch_config()?;

    let Some(password) = config.routstr.admin_password else {
        return Err(ConsoleError::Config(
            "no admin password: set ROUTSTR_ADMIN_PASSWORD or run \
             `routstr-console store-password`"
                .to_string(),
        ));
    };

    let mut client = AdminClient::new(&config.routstr.base_url)?;
    client.login(&password).await?;

    let prefs_path = config.routstr.prefs_path.or_else(prefs::default_path);
    let preferences = prefs_path
        .as_deref()
        .map(prefs::load)
        .unwrap_or_default();

    let mut app = App::new(preferences, prefs_path);
    app.authenticated = true;

    tui::run(Arc::new(client), &mut app).await
}

/// Handles one-shot command-line invocations. Returns `true` when a command
/// ran and the TUI should not start.
fn handle_cli_command() -> Result<bool, ConsoleError> {
    let Some(command) = std::env::args().nth(1) else {
        return Ok(false);
    };
    match command.as_str() {
        "store-password" => {
            print!("admin password: ");
            std::io::stdout()
                .flush()
                .map_err(|e| ConsoleError::Io(e.to_string()))?;
            let mut password = String::new();
            std::io::stdin()
                .read_line(&mut password)
                .map_err(|e| ConsoleError::Io(e.to_string()))?;
            let password = password.trim_end_matches(['\r', '\n']);
            if password.is_empty() {
                return Err(ConsoleError::Config("empty password not stored".to_string()));
            }
            credentials::save(credentials::CredentialKey::AdminPassword, password)?;
            println!("stored in the system keychain");
            Ok(true)
        }
        "forget-password" => {
            credentials::forget(credentials::CredentialKey::AdminPassword)?;
            println!("removed from the system keychain");
            Ok(true)
        }
        other => Err(ConsoleError::Config(format!(
            "unknown command {other:?}; available: store-password, forget-password"
        ))),
    }
}

fn init_file_logging() -> Result<(), ConsoleError> {
    let log_path = prefs::default_path()
        .and_then(|p| Some(p.parent()?.join("console.log")))
        .unwrap_or_else(|| std::path::PathBuf::from("routstr-console.log"));
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConsoleError::Io(e.to_string()))?;
    }
    let log_file = std::fs::File::create(&log_path)
        .map_err(|e| ConsoleError::Io(format!("failed to open {}: {e}", log_path.display())))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}
