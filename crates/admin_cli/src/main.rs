//! Operator CLI for account management, working directly on the
//! database without going through the HTTP surface.

use clap::{Parser, Subcommand};
use migration::{Migrator, MigratorTrait};

use engine::{Engine, EngineError};

#[derive(Parser)]
#[command(name = "bengkel-admin", about = "Account management for the order tracker")]
struct Cli {
    /// Database connection string.
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:./bengkel.db?mode=rwc")]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register a new account.
    Create {
        username: String,
        password: String,
        /// Activate the account immediately.
        #[arg(long)]
        active: bool,
    },
    /// Activate a pending account.
    Activate { username: String },
    /// Deactivate an account.
    Deactivate { username: String },
    /// Reset an account's password.
    SetPassword { username: String, password: String },
    /// List accounts waiting for activation.
    ListInactive,
}

async fn find_user_id(engine: &Engine, username: &str) -> Result<i32, EngineError> {
    engine
        .find_by_username(username)
        .await?
        .map(|user| user.id)
        .ok_or_else(|| EngineError::KeyNotFound(username.to_string()))
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let db = sea_orm::Database::connect(&cli.database_url).await?;
    Migrator::up(&db, None).await?;
    let engine = Engine::builder().database(db).build();

    match cli.command {
        Command::Create {
            username,
            password,
            active,
        } => {
            let user = engine.create_user(&username, &password).await?;
            if active {
                engine.activate_user(user.id).await?;
            }
            println!("created user {} (id {})", user.username, user.id);
        }
        Command::Activate { username } => {
            let id = find_user_id(&engine, &username).await?;
            engine.activate_user(id).await?;
            println!("activated {username}");
        }
        Command::Deactivate { username } => {
            let id = find_user_id(&engine, &username).await?;
            engine.deactivate_user(id).await?;
            println!("deactivated {username}");
        }
        Command::SetPassword { username, password } => {
            let id = find_user_id(&engine, &username).await?;
            engine.set_password(id, &password).await?;
            println!("password updated for {username}");
        }
        Command::ListInactive => {
            let users = engine.inactive_users().await?;
            if users.is_empty() {
                println!("no accounts waiting for activation");
            }
            for user in users {
                println!("{}\t{}\t{}", user.id, user.username, user.created_at);
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
