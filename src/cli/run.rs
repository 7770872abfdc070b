use clap::Parser;

use crate::{
    api,
    prelude::{
        AppError, ContactService, User,
        command::{Cli, Commands},
        store::{StorageChoice, parse_store},
    },
};

pub async fn run_app() -> Result<(), AppError> {
    let cli = Cli::parse();

    let choice = StorageChoice::from(&cli.storage_choice)?;
    let store = parse_store(choice, &cli.database_url).await?;

    tracing::info!("Current storage choice is: {}", choice.is_which());

    let service = ContactService::new(store);

    match cli.command {
        Commands::Serve { addr, seed_users } => {
            let seeded = seed(&service, &seed_users).await?;

            if choice.is_mem() {
                tracing::warn!("Contacts are kept in memory and are lost on shutdown");
                if seeded.is_empty() {
                    tracing::warn!("No users were seeded, every create will fail. Pass --seed-user");
                }
            }
            api::serve(api::create_router(service), addr).await
        }

        Commands::AddUser { username, password } => {
            if choice.is_mem() {
                return Err(AppError::Config(
                    "add-user needs persistent storage, use --storage-choice sqlite".to_string(),
                ));
            }

            match service.create_user(&username, &password).await {
                Ok(user) => {
                    println!("User created with id {}", user.user_id);
                    Ok(())
                }
                Err(AppError::DuplicateResource) => {
                    eprintln!("Username '{}' already exists", username);
                    Err(AppError::DuplicateResource)
                }
                Err(e) => Err(e),
            }
        }
    }
}

/// Split a `USERNAME:PASSWORD` pair. The password may itself contain ':'.
pub fn parse_seed_user(raw: &str) -> Result<(&str, &str), AppError> {
    match raw.split_once(':') {
        Some((username, password)) if !username.is_empty() && !password.is_empty() => {
            Ok((username, password))
        }
        _ => Err(AppError::Config(format!(
            "'{}' is not a valid seed user, expected USERNAME:PASSWORD",
            raw
        ))),
    }
}

/// Create every seed user. Usernames that already exist are left alone, so a
/// persistent database can be restarted with the same flags.
pub async fn seed(service: &ContactService, raw: &[String]) -> Result<Vec<User>, AppError> {
    let pairs = raw
        .iter()
        .map(|raw| parse_seed_user(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let mut created = Vec::with_capacity(pairs.len());
    for (username, password) in pairs {
        match service.create_user(username, password).await {
            Ok(user) => {
                tracing::info!("Seeded user '{}' with id {}", user.username, user.user_id);
                created.push(user);
            }
            Err(AppError::DuplicateResource) => {
                tracing::info!("Seed user '{}' already exists", username);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(created)
}
