use std::net::SocketAddr;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "rolodex-api", version, about = "Contact book HTTP service")]
pub struct Cli {
    /// Storage choice (sqlite, mem) are available
    #[arg(long, env = "STORAGE_CHOICE", default_value_t = String::from("sqlite"))]
    pub storage_choice: String,

    /// SQLite database location
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value_t = String::from("sqlite://./.instance/contacts.db")
    )]
    pub database_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommand and their flags
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, env = "ROLODEX_ADDR", default_value = "127.0.0.1:3000")]
        addr: SocketAddr,

        /// User to create before serving, as USERNAME:PASSWORD (repeatable)
        #[arg(long = "seed-user", value_name = "USERNAME:PASSWORD")]
        seed_users: Vec<String>,
    },
    /// Register a user that can own contacts
    AddUser {
        /// Unique username
        #[arg(long)]
        username: String,

        /// User password
        #[arg(long)]
        password: String,
    },
}
