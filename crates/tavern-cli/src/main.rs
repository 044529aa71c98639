use std::sync::Arc;

use clap::{Parser, Subcommand};
use dialoguer::{Input, MultiSelect, Password};
use dotenvy::dotenv;

use tavern_auth::verifier_for;
use tavern_cli::roles::{self, parse_permissions, unknown_permissions};
use tavern_config::{DatabaseConfig, PasswordConfig};
use tavern_core::permissions;
use tavern_db::{CredentialStore, connect_store};

#[derive(Parser)]
#[command(name = "tavern-cli")]
#[command(about = "Tavern CLI - Role administration for the Tavern API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a login role
    CreateRole {
        /// Role name used to log in
        #[arg(short = 'r', long)]
        role_name: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Comma separated permissions, e.g. "AddEvents,ManageGallery"
        #[arg(long)]
        permissions: Option<String>,
    },
    /// List all roles and their permissions
    ListRoles,
    /// Delete a role by name
    DeleteRole {
        /// Role name to delete
        role_name: String,
    },
    /// Show the permission catalog
    ListPermissions,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command).await {
        eprintln!("\n❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    if let Commands::ListPermissions = command {
        handle_list_permissions();
        return Ok(());
    }

    let store = connect_store(&DatabaseConfig::from_env()?)
        .await
        .map_err(|e| e.error)?;

    match command {
        Commands::CreateRole {
            role_name,
            password,
            permissions,
        } => handle_create_role(store, role_name, password, permissions).await,
        Commands::ListRoles => handle_list_roles(store).await,
        Commands::DeleteRole { role_name } => handle_delete_role(store, &role_name).await,
        Commands::ListPermissions => Ok(()),
    }
}

async fn handle_create_role(
    store: Arc<dyn CredentialStore>,
    role_name: Option<String>,
    password: Option<String>,
    permissions: Option<String>,
) -> anyhow::Result<()> {
    let role_name = match role_name {
        Some(name) => name,
        None => Input::<String>::new().with_prompt("Role name").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let permissions = match permissions {
        Some(raw) => parse_permissions(&raw),
        None => prompt_permissions()?,
    };

    for unknown in unknown_permissions(&permissions) {
        println!("⚠️  '{}' is not a known permission; storing it anyway", unknown);
    }

    let verifier = verifier_for(PasswordConfig::from_env()?);
    let record = roles::create_role(
        store.as_ref(),
        verifier.as_ref(),
        &role_name,
        &password,
        permissions,
    )
    .await
    .map_err(|e| e.error)?;

    println!("\n✅ Role created successfully!");
    println!("   ID: {}", record.id);
    println!("   Role: {}", record.role_name);
    println!("   Permissions: {}", record.permissions.join(", "));
    println!("   Password scheme: {}", verifier.scheme());
    Ok(())
}

fn prompt_permissions() -> anyhow::Result<Vec<String>> {
    let catalog = permissions::catalog();
    let labels: Vec<String> = catalog
        .iter()
        .map(|p| format!("{} ({})", p.name, p.description))
        .collect();

    let selected = MultiSelect::new()
        .with_prompt("Permissions (space to toggle, enter to confirm)")
        .items(&labels)
        .interact()?;

    Ok(selected
        .into_iter()
        .map(|i| catalog[i].name.to_string())
        .collect())
}

async fn handle_list_roles(store: Arc<dyn CredentialStore>) -> anyhow::Result<()> {
    let records = roles::list_roles(store.as_ref())
        .await
        .map_err(|e| e.error)?;

    if records.is_empty() {
        println!("No roles found. Run `create-role` first.");
        return Ok(());
    }

    for record in records {
        println!("{}  {}", record.id, record.role_name);
        if record.permissions.is_empty() {
            println!("    (no permissions)");
        } else {
            println!("    {}", record.permissions.join(", "));
        }
    }
    Ok(())
}

async fn handle_delete_role(store: Arc<dyn CredentialStore>, role_name: &str) -> anyhow::Result<()> {
    roles::delete_role(store.as_ref(), role_name)
        .await
        .map_err(|e| e.error)?;
    println!("✅ Deleted role '{}'", role_name);
    Ok(())
}

fn handle_list_permissions() {
    for info in permissions::catalog() {
        println!("{:<20} {:<12} {}", info.name, info.category, info.description);
    }
}
