//! User CLI commands. This is the presentation side of the dashboard: it
//! forwards intents into the controller and renders the resulting snapshot.

use clap::{Args, Subcommand, ValueEnum};
use std::io::{self, Write};

use crate::dashboard::{Dashboard, DraftField};
use crate::models::User;
use crate::store::RecordStore;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct UserCommand {
    #[command(subcommand)]
    pub command: UserSubcommand,
}

#[derive(Subcommand)]
pub enum UserSubcommand {
    /// List all users
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a new user
    Add {
        /// Full name
        name: String,

        /// Email address
        email: String,
    },

    /// Update an existing user
    Update {
        /// User ID
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New email address
        #[arg(long)]
        email: Option<String>,
    },

    /// Delete a user
    Delete {
        /// User ID
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl UserCommand {
    pub async fn run<S: RecordStore>(&self, store: S) -> Result<(), UserCommandError> {
        match &self.command {
            UserSubcommand::List { format } => self.list(store, format).await,
            UserSubcommand::Add { name, email } => self.add(store, name, email).await,
            UserSubcommand::Update { id, name, email } => {
                self.update(store, id, name.as_deref(), email.as_deref())
                    .await
            }
            UserSubcommand::Delete { id, force } => self.delete(store, id, *force).await,
        }
    }

    async fn list<S: RecordStore>(
        &self,
        store: S,
        format: &OutputFormat,
    ) -> Result<(), UserCommandError> {
        let dashboard = Dashboard::init(store).await;

        match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(dashboard.records())?);
            }
            OutputFormat::Text => {
                if dashboard.records().is_empty() {
                    println!("No users found.");
                } else {
                    print_records(dashboard.records());
                }
            }
        }
        Ok(())
    }

    async fn add<S: RecordStore>(
        &self,
        store: S,
        name: &str,
        email: &str,
    ) -> Result<(), UserCommandError> {
        if name.is_empty() || email.is_empty() {
            return Err(UserCommandError::EmptyField);
        }

        let mut dashboard = Dashboard::init(store).await;
        dashboard.set_draft_field(DraftField::Name, name);
        dashboard.set_draft_field(DraftField::Email, email);
        dashboard.submit().await;

        // The dashboard clears the draft only when the create was accepted.
        if dashboard.draft().is_complete() {
            return Err(UserCommandError::NotCommitted("add"));
        }

        println!("Added {} <{}>", name, email);
        Ok(())
    }

    async fn update<S: RecordStore>(
        &self,
        store: S,
        id: &str,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<(), UserCommandError> {
        let mut dashboard = Dashboard::init(store).await;

        // Selecting mirrors the record's current fields into the draft, so
        // fields not passed on the command line keep their values.
        dashboard.select_for_edit(id);
        if dashboard.selection().is_none() {
            return Err(UserCommandError::NotFound(id.to_string()));
        }

        if let Some(name) = name {
            dashboard.set_draft_field(DraftField::Name, name);
        }
        if let Some(email) = email {
            dashboard.set_draft_field(DraftField::Email, email);
        }
        dashboard.submit().await;

        if dashboard.selection().is_some() {
            return Err(UserCommandError::NotCommitted("update"));
        }

        println!("Updated user {}", id);
        Ok(())
    }

    async fn delete<S: RecordStore>(
        &self,
        store: S,
        id: &str,
        force: bool,
    ) -> Result<(), UserCommandError> {
        let mut dashboard = Dashboard::init(store).await;

        let existing = dashboard.records().iter().find(|r| r.id == id).cloned();
        let Some(user) = existing else {
            return Err(UserCommandError::NotFound(id.to_string()));
        };

        if !force {
            print!("Delete {} <{}>? [y/N] ", user.name, user.email);
            io::stdout().flush().map_err(UserCommandError::Io)?;

            let mut answer = String::new();
            io::stdin()
                .read_line(&mut answer)
                .map_err(UserCommandError::Io)?;
            if !answer.trim().eq_ignore_ascii_case("y") {
                println!("Cancelled.");
                return Ok(());
            }
        }

        dashboard.delete_record(id).await;

        if dashboard.records().iter().any(|r| r.id == id) {
            return Err(UserCommandError::NotCommitted("delete"));
        }

        println!("Deleted user {}", id);
        Ok(())
    }
}

fn print_records(records: &[User]) {
    let name_width = records
        .iter()
        .map(|r| r.name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());
    let email_width = records
        .iter()
        .map(|r| r.email.len())
        .max()
        .unwrap_or(0)
        .max("EMAIL".len());

    println!(
        "{:<name_width$}  {:<email_width$}  ID",
        "NAME", "EMAIL",
    );
    for record in records {
        println!(
            "{:<name_width$}  {:<email_width$}  {}",
            record.name, record.email, record.id,
        );
    }
}

/// Errors from user commands
#[derive(Debug)]
pub enum UserCommandError {
    /// No user with the given id in the collection
    NotFound(String),
    /// Name and email must be non-empty
    EmptyField,
    /// The operation did not take effect (store unreachable or rejected it)
    NotCommitted(&'static str),
    /// Failed to serialize output
    Serialization(serde_json::Error),
    /// Terminal I/O failure during the confirmation prompt
    Io(std::io::Error),
}

impl std::fmt::Display for UserCommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserCommandError::NotFound(id) => write!(f, "User not found: {}", id),
            UserCommandError::EmptyField => write!(f, "Name and email must be non-empty"),
            UserCommandError::NotCommitted(op) => {
                write!(f, "The {} was not committed; see log output for details", op)
            }
            UserCommandError::Serialization(e) => write!(f, "Serialization error: {}", e),
            UserCommandError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for UserCommandError {}

impl From<serde_json::Error> for UserCommandError {
    fn from(e: serde_json::Error) -> Self {
        UserCommandError::Serialization(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserFields;
    use crate::store::MemoryStore;

    fn command(sub: UserSubcommand) -> UserCommand {
        UserCommand { command: sub }
    }

    #[tokio::test]
    async fn test_add_creates_record() {
        let store = MemoryStore::new();
        let cmd = command(UserSubcommand::Add {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        });

        cmd.run(&store).await.unwrap();

        let users = store.list_all().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "Ada");
    }

    #[tokio::test]
    async fn test_add_rejects_empty_email() {
        let store = MemoryStore::new();
        let cmd = command(UserSubcommand::Add {
            name: "Ada".to_string(),
            email: String::new(),
        });

        let result = cmd.run(&store).await;
        assert!(matches!(result, Err(UserCommandError::EmptyField)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_merges_missing_fields_from_record() {
        let store = MemoryStore::new();
        store
            .insert("k1", UserFields::new("Ada", "ada@example.com"))
            .await;

        let cmd = command(UserSubcommand::Update {
            id: "k1".to_string(),
            name: Some("Ada Lovelace".to_string()),
            email: None,
        });
        cmd.run(&store).await.unwrap();

        let users = store.list_all().await.unwrap();
        assert_eq!(users[0].name, "Ada Lovelace");
        assert_eq!(users[0].email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_update_unknown_id_errors() {
        let store = MemoryStore::new();
        let cmd = command(UserSubcommand::Update {
            id: "missing".to_string(),
            name: Some("Ada".to_string()),
            email: None,
        });

        let result = cmd.run(&store).await;
        assert!(matches!(result, Err(UserCommandError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_forced_delete_removes_record() {
        let store = MemoryStore::new();
        store
            .insert("k1", UserFields::new("Ada", "ada@example.com"))
            .await;

        let cmd = command(UserSubcommand::Delete {
            id: "k1".to_string(),
            force: true,
        });
        cmd.run(&store).await.unwrap();

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_errors() {
        let store = MemoryStore::new();
        let cmd = command(UserSubcommand::Delete {
            id: "missing".to_string(),
            force: true,
        });

        let result = cmd.run(&store).await;
        assert!(matches!(result, Err(UserCommandError::NotFound(_))));
    }
}
