use std::io;
use log::debug;
use pocketnotes::account_directory::{AccountDirectory, AccountError};
use pocketnotes::data::{Millis, NewNote, Note, NotePatch};
use pocketnotes::kv_store::KeyValueStore;
use pocketnotes::note_store::{NoteStoreEnv, NoteStoreError, NoteStoreImpl};
use pocketnotes::query::QueryView;
use pocketnotes::username_string::UsernameString;
use rpassword::prompt_password;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use crate::cli::Command;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Notes(#[from] NoteStoreError),

    #[error("not logged in")]
    NotLoggedIn,

    #[error("note {0} not found")]
    NoteNotFound(String),

    #[error("failed to read the password: {0}")]
    Prompt(#[from] io::Error),
}

pub async fn execute<S: KeyValueStore, E: NoteStoreEnv>(
    command: Command,
    directory: &impl AccountDirectory,
    notes: &NoteStoreImpl<S, E>,
) -> Result<(), CommandError> {
    debug!("executing {command:?}");
    match command {
        Command::Register { username, password } => {
            let password = password_or_prompt(password)?;
            directory.register(&username, &password).await?;
            println!("registered {username}, log in to start using the account");
        },
        Command::Login { username, password } => {
            let password = password_or_prompt(password)?;
            directory.authenticate(&username, &password).await?;
            println!("logged in as {username}");
        },
        Command::Logout => {
            directory.end_session().await;
            println!("logged out");
        },
        Command::Whoami => match directory.current_session().await {
            Some(username) => println!("{username}"),
            None => return Err(CommandError::NotLoggedIn),
        },
        Command::Users => {
            let current = directory.current_session().await;
            for username in directory.list_usernames().await {
                let marker = if current.as_ref() == Some(&username) { "*" } else { " " };
                println!("{marker} {username}");
            }
        },
        Command::Switch { username, password } => {
            let password = password_or_prompt(password)?;
            if !directory.verify_credentials(&username, &password).await {
                return Err(AccountError::InvalidCredentials.into());
            }
            directory.switch_session(&username).await?;
            println!("switched to {username}");
        },
        Command::List { search, sort } => {
            let username = require_session(directory).await?;
            let listed = QueryView::apply(
                notes.list_notes(&username).await,
                &search,
                sort,
            );
            for note in &listed {
                print_note_line(note);
            }
        },
        Command::Show { id } => {
            let username = require_session(directory).await?;
            let note = notes
                .get_note(&username, &id)
                .await
                .ok_or(CommandError::NoteNotFound(id))?;
            print_note(&note);
        },
        Command::Add { title, body, image } => {
            let username = require_session(directory).await?;
            let note = notes
                .create_note(
                    &username,
                    NewNote {
                        title,
                        body,
                        image_uri: image,
                    },
                )
                .await?;
            println!("{}", note.id);
        },
        Command::Edit { id, title, body, image, clear_image } => {
            let username = require_session(directory).await?;
            let image_uri = match (image, clear_image) {
                (Some(image), _) => Some(Some(image)),
                (None, true) => Some(None),
                (None, false) => None,
            };
            let note = notes
                .update_note(
                    &username,
                    &id,
                    NotePatch {
                        title,
                        body,
                        image_uri,
                    },
                )
                .await
                .map_err(|e| match e {
                    NoteStoreError::NotFound => CommandError::NoteNotFound(id),
                    e => e.into(),
                })?;
            print_note(&note);
        },
        Command::Rm { id } => {
            let username = require_session(directory).await?;
            notes.delete_note(&username, &id).await?;
        },
    }
    Ok(())
}

fn password_or_prompt(password: Option<String>) -> Result<String, CommandError> {
    match password {
        Some(password) => Ok(password),
        None => Ok(prompt_password("Password: ")?),
    }
}

async fn require_session(
    directory: &impl AccountDirectory,
) -> Result<UsernameString, CommandError> {
    directory
        .current_session()
        .await
        .ok_or(CommandError::NotLoggedIn)
}

fn format_millis(millis: Millis) -> String {
    OffsetDateTime::from_unix_timestamp_nanos(millis as i128 * 1_000_000)
        .ok()
        .and_then(|t| t.format(&Rfc3339).ok())
        .unwrap_or_else(|| millis.to_string())
}

fn print_note_line(note: &Note) {
    println!(
        "{}  {}  {}",
        note.id,
        format_millis(note.updated_at),
        note.title,
    );
}

fn print_note(note: &Note) {
    println!("id:      {}", note.id);
    println!("title:   {}", note.title);
    println!("created: {}", format_millis(note.created_at));
    println!("updated: {}", format_millis(note.updated_at));
    if let Some(image_uri) = &note.image_uri {
        println!("image:   {image_uri}");
    }
    println!();
    println!("{}", note.body);
}
