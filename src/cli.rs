//! Command-line interface.
//!
//! Each command opens the configured backend, drives the same screen
//! controllers an interactive client would, and prints the refreshed
//! collection. Failures are printed as `<title>: <message>` on stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::backend::{self, Backend, BackendColumn};
use crate::config::Config;
use crate::constants::{ERROR_NOT_SIGNED_IN, SUCCESS_SIGNED_IN, SUCCESS_SIGNED_OUT, SUCCESS_SIGN_UP_CONFIRM};
use crate::error::{BoardError, Operation};
use crate::refresh::{BoardsScreen, ColumnsScreen};
use crate::repositories::TaskRepository;
use crate::session::Session;
use crate::utils::datetime::format_human_due;

/// Kanban task boards on a Supabase (or local) backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default configuration file
    InitConfig {
        /// Destination (defaults to the XDG config path)
        path: Option<PathBuf>,
    },
    /// Create an account
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TASKBOARD_PASSWORD")]
        password: String,
    },
    /// Sign in and remember the session
    Signin {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TASKBOARD_PASSWORD")]
        password: String,
    },
    /// Sign out and forget the session
    Signout,
    /// Manage your boards
    Boards {
        #[command(subcommand)]
        action: BoardAction,
    },
    /// Manage the columns of a board
    Columns {
        /// Board id
        board: String,
        #[command(subcommand)]
        action: ColumnAction,
    },
    /// Manage tasks
    Tasks {
        #[command(subcommand)]
        action: TaskAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum BoardAction {
    /// List your boards
    List,
    /// Create a board
    Add {
        name: String,
        description: String,
    },
    /// Replace a board's name and description
    Edit {
        id: String,
        name: String,
        description: String,
    },
    /// Delete a board
    Rm { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ColumnAction {
    /// Show the board's columns and tasks
    List,
    /// Append a column
    Add { name: String },
    /// Rename a column
    Rename { id: String, name: String },
    /// Delete a column
    Rm { id: String },
}

#[derive(Subcommand, Debug)]
pub enum TaskAction {
    /// List the tasks of a column
    List { column: String },
    /// Add a task to a column of a board
    Add {
        /// Board id
        #[arg(long)]
        board: String,
        /// Column id
        #[arg(long)]
        column: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Due date, e.g. "2025-01-15 14:30"
        #[arg(long, default_value = "")]
        due: String,
    },
    /// Replace a task's title, description and due date
    Edit {
        /// Board id
        #[arg(long)]
        board: String,
        /// Task id
        #[arg(long)]
        id: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        due: String,
    },
}

/// Load the configuration named on the command line, or the default one.
pub fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from_file(path),
        None => Config::load(),
    }
}

/// Run a parsed command line.
pub async fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Command::InitConfig { path } => {
            let path = match path {
                Some(path) => path,
                None => Config::get_default_config_path()?,
            };
            Config::generate_default_config(path)
        }
        Command::Signup { email, password } => {
            let (backend, session_path) = connect(&config).await?;
            match backend.sign_up(&email, &password).await {
                Ok(Some(session)) => {
                    session.save(&session_path)?;
                    println!("{} {}", SUCCESS_SIGNED_IN, email);
                    Ok(())
                }
                Ok(None) => {
                    println!("{SUCCESS_SIGN_UP_CONFIRM}");
                    Ok(())
                }
                Err(e) => report(BoardError::query(Operation::SignUp, e)),
            }
        }
        Command::Signin { email, password } => {
            let (backend, session_path) = connect(&config).await?;
            match backend.sign_in(&email, &password).await {
                Ok(session) => {
                    session.save(&session_path)?;
                    info!("Signed in as {}", session.owner_id());
                    println!("{} {}", SUCCESS_SIGNED_IN, email);
                    Ok(())
                }
                Err(e) => report(BoardError::query(Operation::SignIn, e)),
            }
        }
        Command::Signout => {
            let (backend, session_path) = connect(&config).await?;
            if let Some(session) = Session::load(&session_path)? {
                if let Err(e) = backend.sign_out(&session).await {
                    return report(BoardError::query(Operation::SignOut, e));
                }
                std::fs::remove_file(&session_path)
                    .with_context(|| format!("Failed to remove session file: {}", session_path.display()))?;
            }
            println!("{SUCCESS_SIGNED_OUT}");
            Ok(())
        }
        Command::Boards { action } => {
            let (backend, session_path) = connect(&config).await?;
            let session = require_session(backend.as_ref(), &session_path).await?;
            run_boards(backend, session, action).await
        }
        Command::Columns { board, action } => {
            let (backend, session_path) = connect(&config).await?;
            require_session(backend.as_ref(), &session_path).await?;
            run_columns(backend, board, action).await
        }
        Command::Tasks { action } => {
            let (backend, session_path) = connect(&config).await?;
            require_session(backend.as_ref(), &session_path).await?;
            run_tasks(backend, action).await
        }
    }
}

// Open the configured backend and locate the session file.
async fn connect(config: &Config) -> Result<(Arc<dyn Backend>, PathBuf)> {
    let backend = backend::create_backend(&config.backend).await?;
    Ok((backend, Config::get_session_path()?))
}

async fn require_session(backend: &dyn Backend, session_path: &Path) -> Result<Session> {
    let session = Session::load(session_path)?.ok_or_else(|| anyhow::anyhow!(ERROR_NOT_SIGNED_IN))?;
    backend.attach_session(&session).await;
    Ok(session)
}

async fn run_boards(backend: Arc<dyn Backend>, session: Session, action: BoardAction) -> Result<()> {
    let mut screen = BoardsScreen::new(backend, session);
    if let Err(e) = screen.load().await {
        return report(e);
    }

    let outcome = match action {
        BoardAction::List => Ok(()),
        BoardAction::Add { name, description } => {
            let draft = screen.draft_mut();
            draft.name = name;
            draft.description = description;
            screen.submit_draft().await
        }
        BoardAction::Edit { id, name, description } => {
            if !screen.begin_edit(&id) {
                anyhow::bail!("No board with id {id}");
            }
            if let Some(edit) = screen.edit_mut() {
                edit.name = name;
                edit.description = description;
            }
            screen.save_edit().await
        }
        BoardAction::Rm { id } => screen.delete(&id).await,
    };
    if let Err(e) = outcome {
        return report(e);
    }

    for board in screen.boards() {
        println!(
            "{}\t{}\t{}",
            board.id,
            board.name,
            board.description.as_deref().unwrap_or_default()
        );
    }
    Ok(())
}

async fn run_columns(backend: Arc<dyn Backend>, board: String, action: ColumnAction) -> Result<()> {
    let mut screen = ColumnsScreen::new(backend, board);
    if let Err(e) = screen.load().await {
        return report(e);
    }

    let outcome = match action {
        ColumnAction::List => Ok(()),
        ColumnAction::Add { name } => {
            *screen.new_column_name_mut() = name;
            screen.add_column().await
        }
        ColumnAction::Rename { id, name } => {
            if !screen.begin_rename(&id) {
                anyhow::bail!("No column with id {id}");
            }
            if let Some(rename) = screen.rename_mut() {
                rename.name = name;
            }
            screen.save_rename().await
        }
        ColumnAction::Rm { id } => screen.delete_column(&id).await,
    };
    if let Err(e) = outcome {
        return report(e);
    }

    print_columns(screen.columns());
    Ok(())
}

async fn run_tasks(backend: Arc<dyn Backend>, action: TaskAction) -> Result<()> {
    match action {
        TaskAction::List { column } => match TaskRepository::list(backend.as_ref(), &column).await {
            Ok(tasks) => {
                for task in tasks {
                    println!("{}\t{}\t{}", task.position, task.id, task.title);
                }
                Ok(())
            }
            Err(e) => report(e),
        },
        TaskAction::Add {
            board,
            column,
            title,
            description,
            due,
        } => {
            let mut screen = ColumnsScreen::new(backend, board);
            if let Err(e) = screen.load().await {
                return report(e);
            }
            screen.open_task_draft(&column);
            if let Some(draft) = screen.task_draft_mut() {
                draft.title = title;
                draft.description = description;
                draft.due_date = due;
            }
            if let Err(e) = screen.add_task().await {
                return report(e);
            }
            print_columns(screen.columns());
            Ok(())
        }
        TaskAction::Edit {
            board,
            id,
            title,
            description,
            due,
        } => {
            let mut screen = ColumnsScreen::new(backend, board);
            if let Err(e) = screen.load().await {
                return report(e);
            }
            if !screen.begin_task_edit(&id) {
                anyhow::bail!("No task with id {id}");
            }
            if let Some(edit) = screen.task_edit_mut() {
                edit.title = title;
                edit.description = description;
                edit.due_date = due;
            }
            if let Err(e) = screen.save_task_edit().await {
                return report(e);
            }
            print_columns(screen.columns());
            Ok(())
        }
    }
}

fn print_columns(columns: &[BackendColumn]) {
    for column in columns {
        println!("[{}] {} ({})", column.position, column.name, column.id);
        for task in &column.tasks {
            match &task.due_date {
                Some(due) => println!("    [{}] {} ({}) due {}", task.position, task.title, task.id, format_human_due(due)),
                None => println!("    [{}] {} ({})", task.position, task.title, task.id),
            }
        }
    }
}

// Surface a failure as its single "<title>: <message>" notification.
fn report(err: BoardError) -> Result<()> {
    Err(anyhow::anyhow!(err.notification().to_string()))
}
