use clap::{Parser, Subcommand};
use log::LevelFilter;
use log4rs::Config;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Logger, Root};
use std::path::PathBuf;
use std::str::FromStr;
use task_cli::{JsonFileStorage, Status, TaskTracker};

#[derive(Parser, Debug)]
#[command(name = "task-cli", version, about = "Track tasks in a local JSON file")]
struct Cli {
    /// File the task list is stored in
    #[arg(long, value_name = "PATH", default_value = "tasks.json", global = true)]
    file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },
    /// Replace the description of an existing task
    Update {
        id: u32,
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },
    /// Delete a task
    Delete { id: u32 },
    /// Mark a task as in progress
    MarkInProgress { id: u32 },
    /// Mark a task as done
    MarkDone { id: u32 },
    /// List tasks, optionally only those with the given status
    List { filter: Option<String> },
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let tracker = TaskTracker::new(JsonFileStorage::new(cli.file));

    match cli.command {
        Commands::Add { description } => {
            let id = tracker.add(&description.join(" "))?;
            println!("Task added successfully (ID: {})", id);
        }
        Commands::Update { id, description } => {
            tracker.update(id, &description.join(" "))?;
            println!("Task {} updated", id);
        }
        Commands::Delete { id } => {
            tracker.delete(id)?;
            println!("Task {} deleted", id);
        }
        Commands::MarkInProgress { id } => {
            tracker.mark(id, Status::InProgress)?;
            println!("Task {} marked as in-progress", id);
        }
        Commands::MarkDone { id } => {
            tracker.mark(id, Status::Done)?;
            println!("Task {} marked as done", id);
        }
        Commands::List { filter } => {
            // An invalid filter is rejected here, before the file is touched
            let filter = filter.as_deref().map(Status::from_str).transpose()?;
            let tasks = tracker.list(filter)?;
            if tasks.is_empty() {
                println!("No tasks found");
            } else {
                for task in &tasks {
                    println!("{}", task);
                }
            }
        }
    }

    Ok(())
}

fn init_logging() {
    // Logs go to stderr so command output on stdout stays clean
    let stderr = ConsoleAppender::builder().target(Target::Stderr).build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .logger(Logger::builder().build("task_cli", LevelFilter::Info))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn))
        .unwrap();
    let _log4rs_handle = log4rs::init_config(config).unwrap();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
