use std::io::{self, BufRead, Write};

use serde_json::json;

use crate::api::{HttpTaskApi, TaskApi};
use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, ConfigError};
use crate::model::{Config, Task, TaskDraft, TaskId};
use crate::store::SyncController;

type CmdResult = Result<(), Box<dyn std::error::Error>>;
type Controller = SyncController<HttpTaskApi>;

/// Effective config for this invocation: file and environment, then `--api-url`
pub fn resolve_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = config_io::load_config(cli.config.as_deref())?;
    if let Some(url) = &cli.api_url {
        config.api_url = url.clone();
    }
    Ok(config)
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(command: Commands, json: bool, config: &Config) -> CmdResult {
    let api = HttpTaskApi::from_config(config)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let mut ctl = SyncController::new(api);

    runtime.block_on(async {
        match command {
            Commands::List => cmd_list(&mut ctl, json).await,
            Commands::Show(args) => cmd_show(&ctl, args, json).await,
            Commands::Add(args) => cmd_add(&mut ctl, args, json).await,
            Commands::Edit(args) => cmd_edit(&mut ctl, args, json).await,
            Commands::Toggle(args) => cmd_toggle(&mut ctl, args, json).await,
            Commands::Rm(args) => cmd_rm(&mut ctl, args, json).await,
            Commands::Ping => cmd_ping(&ctl, json).await,
        }
    })
}

/// Load the list and pick out one task
async fn load_task(ctl: &mut Controller, id: &TaskId) -> Result<Task, Box<dyn std::error::Error>> {
    ctl.load().await?;
    ctl.store()
        .find_typed(id)
        .cloned()
        .ok_or_else(|| format!("no task with id {}", id).into())
}

/// Print the stored copy of `id` after a mutation
fn print_stored(ctl: &Controller, id: &TaskId, json: bool) -> CmdResult {
    let task = ctl
        .store()
        .find(id)
        .ok_or_else(|| format!("task {} vanished after update", id))?;
    print_task(task, json)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

async fn cmd_list(ctl: &mut Controller, json: bool) -> CmdResult {
    ctl.load().await?;
    print_tasks(ctl.tasks(), json)?;
    Ok(())
}

async fn cmd_show(ctl: &Controller, args: IdArgs, json: bool) -> CmdResult {
    let task = ctl.api().get(&args.id).await?;
    print_task(&task, json)?;
    Ok(())
}

async fn cmd_ping(ctl: &Controller, json: bool) -> CmdResult {
    let message = ctl.api().health().await?;
    if json {
        println!("{}", json!({ "success": true, "message": message }));
    } else {
        println!("{}: {}", ctl.api().base_url(), message);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

async fn cmd_add(ctl: &mut Controller, args: AddArgs, json: bool) -> CmdResult {
    let draft = TaskDraft::new(args.title, args.description);
    if !draft.is_submittable() {
        return Err("task title must not be empty".into());
    }

    let store = ctl.store_mut();
    store.open_editor(None);
    *store.draft_mut() = draft;
    ctl.submit().await?;

    // Nothing was loaded first, so the created task is the only entry
    let task = ctl.tasks().last().ok_or("api returned no task")?;
    print_task(task, json)?;
    Ok(())
}

async fn cmd_edit(ctl: &mut Controller, args: EditArgs, json: bool) -> CmdResult {
    if args.title.is_none() && args.description.is_none() {
        return Err("nothing to change: pass --title and/or --description".into());
    }
    let task = load_task(ctl, &args.id).await?;

    let store = ctl.store_mut();
    store.open_editor(Some(&task));
    let draft = store.draft_mut();
    if let Some(title) = args.title {
        draft.title = title;
    }
    if let Some(description) = args.description {
        draft.description = description;
    }
    if !draft.is_submittable() {
        return Err("task title must not be empty".into());
    }

    ctl.submit().await?;
    print_stored(ctl, &task.id, json)
}

async fn cmd_toggle(ctl: &mut Controller, args: IdArgs, json: bool) -> CmdResult {
    let task = load_task(ctl, &args.id).await?;
    ctl.toggle(&task).await?;
    print_stored(ctl, &task.id, json)
}

async fn cmd_rm(ctl: &mut Controller, args: RmArgs, json: bool) -> CmdResult {
    let task = load_task(ctl, &args.id).await?;
    let prompt = format!("Delete task \"{}\"? [y/N] ", task.title);

    let mut confirmed = false;
    ctl.remove(&task.id, |_| {
        confirmed = args.yes || ask(&prompt);
        confirmed
    })
    .await?;

    if json {
        println!("{}", json!({ "deleted": confirmed, "id": task.id }));
    } else if confirmed {
        println!("deleted {}", task.id);
    } else {
        println!("cancelled");
    }
    Ok(())
}

/// Ask a yes/no question on the terminal. Anything but y/yes is a no.
fn ask(prompt: &str) -> bool {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn api_url_flag_beats_config_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "api_url = \"http://from-file/api\"\n").unwrap();
        let path_str = path.to_str().unwrap();

        let cli = Cli::try_parse_from(["taskdeck", "list", "--config", path_str]).unwrap();
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.api_url, "http://from-file/api");

        let cli = Cli::try_parse_from([
            "taskdeck",
            "list",
            "--config",
            path_str,
            "--api-url",
            "http://from-flag/api",
        ])
        .unwrap();
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.api_url, "http://from-flag/api");
    }
}
