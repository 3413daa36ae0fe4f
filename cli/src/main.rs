//! cmdslot CLI — per-project command slots dispatched to tmux or a shell.
//!
//! # Usage
//!
//! ```text
//! cmdslot list
//! cmdslot run 3
//! cmdslot edit 3
//! cmdslot delete 3
//! cmdslot defaults --pre "make fmt"
//! cmdslot manage
//! ```

mod host;
mod parse;

use std::path::PathBuf;
use std::process;

use cmdslot_core::command::{Command, Response};
use cmdslot_core::engine::Engine;
use cmdslot_core::infrastructure::runner::ShellRunner;
use cmdslot_core::infrastructure::tmux::TmuxBackend;
use cmdslot_core::types::{config, ConfigPatch, GlobalConfig};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let arg_refs: Vec<&str> = args[1..].iter().map(|s| s.as_str()).collect();

    if arg_refs.is_empty() || arg_refs[0] == "help" {
        println!("{}", parse::usage());
        return;
    }

    let cli = match parse::parse_args(&arg_refs) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("cmdslot: {}", e);
            process::exit(1);
        }
    };

    let global = match load_global_config() {
        Ok(g) => g,
        Err(e) => {
            eprintln!("cmdslot: {}", e);
            process::exit(1);
        }
    };

    let host = host::TerminalHost::new(cli.file);
    let backend = TmuxBackend::new(ShellRunner);
    let mut engine = Engine::new(global, host, backend);

    if cli.window.is_some() {
        engine.execute(Command::Configure {
            patch: ConfigPatch {
                window_id: cli.window,
                ..ConfigPatch::default()
            },
        });
    }

    match engine.execute(cli.command) {
        Response::Ok { output } => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Response::Error { message } => {
            eprintln!("cmdslot error: {}", message);
            process::exit(1);
        }
    }
}

/// Defaults merged with `config.yaml` from the config directory, when present.
/// A missing file is fine; a malformed one is a startup error.
fn load_global_config() -> Result<GlobalConfig, String> {
    let mut global = GlobalConfig::default();
    let path = resolve_config_dir().join("config.yaml");
    if path.exists() {
        global.merge(config::load_patch(&path)?);
    }
    Ok(global)
}

fn resolve_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CMDSLOT_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
    PathBuf::from(home).join(".config").join("cmdslot")
}
