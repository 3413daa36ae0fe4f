//! CLI argument parsing.
//!
//! Arguments are expected WITHOUT the program name (i.e. `["run", "3"]`, not
//! `["cmdslot", "run", "3"]`). The global flags `--window <id>` and
//! `--file <path>` may appear anywhere and are collected separately from the
//! subcommand.

use cmdslot_core::command::Command;

/// A parsed invocation: the operation plus global overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct Cli {
    pub command: Command,
    /// Override for the configured tmux window target.
    pub window: Option<String>,
    /// Override for the "current file" the host reports.
    pub file: Option<String>,
}

pub fn usage() -> &'static str {
    "Usage: cmdslot [--window <id>] [--file <path>] <command>\n\
     \n\
     Commands:\n\
     \x20 list                          show the nine slots\n\
     \x20 run <slot>                    dispatch a slot (1-9)\n\
     \x20 edit <slot>                   re-prompt a slot's cmd/pre/post\n\
     \x20 delete <slot>                 clear a slot\n\
     \x20 defaults [--pre <c>] [--post <c>]  set project-level hook defaults\n\
     \x20 manage                        pick a slot, then run/edit/delete it\n\
     \x20 help                          show this text"
}

/// Parse CLI arguments into a typed invocation.
pub fn parse_args(args: &[&str]) -> Result<Cli, String> {
    let mut window = None;
    let mut file = None;
    let mut positional: Vec<&str> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i] {
            "--window" => {
                i += 1;
                window = Some(take_arg(args, i, "--window")?);
            }
            "--file" => {
                i += 1;
                file = Some(take_arg(args, i, "--file")?);
            }
            other => positional.push(other),
        }
        i += 1;
    }

    if positional.is_empty() {
        return Err("no command specified. Run 'cmdslot help' for usage.".into());
    }

    let command = match positional[0] {
        "list" => parse_bare(&positional, Command::List)?,
        "run" => parse_slot_op(&positional, |index| Command::Run { index })?,
        "edit" => parse_slot_op(&positional, |index| Command::Edit { index })?,
        "delete" => parse_slot_op(&positional, |index| Command::Delete { index })?,
        "defaults" => parse_defaults(&positional)?,
        "manage" => parse_bare(&positional, Command::Manage)?,
        other => return Err(format!("unknown command: '{}'", other)),
    };

    Ok(Cli {
        command,
        window,
        file,
    })
}

// ---------------------------------------------------------------------------
// Sub-parsers
// ---------------------------------------------------------------------------

fn parse_bare(positional: &[&str], command: Command) -> Result<Command, String> {
    if positional.len() > 1 {
        return Err(format!(
            "'{}' takes no arguments (got '{}')",
            positional[0], positional[1]
        ));
    }
    Ok(command)
}

/// `cmdslot <run|edit|delete> <slot>`
fn parse_slot_op(
    positional: &[&str],
    build: impl Fn(u8) -> Command,
) -> Result<Command, String> {
    if positional.len() != 2 {
        return Err(format!("Usage: cmdslot {} <slot>", positional[0]));
    }
    let index: u8 = positional[1]
        .parse()
        .map_err(|_| format!("invalid slot index: '{}'", positional[1]))?;
    Ok(build(index))
}

/// `cmdslot defaults [--pre <cmd>] [--post <cmd>]`
///
/// The hook flags are consumed here rather than globally; an omitted flag
/// sets that default to unset.
fn parse_defaults(positional: &[&str]) -> Result<Command, String> {
    let mut pre = String::new();
    let mut post = String::new();

    let rest = &positional[1..];
    let mut i = 0;
    while i < rest.len() {
        match rest[i] {
            "--pre" => {
                i += 1;
                pre = take_arg(rest, i, "--pre")?;
            }
            "--post" => {
                i += 1;
                post = take_arg(rest, i, "--post")?;
            }
            other => return Err(format!("unknown flag for defaults: '{}'", other)),
        }
        i += 1;
    }
    Ok(Command::SetDefaults { pre, post })
}

fn take_arg(args: &[&str], index: usize, flag: &str) -> Result<String, String> {
    args.get(index)
        .map(|s| s.to_string())
        .ok_or_else(|| format!("{} requires a value", flag))
}
