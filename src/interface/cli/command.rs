//! CLI 명령 파싱 모듈.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::dropdown::DropdownKind;

#[derive(Debug, Parser)]
#[command(name = "jarvis-settings")]
#[command(about = "Resolve and edit Jarvis assistant settings")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Settings file (defaults to $JARVIS_SETTINGS or the user config directory)
    #[arg(long, global = true)]
    store: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the resolved settings snapshot (API key redacted)
    Show,
    /// Print the merged option markup of one dropdown
    Dropdown {
        /// instruction, scope, role or reasoning
        name: String,
    },
    /// Validate and persist one setting
    Set { key: String, value: String },
    /// Print the registered settings schema
    Schema,
}

/// 저장소 위치 옵션.
#[derive(Debug, Clone, Default)]
pub struct CliOptions {
    pub store: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    Show,
    Dropdown(DropdownKind),
    Set { key: String, value: String },
    Schema,
}

impl Cli {
    pub fn parse_action() -> Result<(CliOptions, CliAction), String> {
        Cli::parse().into_action()
    }

    fn into_action(self) -> Result<(CliOptions, CliAction), String> {
        let options = CliOptions {
            store: self.store,
        };

        let action = match self.command {
            None | Some(Commands::Show) => CliAction::Show,
            Some(Commands::Dropdown { name }) => {
                let Some(kind) = DropdownKind::from_key(&name) else {
                    return Err(format!(
                        "unknown dropdown {name:?} (expected instruction, scope, role or reasoning)"
                    ));
                };
                CliAction::Dropdown(kind)
            }
            Some(Commands::Set { key, value }) => CliAction::Set { key, value },
            Some(Commands::Schema) => CliAction::Schema,
        };

        Ok((options, action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<(CliOptions, CliAction), String> {
        Cli::try_parse_from(args)
            .map_err(|e| e.to_string())?
            .into_action()
    }

    #[test]
    fn defaults_to_show() {
        let (options, action) = parse(&["jarvis-settings"]).unwrap();
        assert_eq!(action, CliAction::Show);
        assert!(options.store.is_none());
    }

    #[test]
    fn global_store_flag_after_subcommand() {
        let (options, action) =
            parse(&["jarvis-settings", "set", "temp", "5", "--store", "s.json"]).unwrap();
        assert_eq!(
            action,
            CliAction::Set {
                key: "temp".to_string(),
                value: "5".to_string()
            }
        );
        assert_eq!(options.store, Some(PathBuf::from("s.json")));
    }

    #[test]
    fn dropdown_name_is_validated() {
        let (_, action) = parse(&["jarvis-settings", "dropdown", "Role"]).unwrap();
        assert_eq!(action, CliAction::Dropdown(DropdownKind::Role));
        assert!(parse(&["jarvis-settings", "dropdown", "mood"]).is_err());
    }

    #[test]
    fn presets_cannot_be_overridden() {
        assert!(parse(&["jarvis-settings", "--presets", "p.json", "show"]).is_err());
    }

    #[test]
    fn negative_values_are_accepted() {
        let (_, action) = parse(&[
            "jarvis-settings",
            "set",
            "frequency_penalty",
            "--",
            "-5",
        ])
        .unwrap();
        assert_eq!(
            action,
            CliAction::Set {
                key: "frequency_penalty".to_string(),
                value: "-5".to_string()
            }
        );
    }
}
