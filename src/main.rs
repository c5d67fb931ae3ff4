//! `jarvis-settings` 바이너리 진입점.

use anyhow::Result;
use jarvis_settings::application::schema::jarvis_schema;
use jarvis_settings::application::usecases::edit_setting::display_value;
use jarvis_settings::interface::cli::{Cli, CliAction};
use jarvis_settings::interface::composition::AppComposition;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let (options, action) = match Cli::parse_action() {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(2);
        }
    };

    let result = match AppComposition::from_options(&options).await {
        Ok(composition) => run(&composition, action).await,
        Err(err) => Err(err),
    };

    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run(composition: &AppComposition, action: CliAction) -> Result<()> {
    match action {
        CliAction::Show => {
            let json = composition.inspect_settings_usecase().execute().await?;
            println!("{json}");
        }
        CliAction::Dropdown(kind) => {
            let options = composition
                .resolve_settings_usecase()
                .resolve_dropdown(kind)
                .await?;
            println!("{options}");
        }
        CliAction::Set { key, value } => {
            let stored = composition
                .edit_setting_usecase()
                .execute(&key, &value)
                .await?;
            println!(
                "{key} = {} ({})",
                display_value(&key, &stored),
                composition.store_path().display()
            );
        }
        CliAction::Schema => {
            println!("{}", serde_json::to_string_pretty(&jarvis_schema())?);
        }
    }
    Ok(())
}
