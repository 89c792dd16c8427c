use clap::Parser;
use experience_admin::config::cli::{Command, LogFormat};
use experience_admin::core::{Notifier, RecordStore, RowAction};
use experience_admin::presentation::{self, OutputFormat, TableOptions};
use experience_admin::utils::error::Result;
use experience_admin::utils::logger;
use experience_admin::{AdminError, ApplicationsView, CliConfig, ConsoleNotifier, PostgrestStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    match config.log_format {
        LogFormat::Text => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(config.verbose),
    }

    tracing::info!("Starting experience-admin CLI");

    let settings = match config.settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::debug!("Configuration validation failed: {}", e);
            fail(&e);
        }
    };
    tracing::debug!("Effective settings: {:?}", settings);

    let default_format = settings.default_format;
    let options = TableOptions {
        max_column_width: settings.max_column_width,
    };

    // 機器可讀輸出時，通知只寫日誌
    let machine_output = matches!(
        &config.command,
        Command::List { format, .. } if format.unwrap_or(default_format) != OutputFormat::Table
    );
    let notifier = if machine_output {
        ConsoleNotifier::quiet()
    } else {
        ConsoleNotifier::new()
    };

    let store = match PostgrestStore::new(settings) {
        Ok(store) => store,
        Err(e) => fail(&e),
    };
    let mut view = ApplicationsView::new(store, notifier);

    if let Err(e) = run(&mut view, config.command, default_format, options).await {
        tracing::debug!(
            "Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        fail(&e);
    }

    Ok(())
}

async fn run<S: RecordStore, N: Notifier>(
    view: &mut ApplicationsView<S, N>,
    command: Command,
    default_format: OutputFormat,
    options: TableOptions,
) -> Result<()> {
    view.mount().await?;

    match command {
        Command::List { search, format } => {
            view.set_query(search);
            let visible = view.visible();
            let output = match format.unwrap_or(default_format) {
                OutputFormat::Table => presentation::render_applications(
                    &visible,
                    view.applications().len(),
                    view.query(),
                    options,
                ),
                OutputFormat::Json => presentation::render_json(&visible)?,
                OutputFormat::Csv => presentation::render_csv(&visible)?,
            };
            print!("{}", output);
            if format.unwrap_or(default_format) == OutputFormat::Json {
                println!();
            }
        }
        Command::Approve { id } => {
            view.ensure_action(&id, RowAction::Approve)?;
            view.approve(&id).await?;
            print_status(view, &id);
        }
        Command::Reject { id } => {
            view.ensure_action(&id, RowAction::Reject)?;
            view.reject(&id).await?;
            print_status(view, &id);
        }
        Command::Show { id } => {
            let app = view
                .view_details(&id)
                .ok_or_else(|| AdminError::NotFound { id: id.clone() })?;
            println!("{}", serde_json::to_string_pretty(app)?);
            let actions = RowAction::available_for(app)
                .iter()
                .map(RowAction::label)
                .collect::<Vec<_>>()
                .join(" | ");
            println!("Actions: {}", actions);
        }
    }

    Ok(())
}

fn print_status<S: RecordStore, N: Notifier>(view: &ApplicationsView<S, N>, id: &str) {
    if let Some(app) = view.find(id) {
        println!("📋 {} ({}): {}", app.title, app.id, app.status.badge());
    }
}

fn fail(e: &AdminError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.severity().exit_code());
}
