use cat_roster::app::display;
use cat_roster::domain::ports::ConfigProvider;
use cat_roster::utils::error::{CatRosterError, ErrorSeverity};
use cat_roster::utils::{logger, validation::Validate};
use cat_roster::{CatListsController, CliConfig, HttpPeopleSource, TomlConfig, ViewState};
use clap::Parser;

fn exit_with(e: &CatRosterError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    // 載入 TOML 配置 (命令列參數優先)
    if let Some(path) = config.config.clone() {
        match TomlConfig::from_file(&path) {
            Ok(file) => config.apply_file(&file),
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        }
    }

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.log_level.as_deref());
    } else {
        logger::init_cli_logger(config.verbose, config.log_level.as_deref());
    }

    tracing::info!("Starting cat-roster");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let source = match HttpPeopleSource::from_config(&config) {
        Ok(source) => source,
        Err(e) => exit_with(&e),
    };

    let controller = CatListsController::new(source);
    controller.load(config.api_endpoint()).await;

    let state = controller.state();
    let output = match display::render(&state, config.output_format()) {
        Ok(output) => output,
        Err(e) => exit_with(&e),
    };

    match state {
        ViewState::Ready { roster } => {
            println!("{}", output.trim_end());
            tracing::info!("✅ Listed {} cats", roster.total());
        }
        _ => {
            // 錯誤內容仍依格式輸出，方便腳本解析
            println!("{}", output.trim_end());
            std::process::exit(1);
        }
    }

    Ok(())
}
