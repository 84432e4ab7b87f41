use clap::Parser;
use jdkman::cli::{Cli, CommandHandler};
use jdkman::core::init_logging;
use jdkman::environments::java::ProcessProber;
use jdkman::error::{AppError, ContextualResult};
use jdkman::infrastructure::{get_data_dir, ConfigRepository, FileSystemConfigRepository};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprint!("{}", e.user_message());
            process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> ContextualResult<String> {
    let data_dir = get_data_dir().map_err(|e| e.with_context("定位数据目录"))?;
    let repository =
        FileSystemConfigRepository::new(data_dir).map_err(|e| e.with_context("创建数据目录"))?;
    let settings = repository
        .load_settings()
        .await
        .map_err(|e| e.with_context("加载设置文件"))?;
    init_logging(settings.log_level.as_deref());

    let working_dir = std::env::current_dir()
        .and_then(|dir| dir.canonicalize())
        .map_err(|e| AppError::from(e).with_context("获取当前目录"))?;
    let scripts_dir = settings.scripts_dir(repository.data_dir());
    let prober = ProcessProber::new(settings.probe_timeout());

    let handler = CommandHandler::new(
        Arc::new(repository),
        Arc::new(prober),
        scripts_dir,
        working_dir,
    );
    handler.handle_command(cli.command).await
}
