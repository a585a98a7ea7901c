use clap::Parser;
use invoice_extract::{cli, client, config, error, report, runner, scanner};
use cli::{Cli, Commands};
use client::ApiClient;
use config::Config;
use error::Result;
use std::path::PathBuf;
use std::time::Duration;

fn init_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    let config = Config::load()?;
    let timeout = Duration::from_secs(config.timeout_seconds);

    match cli.command {
        Commands::Extract { file, kind, output, demo } => {
            println!("📄 invoice-extract - 抽出 ({})\n", kind.label());

            let local = scanner::inspect_file(&file)?;
            let client = ApiClient::new(config.flow_config(cli.api_url.as_deref(), demo), timeout)?;
            let flow = runner::extract_one(&client, local, kind).await?;

            if let Some(view) = flow.single_view() {
                println!("\n{}", report::single_report(&view));
            }

            if let Some((default_name, body)) = flow.json_export() {
                let output = output.unwrap_or_else(|| PathBuf::from(default_name));
                std::fs::write(&output, body)?;
                println!("✔ 結果を保存: {}", output.display());
            }

            println!("\n✅ 抽出完了");
        }

        Commands::Batch { paths, output } => {
            println!("📚 invoice-extract - 一括抽出\n");

            let files = scanner::collect_inputs(&paths)?;
            let client = ApiClient::new(config.flow_config(cli.api_url.as_deref(), false), timeout)?;
            let flow = runner::extract_batch(&client, files).await?;

            if let Some(view) = flow.batch_view() {
                println!("\n{}", report::batch_report(&view));
            }

            if let Some(result) = flow.result() {
                let json = serde_json::to_string_pretty(result)?;
                std::fs::write(&output, json)?;
                println!("✔ 結果を保存: {}", output.display());
            }

            println!("\n✅ 一括抽出完了");
        }

        Commands::Export { input, output, local } => {
            println!("📊 invoice-extract - Excel出力\n");

            let result = runner::load_result(&input)?;
            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));

            let path = if local {
                let processed_on = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
                runner::export_local(&result, &output_dir, &processed_on)?
            } else {
                let client = ApiClient::new(config.flow_config(cli.api_url.as_deref(), false), timeout)?;
                runner::export_remote(&client, &result, &output_dir).await?
            };

            println!("✔ Excel file downloaded successfully: {}", path.display());
        }

        Commands::Config { set_base_url, demo_fallback, show } => {
            let mut config = config;

            if let Some(url) = set_base_url {
                config.set_base_url(url)?;
                println!("✔ ベースURLを設定しました");
            }

            if let Some(toggle) = demo_fallback {
                config.set_demo_fallback(toggle.enabled())?;
                println!("✔ デモ表示を{}にしました", if toggle.enabled() { "有効" } else { "無効" });
            }

            if show {
                println!("設定:");
                println!("  設定ファイル: {}", Config::config_path()?.display());
                println!("  ベースURL: {}", config.api_base());
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  デモ表示: {}", if config.demo_fallback { "有効" } else { "無効" });

                let client = ApiClient::new(
                    config.flow_config(cli.api_url.as_deref(), false),
                    Duration::from_secs(5),
                )?;
                match client.health().await {
                    Ok(true) => println!("  API: 接続OK (healthy)"),
                    Ok(false) => println!("  API: 応答あり（status が healthy ではありません）"),
                    Err(e) => println!("  API: 接続できません ({})", e),
                }
            }
        }
    }

    Ok(())
}
