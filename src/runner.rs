//! コマンドの処理本体
//!
//! ブラウザ版と同じフローコントローラを使い、受付・進捗・失敗時の扱いを揃える。
//! CLIでは擬似的な待ち時間は入れない。

use crate::client::{ApiClient, Upload};
use crate::error::{ExtractError, Result};
use crate::scanner::LocalFile;
use indicatif::{ProgressBar, ProgressStyle};
use invoice_extract_common::export::excel_core::generate_excel_buffer;
use invoice_extract_common::export::DEFAULT_EXCEL_FILENAME;
use invoice_extract_common::progress::{BATCH_DONE, BATCH_RECEIVED, BATCH_SENDING};
use invoice_extract_common::{
    Error, ExtractionResult, ExtractionType, FailureOutcome, FileHandle, Flow, ProcessingStep,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

fn step_line(step: ProcessingStep) {
    println!("[{}/{}] {}...", step.number(), ProcessingStep::ALL.len(), step.label());
}

fn read_upload(file: &LocalFile) -> Result<Upload> {
    Ok(Upload {
        name: file.name(),
        bytes: file.read()?,
    })
}

/// 単一PDFの抽出
///
/// 通信に失敗した場合、デモ表示が有効ならデモ結果で完了する。
pub async fn extract_one(
    client: &ApiClient,
    file: LocalFile,
    kind: ExtractionType,
) -> Result<Flow<LocalFile>> {
    let mut flow = Flow::single(client.config().clone());
    flow.set_extraction_type(kind);

    let report = flow.intake(vec![file]);
    if let Some(rejection) = report.rejection {
        return Err(ExtractError::Rejected(rejection.message()));
    }
    let file = flow
        .start()?
        .into_iter()
        .next()
        .ok_or(Error::EmptySelection)?;

    step_line(ProcessingStep::Upload);
    flow.advance(ProcessingStep::Upload);
    let upload = read_upload(&file)?;

    step_line(ProcessingStep::ExtractText);
    flow.advance(ProcessingStep::ExtractText);

    step_line(ProcessingStep::Analyze);
    flow.advance(ProcessingStep::Analyze);
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("{} ({})", file.name(), kind.label()));
    spinner.enable_steady_tick(Duration::from_millis(120));
    let outcome = client.extract(upload, kind).await;
    spinner.finish_and_clear();

    let result = match outcome {
        Ok(result) => result,
        Err(e) => match flow.fail(&e) {
            FailureOutcome::Demo(demo) => {
                log::warn!("extraction failed: {}", e);
                println!("⚠ Showing demo results: {}", e);
                demo
            }
            FailureOutcome::Surfaced(message) => return Err(ExtractError::Failed(message)),
        },
    };

    step_line(ProcessingStep::Finalize);
    flow.advance(ProcessingStep::Finalize);
    flow.complete(result)?;
    Ok(flow)
}

/// 複数PDFの一括抽出
///
/// 受付時の警告は表示して続行する。通信失敗はエラーで返す。
pub async fn extract_batch(client: &ApiClient, files: Vec<LocalFile>) -> Result<Flow<LocalFile>> {
    let mut flow = Flow::batch(client.config().clone());

    let report = flow.intake(files);
    for warning in &report.warnings {
        log::warn!("{}", warning.message());
        println!("⚠ {}", warning.message());
    }

    let files = flow.start()?;
    println!("✔ {}件のPDFを送信します", files.len());
    let uploads = files.iter().map(read_upload).collect::<Result<Vec<_>>>()?;

    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos:>3}%")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    flow.set_progress(BATCH_SENDING);
    bar.set_position(flow.progress().percent().into());

    let outcome = client
        .batch_extract(uploads, || {
            flow.set_progress(BATCH_RECEIVED);
            bar.set_position(BATCH_RECEIVED.into());
        })
        .await;

    match outcome {
        Ok(result) => {
            flow.set_progress(BATCH_DONE);
            bar.set_position(flow.progress().percent().into());
            bar.finish();
            flow.complete(result)?;
            Ok(flow)
        }
        Err(e) => {
            bar.abandon();
            log::error!("batch processing error: {}", e);
            match flow.fail(&e) {
                FailureOutcome::Surfaced(message) => Err(ExtractError::Failed(message)),
                FailureOutcome::Demo(_) => Err(ExtractError::Api(e)),
            }
        }
    }
}

/// 保存先のファイル名（サーバー指定の名前からディレクトリ部分を除く）
fn safe_file_name(name: &str) -> &str {
    Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(DEFAULT_EXCEL_FILENAME)
}

/// サーバーでExcelを生成して保存
pub async fn export_remote(
    client: &ApiClient,
    result: &ExtractionResult,
    output_dir: &Path,
) -> Result<PathBuf> {
    let download = client
        .export_excel(result)
        .await
        .map_err(|e| ExtractError::Failed(format!("Failed to export Excel file: {}", e)))?;

    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(safe_file_name(&download.filename));
    std::fs::write(&path, &download.bytes)?;
    Ok(path)
}

/// ローカルでExcelを生成して保存
pub fn export_local(result: &ExtractionResult, output_dir: &Path, processed_on: &str) -> Result<PathBuf> {
    let buffer = generate_excel_buffer(result, processed_on)
        .map_err(|e| ExtractError::Failed(format!("Failed to export Excel file: {}", e)))?;

    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(DEFAULT_EXCEL_FILENAME);
    std::fs::write(&path, buffer)?;
    Ok(path)
}

/// 結果JSONの読み込み（エクスポート用）
pub fn load_result(path: &Path) -> Result<ExtractionResult> {
    if !path.is_file() {
        return Err(ExtractError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    if value.is_null() {
        return Err(Error::NoResult.into());
    }
    Ok(ExtractionResult::new(value))
}
