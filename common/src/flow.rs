//! 抽出フローの状態管理
//!
//! 単一ファイルとバッチを1つのコントローラで扱う。UI（ブラウザ/CLI）は
//! このコントローラだけを状態として持ち、通信・タイマー・描画を担当する。
//!
//! 2つのフローで異なる振る舞い:
//! - 単一: 受付後に自動開始、通信失敗時はデモ結果（`demo_fallback` 有効時）
//! - バッチ: 明示的に開始、通信失敗時はエラー表示して Upload に戻る

use crate::error::{Error, Result};
use crate::export::{json_export_filename, ExportButtonState};
use crate::intake::{validate_single, IntakeRejection, IntakeWarning, SelectedFileSet};
use crate::mock::demo_result;
use crate::progress::{ProcessingStep, Progress, BATCH_DONE};
use crate::render::{BatchView, SingleView};
use crate::types::{ExtractionResult, ExtractionType, FileHandle};
use crate::view::{BatchTab, SingleTab, TabSet, ViewState};

pub const EXTRACT_PATH: &str = "/api/v1/extract";
pub const BATCH_EXTRACT_PATH: &str = "/api/v1/batch-extract";
pub const EXPORT_EXCEL_PATH: &str = "/api/v1/export-excel";
pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowMode {
    Single,
    Batch,
}

/// フロー設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowConfig {
    /// APIのベースURL（空なら同一オリジン）
    pub api_base: String,
    /// 単一フローで通信失敗時にデモ結果を表示するか
    pub demo_fallback: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            demo_fallback: true,
        }
    }
}

impl FlowConfig {
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }
}

/// 受付処理の結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeReport {
    /// バッチの警告（トースト表示）
    pub warnings: Vec<IntakeWarning>,
    /// 単一ファイルの却下（ドロップゾーンにインライン表示）
    pub rejection: Option<IntakeRejection>,
    /// 自動で処理を開始するか（単一フローで有効なファイルを受け付けた）
    pub auto_start: bool,
}

/// 処理失敗時の扱い
#[derive(Debug, Clone, PartialEq)]
pub enum FailureOutcome {
    /// デモ結果で続行（Processing のまま。残りの待ち時間の後 `complete` する）
    Demo(ExtractionResult),
    /// エラーを表示して Upload に戻った
    Surfaced(String),
}

/// フローの状態
#[derive(Debug, Clone)]
pub struct Flow<F> {
    mode: FlowMode,
    config: FlowConfig,
    view: ViewState,
    selection: SelectedFileSet<F>,
    extraction_type: ExtractionType,
    result: Option<ExtractionResult>,
    progress: Progress,
    in_flight: usize,
    single_tabs: TabSet<SingleTab>,
    batch_tabs: TabSet<BatchTab>,
    export_state: ExportButtonState,
    inline_error: Option<IntakeRejection>,
    /// 却下のたびに増える番号（古いタイマーが新しい表示を消さないため）
    rejection_seq: u64,
}

impl<F: FileHandle + Clone> Flow<F> {
    pub fn new(mode: FlowMode, config: FlowConfig) -> Self {
        let selection = match mode {
            FlowMode::Single => SelectedFileSet::with_limit(1),
            FlowMode::Batch => SelectedFileSet::new(),
        };
        Self {
            mode,
            config,
            view: ViewState::Upload,
            selection,
            extraction_type: ExtractionType::default(),
            result: None,
            progress: Progress::new(),
            in_flight: 0,
            single_tabs: TabSet::new(),
            batch_tabs: TabSet::new(),
            export_state: ExportButtonState::Idle,
            inline_error: None,
            rejection_seq: 0,
        }
    }

    pub fn single(config: FlowConfig) -> Self {
        Self::new(FlowMode::Single, config)
    }

    pub fn batch(config: FlowConfig) -> Self {
        Self::new(FlowMode::Batch, config)
    }

    pub fn mode(&self) -> FlowMode {
        self.mode
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn selection(&self) -> &SelectedFileSet<F> {
        &self.selection
    }

    /// 単一フローの選択ファイル
    pub fn current_file(&self) -> Option<&F> {
        self.selection.get(0)
    }

    pub fn extraction_type(&self) -> ExtractionType {
        self.extraction_type
    }

    pub fn set_extraction_type(&mut self, kind: ExtractionType) {
        self.extraction_type = kind;
    }

    pub fn result(&self) -> Option<&ExtractionResult> {
        self.result.as_ref()
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    /// 処理中のファイル数
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn single_tabs(&self) -> &TabSet<SingleTab> {
        &self.single_tabs
    }

    pub fn single_tabs_mut(&mut self) -> &mut TabSet<SingleTab> {
        &mut self.single_tabs
    }

    pub fn batch_tabs(&self) -> &TabSet<BatchTab> {
        &self.batch_tabs
    }

    pub fn batch_tabs_mut(&mut self) -> &mut TabSet<BatchTab> {
        &mut self.batch_tabs
    }

    pub fn export_state(&self) -> ExportButtonState {
        self.export_state
    }

    pub fn inline_error(&self) -> Option<&IntakeRejection> {
        self.inline_error.as_ref()
    }

    pub fn clear_inline_error(&mut self) {
        self.inline_error = None;
    }

    /// 直近の却下の番号
    pub fn rejection_token(&self) -> u64 {
        self.rejection_seq
    }

    /// `token` の却下がまだ表示中なら消す
    pub fn expire_inline_error(&mut self, token: u64) {
        if token == self.rejection_seq {
            self.inline_error = None;
        }
    }

    /// アップロードエリアの見出し
    pub fn upload_heading(&self) -> String {
        match (self.mode, self.selection.len()) {
            (FlowMode::Batch, 0) => "Drop multiple invoice PDFs here".to_string(),
            (FlowMode::Batch, n) => format!("{} PDF(s) selected", n),
            (FlowMode::Single, _) => match self.current_file() {
                Some(file) => file.name(),
                None => "Drop your PDF here".to_string(),
            },
        }
    }

    /// ファイル受付
    pub fn intake(&mut self, files: Vec<F>) -> IntakeReport {
        if self.view != ViewState::Upload {
            log::warn!("intake ignored while {}", self.view.as_str());
            return IntakeReport::default();
        }

        match self.mode {
            FlowMode::Batch => IntakeReport {
                warnings: self.selection.add_files(files),
                ..Default::default()
            },
            FlowMode::Single => {
                let Some(file) = files.into_iter().next() else {
                    return IntakeReport::default();
                };
                match validate_single(&file) {
                    Ok(()) => {
                        self.selection.replace(file);
                        self.inline_error = None;
                        IntakeReport {
                            auto_start: true,
                            ..Default::default()
                        }
                    }
                    Err(rejection) => {
                        self.inline_error = Some(rejection.clone());
                        self.rejection_seq += 1;
                        IntakeReport {
                            rejection: Some(rejection),
                            ..Default::default()
                        }
                    }
                }
            }
        }
    }

    pub fn remove_file(&mut self, index: usize) -> Option<F> {
        if self.view != ViewState::Upload {
            return None;
        }
        self.selection.remove(index)
    }

    pub fn clear_files(&mut self) {
        if self.view == ViewState::Upload {
            self.selection.clear();
        }
    }

    /// 処理開始（Upload → Processing）
    ///
    /// 送信するファイルを返す。
    pub fn start(&mut self) -> Result<Vec<F>> {
        if self.selection.is_empty() {
            return Err(Error::EmptySelection);
        }
        self.view = self.view.transition(ViewState::Processing)?;
        self.progress.reset();
        self.in_flight = self.selection.len();
        self.result = None;
        Ok(self.selection.files().to_vec())
    }

    /// 単一フローのステップを進める
    pub fn advance(&mut self, step: ProcessingStep) {
        if self.view == ViewState::Processing {
            self.progress.activate(step);
        }
    }

    pub fn set_progress(&mut self, percent: u8) {
        if self.view == ViewState::Processing {
            self.progress.set_percent(percent);
        }
    }

    /// 結果を受け取り Results へ
    pub fn complete(&mut self, result: ExtractionResult) -> Result<()> {
        self.view = self.view.transition(ViewState::Results)?;
        self.progress.set_percent(BATCH_DONE);
        if self.mode == FlowMode::Single {
            self.progress.activate(ProcessingStep::Finalize);
        }
        self.result = Some(result);
        self.single_tabs.reset();
        self.batch_tabs.reset();
        Ok(())
    }

    /// 処理失敗
    pub fn fail(&mut self, error: &Error) -> FailureOutcome {
        if self.mode == FlowMode::Single && self.config.demo_fallback && error.is_transport() {
            let filename = self.current_file().map(|f| f.name()).unwrap_or_default();
            log::info!("extraction failed ({}); showing demo results", error);
            return FailureOutcome::Demo(demo_result(self.extraction_type, &filename));
        }

        if self.view == ViewState::Processing {
            self.view = ViewState::Upload;
        }
        self.progress.reset();
        self.in_flight = 0;
        if self.mode == FlowMode::Single {
            // 選び直してもらう（自動開始は受付時にしか起きない）
            self.selection.clear();
        }

        let message = match self.mode {
            FlowMode::Batch => format!("Failed to process files: {}", error),
            FlowMode::Single => format!("Failed to extract data: {}", error),
        };
        FailureOutcome::Surfaced(message)
    }

    /// 初期状態に戻す（Results → Upload）
    pub fn reset(&mut self) -> Result<()> {
        if self.view == ViewState::Processing {
            return Err(Error::InvalidTransition {
                from: self.view.as_str(),
                to: ViewState::Upload.as_str(),
            });
        }
        self.view = ViewState::Upload;
        self.selection.clear();
        self.result = None;
        self.progress.reset();
        self.in_flight = 0;
        self.single_tabs.reset();
        self.batch_tabs.reset();
        self.export_state = ExportButtonState::Idle;
        self.inline_error = None;
        Ok(())
    }

    /// Excel出力の開始（ボタンを無効化して結果を返す）
    pub fn begin_export(&mut self) -> Result<ExtractionResult> {
        let result = self.result.clone().ok_or(Error::NoResult)?;
        if self.export_state == ExportButtonState::Busy {
            return Err(Error::Export("export already in progress".to_string()));
        }
        self.export_state = ExportButtonState::Busy;
        Ok(result)
    }

    /// Excel出力の終了（成否にかかわらず呼ぶ）
    pub fn finish_export(&mut self) {
        self.export_state = ExportButtonState::Idle;
    }

    /// 単一フローのJSONダウンロード内容（ファイル名, 本文）
    pub fn json_export(&self) -> Option<(String, String)> {
        let result = self.result.as_ref()?;
        let original = self
            .current_file()
            .map(|f| f.name())
            .or_else(|| result.filename().map(str::to_string))
            .unwrap_or_else(|| "document.pdf".to_string());
        let body = serde_json::to_string_pretty(result.as_value()).ok()?;
        Some((json_export_filename(&original), body))
    }

    pub fn batch_view(&self) -> Option<BatchView> {
        self.result.as_ref().map(BatchView::from_result)
    }

    pub fn single_view(&self) -> Option<SingleView> {
        self.result.as_ref().map(SingleView::from_result)
    }
}
