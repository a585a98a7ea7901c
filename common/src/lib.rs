//! Invoice Extract Common Library
//!
//! CLIとWeb(WASM)で共有される型・フロー制御・表示用ビューモデル

pub mod types;
pub mod error;
pub mod format;
pub mod intake;
pub mod view;
pub mod progress;
pub mod notify;
pub mod render;
pub mod mock;
pub mod flow;
pub mod export;

pub use types::{ExtractionResult, ExtractionType, FileHandle, FileMeta, InvoiceRecord};
pub use error::{Error, Result};
pub use intake::{IntakeRejection, IntakeWarning, SelectedFileSet, MAX_BATCH_FILES, MAX_FILE_SIZE};
pub use view::{BatchTab, SingleTab, TabKind, TabSet, ViewState};
pub use progress::{ProcessingStep, Progress};
pub use notify::{Notification, NotificationCenter, NotificationKind};
pub use render::{BatchStats, BatchView, ErrorListView, LineItemRow, SingleView, SummaryRow};
pub use flow::{FailureOutcome, Flow, FlowConfig, FlowMode, IntakeReport};
pub use export::{filename_from_content_disposition, json_export_filename, ExportButtonState};
