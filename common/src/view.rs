//! 画面状態（Upload / Processing / Results）とタブ

use crate::error::{Error, Result};

/// 表示中のセクション（常に1つだけ）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ViewState {
    #[default]
    Upload,
    Processing,
    Results,
}

impl ViewState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewState::Upload => "upload",
            ViewState::Processing => "processing",
            ViewState::Results => "results",
        }
    }

    /// 許可される遷移か
    ///
    /// Upload → Processing → Results → Upload の一方向。
    /// Processing → Upload は処理失敗時のみ使う。
    pub fn can_transition(self, to: ViewState) -> bool {
        matches!(
            (self, to),
            (ViewState::Upload, ViewState::Processing)
                | (ViewState::Processing, ViewState::Results)
                | (ViewState::Processing, ViewState::Upload)
                | (ViewState::Results, ViewState::Upload)
        )
    }

    pub fn transition(self, to: ViewState) -> Result<ViewState> {
        if self.can_transition(to) {
            Ok(to)
        } else {
            Err(Error::InvalidTransition {
                from: self.as_str(),
                to: to.as_str(),
            })
        }
    }
}

/// 結果画面のタブ
pub trait TabKind: Copy + Eq + 'static {
    /// 表示順
    const ALL: &'static [Self];

    fn id(&self) -> &'static str;
    fn label(&self) -> &'static str;
}

/// 単一ファイル結果のタブ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SingleTab {
    #[default]
    Structured,
    RawText,
    Summary,
}

impl TabKind for SingleTab {
    const ALL: &'static [Self] = &[SingleTab::Structured, SingleTab::RawText, SingleTab::Summary];

    fn id(&self) -> &'static str {
        match self {
            SingleTab::Structured => "structured",
            SingleTab::RawText => "raw",
            SingleTab::Summary => "summary",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            SingleTab::Structured => "Structured Data",
            SingleTab::RawText => "Raw Text",
            SingleTab::Summary => "AI Summary",
        }
    }
}

/// バッチ結果のタブ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BatchTab {
    #[default]
    Summary,
    LineItems,
    Errors,
}

impl TabKind for BatchTab {
    const ALL: &'static [Self] = &[BatchTab::Summary, BatchTab::LineItems, BatchTab::Errors];

    fn id(&self) -> &'static str {
        match self {
            BatchTab::Summary => "summary",
            BatchTab::LineItems => "line-items",
            BatchTab::Errors => "errors",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            BatchTab::Summary => "Invoice Summary",
            BatchTab::LineItems => "Line Items",
            BatchTab::Errors => "Processing Errors",
        }
    }
}

/// タブ選択状態（常に1つだけアクティブ）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabSet<T: TabKind> {
    active: T,
}

impl<T: TabKind> TabSet<T> {
    pub fn new() -> Self {
        Self { active: T::ALL[0] }
    }

    pub fn active(&self) -> T {
        self.active
    }

    pub fn is_active(&self, tab: T) -> bool {
        self.active == tab
    }

    pub fn activate(&mut self, tab: T) {
        self.active = tab;
    }

    /// id からタブを選択（未知の id は無視して false）
    pub fn activate_id(&mut self, id: &str) -> bool {
        match T::ALL.iter().find(|t| t.id() == id) {
            Some(tab) => {
                self.active = *tab;
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.active = T::ALL[0];
    }
}

impl<T: TabKind> Default for TabSet<T> {
    fn default() -> Self {
        Self::new()
    }
}
