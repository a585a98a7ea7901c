//! トースト通知
//!
//! 複数の通知が独立して共存する。自動消去のタイマーは呼び出し側（UI）が持ち、
//! ここでは id による追加・削除だけを扱う。

/// 自動消去までの時間
pub const AUTO_DISMISS_MS: u32 = 5000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
        }
    }

    /// Font Awesome のアイコン名
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info-circle",
            NotificationKind::Success => "check-circle",
            NotificationKind::Warning => "exclamation-triangle",
            NotificationKind::Error => "exclamation-circle",
        }
    }

    pub fn css_class(&self) -> String {
        format!("notification notification-{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

/// 表示中の通知一覧
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    next_id: u64,
    items: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 通知を追加し、その id を返す
    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notification {
            id,
            kind,
            message: message.into(),
        });
        id
    }

    /// 削除（既に消えていれば false）
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
