//! 進捗表示（プログレスバーとステップ表示）

/// バッチ: 送信前
pub const BATCH_SENDING: u8 = 10;
/// バッチ: レスポンスヘッダ受信後
pub const BATCH_RECEIVED: u8 = 90;
/// バッチ: JSON解析後
pub const BATCH_DONE: u8 = 100;

/// 完了後に結果画面へ切り替えるまでの待ち時間（バッチ）
pub const RESULTS_DELAY_MS: u32 = 1000;

/// 受付完了から自動処理開始までの待ち時間（単一）
pub const AUTO_START_DELAY_MS: u32 = 1000;

/// 無効ファイルのエラー表示を戻すまでの時間（単一）
pub const INLINE_ERROR_MS: u32 = 3000;

/// 単一フローの処理ステップ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStep {
    Upload,
    ExtractText,
    Analyze,
    Finalize,
}

impl ProcessingStep {
    pub const ALL: [ProcessingStep; 4] = [
        ProcessingStep::Upload,
        ProcessingStep::ExtractText,
        ProcessingStep::Analyze,
        ProcessingStep::Finalize,
    ];

    /// 1始まりの番号
    pub fn number(&self) -> u8 {
        match self {
            ProcessingStep::Upload => 1,
            ProcessingStep::ExtractText => 2,
            ProcessingStep::Analyze => 3,
            ProcessingStep::Finalize => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProcessingStep::Upload => "Uploading PDF",
            ProcessingStep::ExtractText => "Extracting text",
            ProcessingStep::Analyze => "AI analysis",
            ProcessingStep::Finalize => "Preparing results",
        }
    }

    /// ステップ前の擬似待ち時間（Analyze は実際の通信なので None）
    pub fn delay_ms(&self) -> Option<u32> {
        match self {
            ProcessingStep::Upload => Some(1000),
            ProcessingStep::ExtractText => Some(1500),
            ProcessingStep::Analyze => None,
            ProcessingStep::Finalize => Some(500),
        }
    }

    /// ステップ完了時の進捗率
    pub fn percent(&self) -> u8 {
        self.number() * 25
    }
}

/// プログレスバーとステップ表示の状態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    percent: u8,
    /// アクティブなステップ数（先頭から累積）
    active_steps: u8,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn set_percent(&mut self, percent: u8) {
        self.percent = percent.min(100);
    }

    pub fn active_steps(&self) -> u8 {
        self.active_steps
    }

    pub fn is_step_active(&self, step: ProcessingStep) -> bool {
        step.number() <= self.active_steps
    }

    /// ステップをアクティブにし、進捗率をそのステップの値へ
    pub fn activate(&mut self, step: ProcessingStep) {
        self.active_steps = self.active_steps.max(step.number());
        self.set_percent(step.percent());
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_percentages() {
        let percents: Vec<u8> = ProcessingStep::ALL.iter().map(|s| s.percent()).collect();
        assert_eq!(percents, vec![25, 50, 75, 100]);
    }

    #[test]
    fn test_step_delays() {
        assert_eq!(ProcessingStep::Upload.delay_ms(), Some(1000));
        assert_eq!(ProcessingStep::ExtractText.delay_ms(), Some(1500));
        assert_eq!(ProcessingStep::Analyze.delay_ms(), None);
        assert_eq!(ProcessingStep::Finalize.delay_ms(), Some(500));
    }

    #[test]
    fn test_steps_activate_cumulatively() {
        let mut progress = Progress::new();
        progress.activate(ProcessingStep::Upload);
        progress.activate(ProcessingStep::ExtractText);

        assert!(progress.is_step_active(ProcessingStep::Upload));
        assert!(progress.is_step_active(ProcessingStep::ExtractText));
        assert!(!progress.is_step_active(ProcessingStep::Analyze));
        assert_eq!(progress.percent(), 50);
    }

    #[test]
    fn test_percent_is_clamped() {
        let mut progress = Progress::new();
        progress.set_percent(150);
        assert_eq!(progress.percent(), 100);
    }

    #[test]
    fn test_reset() {
        let mut progress = Progress::new();
        progress.activate(ProcessingStep::Finalize);
        progress.reset();
        assert_eq!(progress.percent(), 0);
        assert_eq!(progress.active_steps(), 0);
    }
}
