use clap::{Parser, Subcommand};
use invoice_extract_common::ExtractionType;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "invoice-extract")]
#[command(about = "PDF請求書・文書データ抽出APIのクライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// APIのベースURL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// PDFを1つ抽出して結果を表示・保存
    Extract {
        /// PDFファイル
        #[arg(required = true)]
        file: PathBuf,

        /// 抽出種別 (invoice/contract/general)
        #[arg(short = 't', long = "type", default_value = "invoice")]
        kind: ExtractionType,

        /// 出力JSONファイル（デフォルト: <ファイル名>_extraction_results.json）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 通信失敗時にデモ結果を表示
        #[arg(long)]
        demo: bool,
    },

    /// 複数の請求書PDFを一括抽出
    Batch {
        /// PDFファイルまたはフォルダ（フォルダは直下のみ）
        #[arg(required = true, num_args = 1..)]
        paths: Vec<PathBuf>,

        /// 出力JSONファイル
        #[arg(short, long, default_value = "batch_result.json")]
        output: PathBuf,
    },

    /// バッチ結果JSONからExcelを生成
    Export {
        /// バッチ結果JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// サーバーを使わずローカルで生成
        #[arg(long)]
        local: bool,
    },

    /// 設定の表示・変更
    Config {
        /// APIのベースURLを設定
        #[arg(long)]
        set_base_url: Option<String>,

        /// 通信失敗時のデモ結果表示 (on/off)
        #[arg(long)]
        demo_fallback: Option<Toggle>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// on/off の切り替え値
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn enabled(&self) -> bool {
        matches!(self, Toggle::On)
    }
}

impl std::str::FromStr for Toggle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "on" | "true" | "yes" | "1" => Ok(Toggle::On),
            "off" | "false" | "no" | "0" => Ok(Toggle::Off),
            _ => Err(format!("Unknown value: {}. Use on or off", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_parse() {
        assert_eq!("on".parse::<Toggle>().unwrap(), Toggle::On);
        assert_eq!("OFF".parse::<Toggle>().unwrap(), Toggle::Off);
        assert!("maybe".parse::<Toggle>().is_err());
        assert!(Toggle::On.enabled());
    }

    #[test]
    fn test_extract_args() {
        let cli = Cli::try_parse_from(["invoice-extract", "extract", "doc.pdf", "--type", "contract", "--demo"])
            .expect("parse失敗");
        match cli.command {
            Commands::Extract { file, kind, output, demo } => {
                assert_eq!(file, PathBuf::from("doc.pdf"));
                assert_eq!(kind, ExtractionType::Contract);
                assert!(output.is_none());
                assert!(demo);
            }
            _ => panic!("extract になるはず"),
        }
    }

    #[test]
    fn test_extract_default_type() {
        let cli = Cli::try_parse_from(["invoice-extract", "extract", "doc.pdf"]).expect("parse失敗");
        assert!(matches!(cli.command, Commands::Extract { kind: ExtractionType::Invoice, .. }));
    }

    #[test]
    fn test_batch_args() {
        let cli = Cli::try_parse_from(["invoice-extract", "-v", "batch", "a.pdf", "invoices/"])
            .expect("parse失敗");
        assert!(cli.verbose);
        match cli.command {
            Commands::Batch { paths, output } => {
                assert_eq!(paths.len(), 2);
                assert_eq!(output, PathBuf::from("batch_result.json"));
            }
            _ => panic!("batch になるはず"),
        }
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(Cli::try_parse_from(["invoice-extract", "extract", "a.pdf", "--type", "receipt"]).is_err());
    }
}
