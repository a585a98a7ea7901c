//! UIコンポーネント

pub mod batch_flow;
pub mod batch_results;
pub mod export_buttons;
pub mod file_list;
pub mod header;
pub mod notifications;
pub mod progress_bar;
pub mod single_flow;
pub mod single_results;
pub mod single_upload;
pub mod tabs;
pub mod upload_area;
