use eframe::egui::Color32;

pub const WINDOW_TITLE: &str = "YT Audio Downloader";
pub const WINDOW_WIDTH: f32 = 840.0;
pub const WINDOW_HEIGHT: f32 = 580.0;

pub const HEADING: &str = "YouTube Audio Downloader";
pub const URL_LABEL: &str = "YouTube URL";
pub const URL_HINT: &str = "https://youtube.com/watch?v=...";
pub const OUTPUT_LABEL: &str = "Output";
pub const DESTINATION_HINT: &str = "Destination folder";
pub const CONSOLE_LABEL: &str = "Console";

pub const ACCENT: Color32 = Color32::from_rgb(0x7a, 0xa2, 0xf7);
pub const ACCENT_HOVER: Color32 = Color32::from_rgb(0x5b, 0x8d, 0xef);
pub const SECONDARY: Color32 = Color32::from_rgb(0x64, 0x74, 0x8b);
pub const SECONDARY_HOVER: Color32 = Color32::from_rgb(0x47, 0x55, 0x69);
pub const TEXT: Color32 = Color32::from_rgb(0xcb, 0xd5, 0xe1);
pub const CARD: Color32 = Color32::from_rgb(0x02, 0x06, 0x17);
pub const BG: Color32 = Color32::from_rgb(0x0f, 0x17, 0x2a);

pub const WARN_TEXT: Color32 = Color32::from_rgb(0xe0, 0xaf, 0x68);
pub const ERROR_TEXT: Color32 = Color32::from_rgb(0xf7, 0x76, 0x8e);
pub const SUCCESS_TEXT: Color32 = Color32::from_rgb(0x9e, 0xce, 0x6a);

pub const FIELD_HEIGHT: f32 = 40.0;
pub const BUTTON_HEIGHT: f32 = 44.0;
pub const BROWSE_WIDTH: f32 = 52.0;
pub const CONSOLE_FONT_SIZE: f32 = 12.0;
