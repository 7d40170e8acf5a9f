//! 画面テーマ

pub const THEME_STORAGE_KEY: &str = "ui_theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Gray,
    Slate,
    Midnight,
    Photo1,
    Photo2,
    Photo3,
    Gradient,
}

impl Theme {
    pub const ALL: [Theme; 8] = [
        Theme::Dark,
        Theme::Gray,
        Theme::Slate,
        Theme::Midnight,
        Theme::Photo1,
        Theme::Photo2,
        Theme::Photo3,
        Theme::Gradient,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Gray => "gray",
            Theme::Slate => "slate",
            Theme::Midnight => "midnight",
            Theme::Photo1 => "photo-1",
            Theme::Photo2 => "photo-2",
            Theme::Photo3 => "photo-3",
            Theme::Gradient => "gradient",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Dark => "ダーク",
            Theme::Gray => "グレー",
            Theme::Slate => "スレート",
            Theme::Midnight => "ミッドナイト",
            Theme::Photo1 => "写真 1",
            Theme::Photo2 => "写真 2",
            Theme::Photo3 => "写真 3",
            Theme::Gradient => "グラデーション",
        }
    }

    /// 保存値から復元（不明な値はデフォルト）
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == name)
            .unwrap_or_default()
    }

    /// `--bg` に設定する背景色
    pub fn background_color(&self) -> Option<&'static str> {
        match self {
            Theme::Dark => Some("#0f1115"),
            Theme::Gray => Some("#1e1e1e"),
            Theme::Slate => Some("#1b2028"),
            Theme::Midnight => Some("#0a0c10"),
            _ => None,
        }
    }

    /// `--bg-image` に設定する背景画像
    pub fn background_image(&self) -> Option<&'static str> {
        match self {
            Theme::Photo1 => Some("/static/backgrounds/bg1.jpg"),
            Theme::Photo2 => Some("/static/backgrounds/bg2.jpg"),
            Theme::Photo3 => Some("/static/backgrounds/bg3.jpg"),
            _ => None,
        }
    }

    /// body に付けるクラス
    pub fn body_class(&self) -> Option<&'static str> {
        match self {
            Theme::Photo1 | Theme::Photo2 | Theme::Photo3 => Some("bg-photo"),
            Theme::Gradient => Some("bg-gradient"),
            _ => None,
        }
    }
}
