//! ブラウザ側の表示設定（テーマ・スクロール位置）

use caption_prep_common::theme::{Theme, THEME_STORAGE_KEY};
use gloo::events::EventListener;
use leptos::prelude::request_animation_frame;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, Storage};

const SCROLL_STORAGE_KEY: &str = "scrollY";

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn session_storage() -> Option<Storage> {
    web_sys::window()?.session_storage().ok().flatten()
}

/// 保存済みのテーマ（なければ dark）
pub fn saved_theme() -> Theme {
    local_storage()
        .and_then(|storage| storage.get_item(THEME_STORAGE_KEY).ok().flatten())
        .map(|name| Theme::from_name(&name))
        .unwrap_or_default()
}

/// テーマを反映して保存する
pub fn apply_theme(theme: Theme) {
    if let Err(err) = set_theme_styles(theme) {
        log::warn!("[ui] failed to apply theme {}: {:?}", theme.as_str(), err);
    }
    if let Some(storage) = local_storage() {
        if storage.set_item(THEME_STORAGE_KEY, theme.as_str()).is_err() {
            log::warn!("[ui] failed to store theme");
        }
    }
}

fn set_theme_styles(theme: Theme) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document not available"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("body not available"))?;
    let root: HtmlElement = document
        .document_element()
        .ok_or_else(|| JsValue::from_str("root element not available"))?
        .dyn_into()
        .map_err(JsValue::from)?;

    let classes = body.class_list();
    classes.remove_2("bg-photo", "bg-gradient")?;
    let style = root.style();
    style.remove_property("--bg-image")?;

    if let Some(color) = theme.background_color() {
        style.set_property("--bg", color)?;
    }
    if let Some(image) = theme.background_image() {
        style.set_property("--bg-image", &format!("url(\"{}\")", image))?;
    }
    if let Some(class) = theme.body_class() {
        classes.add_1(class)?;
    }
    Ok(())
}

fn parse_scroll(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|y| y.is_finite())
}

/// ページを離れるときにスクロール位置を記録する
pub fn watch_scroll_position() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let target = window.clone();
    EventListener::new(&target, "pagehide", move |_| {
        save_scroll_position(window.scroll_y().unwrap_or(0.0));
    })
    .forget();
}

fn save_scroll_position(y: f64) {
    let Some(storage) = session_storage() else {
        return;
    };
    if storage.set_item(SCROLL_STORAGE_KEY, &(y as i64).to_string()).is_err() {
        log::warn!("[ui] failed to store scroll position");
    }
}

/// 記録したスクロール位置へ次の描画フレームで戻す
pub fn restore_scroll_position() {
    let Some(y) = session_storage()
        .and_then(|storage| storage.get_item(SCROLL_STORAGE_KEY).ok().flatten())
        .and_then(|raw| parse_scroll(&raw))
    else {
        return;
    };
    request_animation_frame(move || {
        if let Some(window) = web_sys::window() {
            window.scroll_to_with_x_and_y(0.0, y);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scroll() {
        assert_eq!(parse_scroll("240"), Some(240.0));
        assert_eq!(parse_scroll(" 12.5 "), Some(12.5));
        assert_eq!(parse_scroll(""), None);
        assert_eq!(parse_scroll("NaN"), None);
        assert_eq!(parse_scroll("top"), None);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn body_classes() -> web_sys::DomTokenList {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
            .expect("body")
            .class_list()
    }

    #[wasm_bindgen_test]
    fn test_photo_theme_sets_class_and_persists() {
        apply_theme(Theme::Photo2);
        assert!(body_classes().contains("bg-photo"));
        assert_eq!(saved_theme(), Theme::Photo2);

        apply_theme(Theme::Gradient);
        assert!(!body_classes().contains("bg-photo"));
        assert!(body_classes().contains("bg-gradient"));

        apply_theme(Theme::Slate);
        assert!(!body_classes().contains("bg-gradient"));
        assert_eq!(saved_theme(), Theme::Slate);
    }

    #[wasm_bindgen_test]
    fn test_scroll_position_is_stored_in_session() {
        save_scroll_position(312.7);
        let stored = session_storage()
            .and_then(|storage| storage.get_item(SCROLL_STORAGE_KEY).ok().flatten());
        assert_eq!(stored.as_deref(), Some("312"));
        assert_eq!(stored.as_deref().and_then(parse_scroll), Some(312.0));
    }
}
