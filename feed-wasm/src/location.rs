use feed_client::{HistoryMode, Transition, ViewState};
use wasm_bindgen::JsValue;

fn window() -> Result<web_sys::Window, String> {
    web_sys::window().ok_or_else(|| "window is not available".to_string())
}

/// Состояние экрана из текущего адреса.
pub(crate) fn read_view_state() -> ViewState {
    let search = web_sys::window()
        .and_then(|window| window.location().search().ok())
        .unwrap_or_default();
    ViewState::from_query_string(&search)
}

fn url_for(pathname: &str, state: &ViewState) -> String {
    let query = state.to_query_string();
    if query.is_empty() {
        return pathname.to_string();
    }
    format!("{pathname}?{query}")
}

/// Записывает переход в адресную строку через history API.
pub(crate) fn write(transition: &Transition) -> Result<(), String> {
    let window = window()?;
    let pathname = window
        .location()
        .pathname()
        .unwrap_or_else(|_| "/".to_string());
    let url = url_for(&pathname, &transition.state);

    let history = window
        .history()
        .map_err(|_| "history is not available".to_string())?;
    let result = match transition.mode {
        HistoryMode::Push => history.push_state_with_url(&JsValue::NULL, "", Some(&url)),
        HistoryMode::Replace => history.replace_state_with_url(&JsValue::NULL, "", Some(&url)),
    };
    result.map_err(|_| format!("failed to update url to {url}"))
}

/// «Назад» в истории браузера. Новое состояние придёт через `popstate`.
pub(crate) fn back() -> Result<(), String> {
    window()?
        .history()
        .and_then(|history| history.back())
        .map_err(|_| "failed to go back".to_string())
}
