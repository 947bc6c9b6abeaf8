//! Shared utility functions for the handlers and views.

use axum::response::Redirect;

use crate::error::AppError;

/// Path of the simulation list page
pub const PLAY_PATH: &str = "/play";

/// Escapes text for safe inclusion in HTML bodies and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// `303 See Other` back to the simulation list.
pub fn redirect_to_play() -> Redirect {
    Redirect::to(PLAY_PATH)
}

/// Runs filesystem work on the blocking thread pool.
///
/// Store operations are synchronous `std::fs` calls; running them here keeps
/// recursive deletes and template copies off the async worker threads.
pub async fn run_blocking<F, T>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(work).await?)
}
