//! Theme resolution

use std::sync::OnceLock;

use crate::models::Theme;

/// Cached system dark mode preference (detected once per process)
static SYSTEM_DARK_MODE: OnceLock<bool> = OnceLock::new();

/// Effective theme: an explicit choice wins, otherwise the system preference
#[must_use]
pub const fn resolve_theme(stored: Option<Theme>, system_prefers_dark: bool) -> Theme {
    match stored {
        Some(theme) => theme,
        None => Theme::from_dark(system_prefers_dark),
    }
}

/// Theme to apply after the system preference changed, if any.
///
/// System changes are only followed while no theme is stored.
#[must_use]
pub const fn follow_system_change(
    stored: Option<Theme>,
    system_prefers_dark: bool,
) -> Option<Theme> {
    match stored {
        Some(_) => None,
        None => Some(Theme::from_dark(system_prefers_dark)),
    }
}

/// Detect system dark mode preference (cached after first call)
#[must_use]
pub fn is_system_dark_mode() -> bool {
    *SYSTEM_DARK_MODE.get_or_init(|| match probe_dark_mode() {
        Some(is_dark) => {
            tracing::debug!("System theme detected: {}", Theme::from_dark(is_dark));
            is_dark
        }
        None => {
            tracing::debug!("System theme unknown, defaulting to light mode");
            false
        }
    })
}

#[cfg(any(target_os = "windows", target_os = "macos"))]
fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    match std::process::Command::new(program).args(args).output() {
        Ok(output) => Some(String::from_utf8_lossy(&output.stdout).into_owned()),
        Err(error) => {
            tracing::warn!("Failed to run {} for theme detection: {}", program, error);
            None
        }
    }
}

#[cfg(target_os = "windows")]
fn probe_dark_mode() -> Option<bool> {
    // AppsUseLightTheme is 0x0 in dark mode
    let stdout = command_stdout(
        "reg",
        &[
            "query",
            r"HKCU\SOFTWARE\Microsoft\Windows\CurrentVersion\Themes\Personalize",
            "/v",
            "AppsUseLightTheme",
        ],
    )?;
    Some(stdout.contains("0x0"))
}

#[cfg(target_os = "macos")]
fn probe_dark_mode() -> Option<bool> {
    // The key is absent in light mode, so empty output means light
    let stdout = command_stdout("defaults", &["read", "-g", "AppleInterfaceStyle"])?;
    Some(stdout.trim().eq_ignore_ascii_case("dark"))
}

#[cfg(target_os = "linux")]
fn probe_dark_mode() -> Option<bool> {
    std::env::var("GTK_THEME")
        .ok()
        .map(|theme| theme.to_lowercase().contains("dark"))
}

#[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
fn probe_dark_mode() -> Option<bool> {
    None
}
