//! Platform detection for mobile and iOS specific toolbar behavior.

use std::sync::OnceLock;

/// Cached platform detection results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Platform {
    pub ios: bool,
    pub android: bool,
    pub mobile: bool,
}

static PLATFORM: OnceLock<Platform> = OnceLock::new();

/// Get cached platform info. Detection runs once on first call.
pub fn platform() -> &'static Platform {
    PLATFORM.get_or_init(detect_platform)
}

/// Classify a lowercase user agent.
///
/// `touch_mac` reports a Mac platform string with touch points, which is how
/// iPadOS presents itself.
pub fn classify(user_agent: &str, touch_mac: bool) -> Platform {
    let ios = user_agent.contains("iphone")
        || user_agent.contains("ipad")
        || user_agent.contains("ipod")
        || touch_mac;
    let android = user_agent.contains("android");
    let mobile = ios || android || user_agent.contains("mobile") || user_agent.contains("iemobile");

    Platform {
        ios,
        android,
        mobile,
    }
}

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
fn detect_platform() -> Platform {
    let Some(window) = web_sys::window() else {
        return Platform::default();
    };

    let navigator = window.navigator();
    let user_agent = navigator.user_agent().unwrap_or_default().to_lowercase();
    let platform_str = navigator.platform().unwrap_or_default().to_lowercase();
    let touch_mac = platform_str.contains("mac") && navigator.max_touch_points() > 0;

    classify(&user_agent, touch_mac)
}

#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
fn detect_platform() -> Platform {
    Platform::default()
}
