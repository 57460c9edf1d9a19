//! Human-readable platform names.

/// Display name for a platform identifier.
///
/// Unknown platforms are returned as given.
///
/// ```
/// use apicat_platform::display_name;
///
/// assert_eq!(display_name("maccatalyst"), "Mac Catalyst");
/// assert_eq!(display_name("TVOS"), "tvOS");
/// assert_eq!(display_name("plan9"), "plan9");
/// ```
pub fn display_name(platform: &str) -> String {
    let known = match platform.to_ascii_lowercase().as_str() {
        "android" => "Android",
        "browser" => "Browser",
        "freebsd" => "FreeBSD",
        "illumos" => "illumos",
        "ios" => "iOS",
        "linux" => "Linux",
        "maccatalyst" => "Mac Catalyst",
        "macos" | "osx" => "macOS",
        "solaris" => "Solaris",
        "tvos" => "tvOS",
        "wasi" => "WASI",
        "watchos" => "watchOS",
        "windows" => "Windows",
        _ => return platform.to_string(),
    };
    known.to_string()
}
