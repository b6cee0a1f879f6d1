//! Log target helpers

/// Modules whose trace output drowns the interesting lines.
pub const NOISY_MODULES: [&str; 4] = ["hyper", "hyper_util", "reqwest", "rustls"];

/// True if `target` belongs to one of [`NOISY_MODULES`].
pub fn is_noisy(target: &str) -> bool {
    NOISY_MODULES.iter().any(|name| target.starts_with(name))
}
