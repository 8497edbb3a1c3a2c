//! Plugin configuration.

use serde::Deserialize;

/// Options accepted by [`crate::LuoguFlavor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FlavorOptions {
    /// Whether a single `~` delimits strikethrough.
    ///
    /// Accepted for compatibility, but registration always turns single
    /// tilde off regardless of this value.
    pub single_tilde: bool,

    /// Whether mention links should point at the Luogu user space.
    ///
    /// Accepted but currently unused; the rewriter keeps the original link
    /// children and records only the uid.
    pub user_link_point_to_luogu: bool,
}

impl Default for FlavorOptions {
    fn default() -> Self {
        Self {
            single_tilde: true,
            user_link_point_to_luogu: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_both_options() {
        let options = FlavorOptions::default();

        assert!(options.single_tilde);
        assert!(options.user_link_point_to_luogu);
    }
}
