//! Application state management

use lagoon_core::{Shell, ShellConfig};

/// Managed wrapper around the one [`Shell`] instance.
///
/// The shell itself is immutable after construction (its registry has
/// interior mutability), so commands borrow it directly.
pub struct AppState {
    shell: Shell,
}

impl AppState {
    pub fn new(config: ShellConfig) -> Self {
        Self {
            shell: Shell::new(config),
        }
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }
}
