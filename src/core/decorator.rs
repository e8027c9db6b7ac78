//! Color decoration per severity level

use super::level::Level;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Wraps a finished line, e.g. in ANSI color codes
pub type Decorator = Arc<dyn Fn(&str) -> String + Send + Sync>;

#[derive(Clone)]
pub struct Decorators {
    by_level: HashMap<Level, Decorator>,
}

impl Decorators {
    /// No decoration for any level
    pub fn none() -> Self {
        Self {
            by_level: HashMap::new(),
        }
    }

    /// Green success, yellow warn, red error; log and info stay plain
    #[cfg(feature = "console")]
    pub fn colored() -> Self {
        use colored::Colorize;

        let mut decorators = Self::none();
        for level in Level::ALL {
            if let Some(color) = level.color() {
                decorators.set(level, Arc::new(move |line: &str| line.color(color).to_string()));
            }
        }
        decorators
    }

    pub fn get(&self, level: Level) -> Option<&Decorator> {
        self.by_level.get(&level)
    }

    pub fn set(&mut self, level: Level, decorator: Decorator) {
        self.by_level.insert(level, decorator);
    }

    pub fn clear(&mut self, level: Level) {
        self.by_level.remove(&level);
    }

    /// Decorated line, or `None` when the level has no decorator
    pub fn decorate(&self, level: Level, line: &str) -> Option<String> {
        self.get(level).map(|decorator| decorator(line))
    }
}

impl Default for Decorators {
    #[cfg(feature = "console")]
    fn default() -> Self {
        Self::colored()
    }

    #[cfg(not(feature = "console"))]
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Debug for Decorators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut levels: Vec<_> = self.by_level.keys().map(Level::to_str).collect();
        levels.sort_unstable();
        f.debug_struct("Decorators").field("levels", &levels).finish()
    }
}
