//! Keyboard shortcut registry and documentation.

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, description: &'static str) -> Self {
        Self { key, description }
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("P / 1", "Pencil tool"),
            Shortcut::new("R / 2", "Rectangle tool"),
            Shortcut::new("L / 3", "Line tool"),
            Shortcut::new("C / 4", "Circle tool"),
            Shortcut::new("Enter", "Recognize the drawing"),
            Shortcut::new("Escape", "Finish the current gesture"),
        ]
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:10} {}", shortcut.key, shortcut.description);
        }
        println!();
    }
}
