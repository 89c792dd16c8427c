use crate::core::Notifier;

/// Prints toasts to the terminal; error toasts reach the log only at debug level.
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier {
    quiet: bool,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// 只寫日誌，不印到終端（例如 JSON/CSV 輸出時避免污染 stdout）
    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        tracing::info!("✅ {}", message);
        if !self.quiet {
            println!("✅ {}", message);
        }
    }

    fn error(&self, message: &str) {
        // 終端已經印過；日誌只在 --verbose 時重複
        tracing::debug!("❌ {}", message);
        if !self.quiet {
            eprintln!("❌ {}", message);
        }
    }
}
