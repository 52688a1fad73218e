use anyhow::Result;
use ratatui::DefaultTerminal;

/// Raw mode plus the alternate screen for as long as the client runs.
///
/// `ratatui::try_init` also installs a panic hook that restores the terminal.
pub struct TerminalManager {
    terminal: DefaultTerminal,
    restored: bool,
}

impl TerminalManager {
    pub fn new() -> Result<Self> {
        let terminal = ratatui::try_init()?;
        Ok(Self {
            terminal,
            restored: false,
        })
    }

    pub fn terminal_mut(&mut self) -> &mut DefaultTerminal {
        &mut self.terminal
    }

    /// Leave the alternate screen and report any failure
    pub fn restore(mut self) -> Result<()> {
        ratatui::try_restore()?;
        self.restored = true;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TerminalManager {
    fn drop(&mut self) {
        if !self.restored {
            ratatui::restore();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_after_init() {
        // init fails without a tty; nothing to restore then
        if let Ok(manager) = TerminalManager::new() {
            assert!(manager.restore().is_ok());
        }
    }
}
