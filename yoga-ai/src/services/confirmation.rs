//! Operator confirmation before any paid call is made

use std::io::{self, BufRead, Write};

/// Asks whether to proceed with a projected spend
pub trait Confirmation: Send + Sync {
    fn confirm(&self, low_usd: f64, high_usd: f64) -> bool;
}

/// Interactive `[y/N]` prompt on stdin
pub struct StdinConfirmation;

impl Confirmation for StdinConfirmation {
    fn confirm(&self, low_usd: f64, high_usd: f64) -> bool {
        print!("{}", prompt_text(low_usd, high_usd));
        if let Err(e) = io::stdout().flush() {
            tracing::warn!("Could not flush confirmation prompt: {}", e);
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer),
            Err(e) => {
                tracing::warn!("Could not read confirmation, treating as decline: {}", e);
                false
            }
        }
    }
}

/// Always proceeds (`--yes`)
pub struct AutoConfirm;

impl Confirmation for AutoConfirm {
    fn confirm(&self, low_usd: f64, high_usd: f64) -> bool {
        tracing::info!(
            low_usd,
            high_usd,
            "Confirmation skipped, proceeding with enhancement"
        );
        true
    }
}

pub fn prompt_text(low_usd: f64, high_usd: f64) -> String {
    format!(
        "Proceed with enhancement? Estimated cost: ${:.2}-${:.2} [y/N]: ",
        low_usd, high_usd
    )
}

/// Only `y` or `Y` proceeds
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim_end_matches(['\r', '\n']).eq_ignore_ascii_case("y")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_text() {
        assert_eq!(
            prompt_text(0.5, 1.25),
            "Proceed with enhancement? Estimated cost: $0.50-$1.25 [y/N]: "
        );
    }

    #[test]
    fn test_only_y_proceeds() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative("Y\r\n"));
        assert!(is_affirmative("y"));

        assert!(!is_affirmative(""));
        assert!(!is_affirmative("\n"));
        assert!(!is_affirmative("yes\n"));
        assert!(!is_affirmative("n\n"));
        assert!(!is_affirmative(" y\n"));
    }

    #[test]
    fn test_auto_confirm() {
        assert!(AutoConfirm.confirm(1.0, 2.0));
    }
}
