//! Terminal styling utilities
//!
//! One palette for all CLI output:
//! - Semantic colors for status (green/yellow/red)
//! - Cyan for headers and technical terms
//! - Bold for the current sink

use crossterm::style::Stylize;

/// Extension trait for consistent wpsw styling
///
/// Use these methods instead of direct color calls.
///
/// # Examples
///
/// ```
/// use wpsw::style::WpswStyle;
///
/// println!("{}", "AUDIO SINKS:".header());
/// println!("{}", "Switched".success());
/// println!("{}", "wpctl status".technical());
/// ```
pub trait WpswStyle: Stylize {
    /// Section headers (cyan bold)
    fn header(self) -> <<Self as Stylize>::Styled as Stylize>::Styled
    where
        Self: Sized,
        <Self as Stylize>::Styled: Stylize,
    {
        self.cyan().bold()
    }

    /// Success and the current-sink marker (green)
    fn success(self) -> <Self as Stylize>::Styled
    where
        Self: Sized,
    {
        self.green()
    }

    /// Errors (red)
    fn error(self) -> <Self as Stylize>::Styled
    where
        Self: Sized,
    {
        self.red()
    }

    /// Warnings and empty states (yellow)
    fn warning(self) -> <Self as Stylize>::Styled
    where
        Self: Sized,
    {
        self.yellow()
    }

    /// Ids, commands and paths (cyan)
    fn technical(self) -> <Self as Stylize>::Styled
    where
        Self: Sized,
    {
        self.cyan()
    }
}

impl<T: Stylize> WpswStyle for T {}
