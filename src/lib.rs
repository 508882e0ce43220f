//! Spotifind web service library
//!
//! A small web service in front of the Spotify Web API: users log in with
//! Spotify, see what they are listening to, and turn lists of recommended
//! songs into real playlists. The Spotify session lives in browser cookies.
//!
//! # Modules
//!
//! - `api` - HTTP handlers
//! - `config` - Environment configuration and the static site description
//! - `error` - Spotify client and HTTP error types
//! - `server` - Router assembly and listener
//! - `session` - Session cookie handling
//! - `spotify` - Spotify accounts service and Web API client
//! - `types` - Data structures mirrored from the Web API and request bodies
//! - `utils` - PKCE helpers, track URIs and song list formatting

pub mod api;
pub mod config;
pub mod error;
pub mod server;
pub mod session;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for the binary's top-level plumbing.
///
/// Library code returns the typed errors from [`error`]; this alias only
/// collects them where the caller reports and exits.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on http://{}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for fatal startup failures; request handlers must never call it.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Handlers log every upstream failure with it before answering with an
/// error status.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
