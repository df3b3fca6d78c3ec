//! Terminal-facing pieces.
//!
//! - **keymapper**: crossterm key events to `getch` key codes
//! - **renderer**: Draws window dirty spans with crossterm
//! - **terminal**: `CrosstermBackend`, the real-terminal `Backend`

pub mod keymapper;
pub mod renderer;
pub mod terminal;

pub use keymapper::KeyMapper;
pub use renderer::Renderer;
pub use terminal::CrosstermBackend;
