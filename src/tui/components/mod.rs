//! # TUI Components
//!
//! ## Stateless Components (Props-Based Rendering)
//!
//! Receive all data as struct fields and are rebuilt every frame:
//! - `TitleBar`: app name, connection badge, tools, status text
//! - `WelcomeScreen`: capabilities and example questions for an empty conversation
//! - `Message`: a single chat turn
//!
//! ## Stateful Components (Event-Driven)
//!
//! Own local state that lives in `TuiState` and emit events:
//! - `InputBox`: multi-line text entry, locked while a reply is pending or the API is down
//! - `MessageList`: scrollable conversation view with layout caching
//!
//! Components receive external data as props rather than reaching into `App`,
//! so each one can be rendered against a `TestBackend` on its own.
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── welcome.rs
//! ├── message.rs
//! ├── message_list.rs
//! └── input_box/
//! ```

mod title_bar;
pub use title_bar::TitleBar;

mod welcome;
pub use welcome::WelcomeScreen;

pub mod input_box;
pub mod message;
pub use input_box::{InputBox, InputEvent};
pub mod message_list;
pub use message_list::{MessageList, MessageListState};
