pub mod app;
pub mod color;
pub mod key;

pub use app::App;
pub use color::Color;
pub use key::Key;
