//! Front-end assets embedded at compile time.

pub const INDEX_HTML: &str = include_str!("../assets/index.html");
pub const MAIN_JS: &str = include_str!("../assets/main.js");
pub const STYLE_CSS: &str = include_str!("../assets/style.css");
