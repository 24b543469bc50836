pub mod bookmarks;
pub mod favicon;
pub mod host;
pub mod index;
pub mod logging;
pub mod plugin;
pub mod plugins;
pub mod results;
pub mod settings;
pub mod toast_log;
