pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{changed, error, info, listening, section, success, warn, watching};
pub use table::{edge_table, stats_table};
pub use theme::{theme, Theme};
