pub mod axis;
pub mod data;
pub mod datasource;
pub mod plot_configs;
pub mod state;

// Flat re-exports so callers can use `data_types::*`
pub use axis::*;
pub use data::*;
pub use datasource::*;
pub use plot_configs::*;
pub use state::*;
