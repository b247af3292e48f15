pub mod data_table;
pub mod details;
pub mod fetch;
pub mod force_graph;
pub mod modals;
pub mod status;
pub mod toolbar;
