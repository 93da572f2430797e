pub mod weekly_expander;
