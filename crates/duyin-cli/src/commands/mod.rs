pub mod config_ops;
pub mod dict_ops;
pub mod label_ops;
