//! Command implementations for fpm-cli

pub mod init;
pub mod module;
pub mod origin;

pub use init::run_init;
pub use module::{
    run_module_create, run_module_del, run_module_disable, run_module_enable, run_module_info,
    run_module_install, run_module_list, run_module_search, run_module_sync_back,
    run_module_sync_pkg,
};
pub use origin::{run_origin_add, run_origin_del, run_origin_list, run_origin_make, run_origin_sync};
