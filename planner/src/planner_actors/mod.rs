pub mod ui_handler;
