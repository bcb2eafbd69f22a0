pub mod reception_handler;
