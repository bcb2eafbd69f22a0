pub mod reception;
