pub mod get_delivery_history;
