pub mod api_entry;
