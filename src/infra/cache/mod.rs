pub mod kiosk_cache;
