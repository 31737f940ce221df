pub mod csv_out;
pub mod document;
pub mod http_client;
pub mod ncaa_fetch;
pub mod normalize;
pub mod table;
