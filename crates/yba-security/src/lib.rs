mod secret;

pub use secret::{generate_random_bytes, generate_random_string_url_safe};
