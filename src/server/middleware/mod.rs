//! Request guards shared by the webhook controllers.

pub mod auth;

#[cfg(test)]
mod test;
