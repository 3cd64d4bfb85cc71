pub mod role_sync;
