pub mod key_transpose;
pub mod tpc_transpose;

pub use key_transpose::transpose_key;
pub use tpc_transpose::transpose_tpc;
