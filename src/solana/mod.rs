pub mod rpc;

pub use rpc::{BalanceProvider, SolanaRpc};
