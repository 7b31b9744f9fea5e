pub mod chat_proxy;
pub mod completion;
