pub mod codec;
pub mod compose;
pub mod composite;
pub mod pipeline;
