pub mod climate;
pub mod crop;
pub mod month;
pub mod recommendation;
pub mod timeline;

pub use climate::*;
pub use crop::*;
pub use month::*;
pub use recommendation::*;
pub use timeline::*;
