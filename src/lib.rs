pub mod console;
pub mod core;
pub mod error;
pub mod input;
pub mod shell_cmd;
pub mod storage;
pub mod summary;

pub use error::{
    InputError, InputErrorKind, PublishError, PublishResult, SystemError, SystemErrorKind,
};
