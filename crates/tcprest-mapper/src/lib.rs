//! Type-name-keyed bidirectional codecs between wire token strings and
//! dynamically-typed values.

pub mod mapper;
pub mod registry;
pub mod value;

pub use mapper::{
    BooleanMapper, DoubleMapper, IntMapper, JsonMapper, Mapper, MapperError, NullMapper,
    StringMapper,
};
pub use registry::MapperRegistry;
pub use value::Value;
