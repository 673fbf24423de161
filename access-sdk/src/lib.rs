pub mod access_key;
pub mod errors;
pub mod sdk;
pub mod sdk_builder;

pub use access_key::AccessKey;
pub use errors::SdkErrors;
pub use sdk::AccessSdk;
pub use sdk_builder::AccessSdkBuilder;
